//! Analytics module - aggregate reporting over transactions.

mod analytics_model;
mod analytics_service;
mod analytics_traits;

pub use analytics_model::{BalanceResponse, CategoryBreakdown, MonthlyTrend, SummaryResponse};
pub use analytics_service::AnalyticsService;
pub use analytics_traits::AnalyticsServiceTrait;
