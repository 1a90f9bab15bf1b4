use chrono::NaiveDate;

use super::analytics_model::{BalanceResponse, CategoryBreakdown, MonthlyTrend, SummaryResponse};
use crate::errors::Result;
use crate::transactions::TransactionType;

/// Read-only aggregate queries. Date bounds are inclusive and optional.
pub trait AnalyticsServiceTrait: Send + Sync {
    fn get_summary(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<SummaryResponse>;

    /// Per-category totals, largest first.
    fn get_category_breakdown(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        transaction_type: Option<TransactionType>,
    ) -> Result<Vec<CategoryBreakdown>>;

    /// Income and expenses for the last `months` calendar months, oldest first.
    fn get_monthly_trend(&self, months: u32) -> Result<Vec<MonthlyTrend>>;

    fn get_balance(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<BalanceResponse>;
}
