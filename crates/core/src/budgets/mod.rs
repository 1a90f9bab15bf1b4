//! Budgets module - domain models, status computation, and traits.

mod budgets_model;
mod budgets_service;
mod budgets_traits;

pub use budgets_model::{Budget, BudgetPeriod, BudgetStatus, BudgetTier, NewBudget};
pub use budgets_service::{classify_budget, compute_budget_status, BudgetService};
pub use budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
