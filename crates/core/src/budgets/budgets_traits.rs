use async_trait::async_trait;
use chrono::NaiveDate;

use super::budgets_model::{Budget, BudgetStatus, NewBudget};
use crate::errors::Result;

/// Persistence contract for budgets.
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    fn list_budgets(&self) -> Result<Vec<Budget>>;
    fn get_budget(&self, budget_id: i32) -> Result<Option<Budget>>;
    /// Inserts a budget, or replaces amount and period of the category's
    /// existing one.
    async fn upsert_budget(&self, new_budget: NewBudget) -> Result<Budget>;
    /// Returns the number of deleted rows.
    async fn delete_budget(&self, budget_id: i32) -> Result<usize>;
}

#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    fn get_budgets(&self) -> Result<Vec<Budget>>;
    /// Status of every budget. Missing bounds default to the budget's
    /// current period.
    fn get_budget_statuses(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<BudgetStatus>>;
    async fn set_budget(&self, new_budget: NewBudget) -> Result<Budget>;
    async fn delete_budget(&self, budget_id: i32) -> Result<()>;
}
