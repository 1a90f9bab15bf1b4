use chrono::NaiveDate;
use log::debug;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;
use std::sync::Arc;

use super::budgets_model::{Budget, BudgetStatus, BudgetTier, NewBudget};
use super::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::categories::CategoryRepositoryTrait;
use crate::constants::{BUDGET_NEAR_THRESHOLD_PERCENT, PERCENT_DECIMAL_PRECISION};
use crate::errors::{Error, Result};
use crate::transactions::{
    validate_amount, TransactionFilter, TransactionRepositoryTrait, TransactionType,
};
use crate::utils::money_utils::{round_money, to_decimal};
use crate::utils::time_utils::{today, validate_date_range};
use async_trait::async_trait;

/// Tier for a budget given how much of it was spent.
pub fn classify_budget(budget_amount: Decimal, spent: Decimal) -> BudgetTier {
    // A fraction below one keeps the product within range
    let near_fraction = Decimal::from(BUDGET_NEAR_THRESHOLD_PERCENT) / Decimal::ONE_HUNDRED;
    if spent > budget_amount {
        BudgetTier::Over
    } else if spent > budget_amount * near_fraction {
        BudgetTier::Near
    } else {
        BudgetTier::Under
    }
}

pub fn compute_budget_status(
    budget: &Budget,
    category_name: &str,
    spent: f64,
    window: (NaiveDate, NaiveDate),
) -> Result<BudgetStatus> {
    let budget_amount = to_decimal(budget.amount)?;
    let spent = to_decimal(spent)?;
    let overflow = || {
        Error::Unexpected(format!(
            "Budget {} arithmetic overflowed (spent {})",
            budget.budget_id, spent
        ))
    };
    let percentage_used = if budget_amount.is_zero() {
        Decimal::ZERO
    } else {
        spent
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|scaled| scaled.checked_div(budget_amount))
            .ok_or_else(overflow)?
            .round_dp_with_strategy(
                PERCENT_DECIMAL_PRECISION,
                RoundingStrategy::MidpointAwayFromZero,
            )
    };
    let remaining = budget_amount.checked_sub(spent).ok_or_else(overflow)?;

    Ok(BudgetStatus {
        budget_id: budget.budget_id,
        category_id: budget.category_id,
        category_name: category_name.to_string(),
        period: budget.period,
        period_start: window.0,
        period_end: window.1,
        budget_amount: round_money(budget_amount),
        spent_amount: round_money(spent),
        remaining: round_money(remaining),
        percentage_used,
        is_over_budget: spent > budget_amount,
        status: classify_budget(budget_amount, spent),
    })
}

pub struct BudgetService {
    repository: Arc<dyn BudgetRepositoryTrait>,
    category_repository: Arc<dyn CategoryRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
}

impl BudgetService {
    pub fn new(
        repository: Arc<dyn BudgetRepositoryTrait>,
        category_repository: Arc<dyn CategoryRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            category_repository,
            transaction_repository,
        }
    }

    /// Budget statuses evaluated as if the current date were `today`.
    pub fn get_budget_statuses_as_of(
        &self,
        today: NaiveDate,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<BudgetStatus>> {
        validate_date_range(start_date, end_date)?;

        let names: HashMap<i32, String> = self
            .category_repository
            .list_categories()?
            .into_iter()
            .map(|c| (c.category_id, c.name))
            .collect();

        self.repository
            .list_budgets()?
            .iter()
            .map(|budget| {
                let (period_start, period_end) = budget.period.window(today);
                let window = (
                    start_date.unwrap_or(period_start),
                    end_date.unwrap_or(period_end),
                );
                // A single explicit bound can land on the far side of the period
                validate_date_range(Some(window.0), Some(window.1))?;
                let filter = TransactionFilter::between(Some(window.0), Some(window.1))
                    .with_category(Some(budget.category_id))
                    .with_type(Some(TransactionType::Expense));
                let spent = self.transaction_repository.sum_amount(&filter)?;
                let name = names
                    .get(&budget.category_id)
                    .map(String::as_str)
                    .unwrap_or("Unknown");
                compute_budget_status(budget, name, spent, window)
            })
            .collect()
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    fn get_budgets(&self) -> Result<Vec<Budget>> {
        self.repository.list_budgets()
    }

    fn get_budget_statuses(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<BudgetStatus>> {
        self.get_budget_statuses_as_of(today(), start_date, end_date)
    }

    async fn set_budget(&self, new_budget: NewBudget) -> Result<Budget> {
        validate_amount("amount", new_budget.amount)?;
        let category = self
            .category_repository
            .get_category(new_budget.category_id)?
            .ok_or_else(|| Error::not_found("Category", new_budget.category_id))?;
        if category.category_type != TransactionType::Expense {
            return Err(Error::invalid_input(
                "Budgets can only be set for expense categories",
            ));
        }
        debug!(
            "Setting {} budget of {} for '{}'",
            new_budget.period, new_budget.amount, category.name
        );
        self.repository.upsert_budget(new_budget).await
    }

    async fn delete_budget(&self, budget_id: i32) -> Result<()> {
        let budget = self
            .repository
            .get_budget(budget_id)?
            .ok_or_else(|| Error::not_found("Budget", budget_id))?;
        self.repository.delete_budget(budget_id).await?;
        debug!(
            "Deleted {} budget {} of category {}",
            budget.period, budget_id, budget.category_id
        );
        Ok(())
    }
}
