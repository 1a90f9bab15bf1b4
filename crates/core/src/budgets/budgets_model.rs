//! Budget domain models.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, Result};
use crate::utils::time_utils::{month_bounds, week_bounds, year_bounds};

/// Length of the window a budget amount applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BudgetPeriod {
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetPeriod::Weekly => "WEEKLY",
            BudgetPeriod::Monthly => "MONTHLY",
            BudgetPeriod::Yearly => "YEARLY",
        }
    }

    /// The current window (inclusive) of this period around `today`.
    pub fn window(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let bounds = match self {
            BudgetPeriod::Weekly => Some(week_bounds(today)),
            BudgetPeriod::Monthly => month_bounds(today.year(), today.month()),
            BudgetPeriod::Yearly => year_bounds(today.year()),
        };
        // Every valid NaiveDate has a valid enclosing month and year
        bounds.unwrap_or((today, today))
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetPeriod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "WEEKLY" => Ok(BudgetPeriod::Weekly),
            "MONTHLY" => Ok(BudgetPeriod::Monthly),
            "YEARLY" => Ok(BudgetPeriod::Yearly),
            other => Err(Error::invalid_input(format!(
                "Unknown budget period '{}'",
                other
            ))),
        }
    }
}

/// A spending ceiling for one category over a period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub budget_id: i32,
    pub category_id: i32,
    pub amount: f64,
    pub period: BudgetPeriod,
    pub created_at: NaiveDateTime,
}

/// Input model for creating or replacing a category's budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBudget {
    pub category_id: i32,
    pub amount: f64,
    #[serde(default)]
    pub period: BudgetPeriod,
}

/// Colour tier of a budget's consumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BudgetTier {
    Under,
    Near,
    Over,
}

/// Budget with the spending observed in its window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetStatus {
    pub budget_id: i32,
    pub category_id: i32,
    pub category_name: String,
    pub period: BudgetPeriod,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub budget_amount: Decimal,
    pub spent_amount: Decimal,
    pub remaining: Decimal,
    pub percentage_used: Decimal,
    pub is_over_budget: bool,
    pub status: BudgetTier,
}
