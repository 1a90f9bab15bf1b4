//! Transaction domain models.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, Result};

/// Direction of a money flow. Shared by categories and transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "INCOME" => Ok(TransactionType::Income),
            "EXPENSE" => Ok(TransactionType::Expense),
            other => Err(Error::invalid_input(format!(
                "Unknown transaction type '{}', expected INCOME or EXPENSE",
                other
            ))),
        }
    }
}

/// Domain model representing a transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub transaction_id: i32,
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub description: Option<String>,
    pub transaction_date: NaiveDate,
    pub category_id: i32,
    pub created_at: NaiveDateTime,
}

/// Input model for creating a new transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub description: Option<String>,
    pub transaction_date: NaiveDate,
    pub category_id: i32,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionUpdate {
    pub amount: Option<f64>,
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    pub description: Option<String>,
    pub transaction_date: Option<NaiveDate>,
    pub category_id: Option<i32>,
}

/// Row filters shared by listings and analytics. Date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category_id: Option<i32>,
    pub transaction_type: Option<TransactionType>,
}

impl TransactionFilter {
    pub fn between(start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Self {
        Self {
            start_date,
            end_date,
            ..Default::default()
        }
    }

    pub fn with_type(mut self, transaction_type: Option<TransactionType>) -> Self {
        self.transaction_type = transaction_type;
        self
    }

    pub fn with_category(mut self, category_id: Option<i32>) -> Self {
        self.category_id = category_id;
        self
    }

    /// Whether a transaction passes every set filter.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.start_date
            .map_or(true, |start| transaction.transaction_date >= start)
            && self
                .end_date
                .map_or(true, |end| transaction.transaction_date <= end)
            && self
                .category_id
                .map_or(true, |id| transaction.category_id == id)
            && self
                .transaction_type
                .map_or(true, |t| transaction.transaction_type == t)
    }
}

/// A filtered, paginated listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionQuery {
    pub filter: TransactionFilter,
    pub skip: i64,
    pub limit: i64,
}

impl Default for TransactionQuery {
    fn default() -> Self {
        Self {
            filter: TransactionFilter::default(),
            skip: 0,
            limit: crate::constants::DEFAULT_PAGE_LIMIT,
        }
    }
}
