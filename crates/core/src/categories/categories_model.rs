//! Category domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::transactions::TransactionType;

/// A named bucket that transactions and budgets attach to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub category_id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: TransactionType,
    pub created_at: NaiveDateTime,
}

/// Input model for creating a new category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCategory {
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: TransactionType,
}

impl NewCategory {
    pub fn new(name: impl Into<String>, category_type: TransactionType) -> Self {
        Self {
            name: name.into(),
            category_type,
        }
    }
}
