//! Analytics response models. Money values are rounded to two decimals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transactions::TransactionType;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryResponse {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    pub transaction_count: i64,
}

/// Totals of a single category over the requested range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryBreakdown {
    pub category_id: i32,
    pub category_name: String,
    #[serde(rename = "type")]
    pub category_type: TransactionType,
    pub total_amount: Decimal,
    pub transaction_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyTrend {
    /// Full English month name, e.g. "March"
    pub month: String,
    pub year: i32,
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BalanceResponse {
    pub balance: Decimal,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
}
