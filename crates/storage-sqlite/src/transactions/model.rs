//! Database models for transactions.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use finboard_core::transactions::{NewTransaction, Transaction, TransactionUpdate};
use finboard_core::Error;

/// Database model for transactions
#[derive(Queryable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub transaction_id: i32,
    pub amount: f64,
    pub transaction_type: String,
    pub description: Option<String>,
    pub transaction_date: NaiveDate,
    pub category_id: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
pub struct NewTransactionDB {
    pub amount: f64,
    pub transaction_type: String,
    pub description: Option<String>,
    pub transaction_date: NaiveDate,
    pub category_id: i32,
}

/// Partial update; `None` columns are left untouched.
#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = crate::schema::transactions)]
pub struct TransactionChangesetDB {
    pub amount: Option<f64>,
    pub transaction_type: Option<String>,
    pub description: Option<String>,
    pub transaction_date: Option<NaiveDate>,
    pub category_id: Option<i32>,
}

impl TransactionChangesetDB {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.transaction_type.is_none()
            && self.description.is_none()
            && self.transaction_date.is_none()
            && self.category_id.is_none()
    }
}

impl TryFrom<TransactionDB> for Transaction {
    type Error = Error;

    fn try_from(db: TransactionDB) -> Result<Self, Self::Error> {
        Ok(Self {
            transaction_id: db.transaction_id,
            amount: db.amount,
            transaction_type: db.transaction_type.parse()?,
            description: db.description,
            transaction_date: db.transaction_date,
            category_id: db.category_id,
            created_at: db.created_at,
        })
    }
}

impl From<NewTransaction> for NewTransactionDB {
    fn from(domain: NewTransaction) -> Self {
        Self {
            amount: domain.amount,
            transaction_type: domain.transaction_type.as_str().to_string(),
            description: domain.description,
            transaction_date: domain.transaction_date,
            category_id: domain.category_id,
        }
    }
}

impl From<TransactionUpdate> for TransactionChangesetDB {
    fn from(update: TransactionUpdate) -> Self {
        Self {
            amount: update.amount,
            transaction_type: update.transaction_type.map(|t| t.as_str().to_string()),
            description: update.description,
            transaction_date: update.transaction_date,
            category_id: update.category_id,
        }
    }
}
