//! Database models for budgets.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use finboard_core::budgets::{Budget, NewBudget};
use finboard_core::Error;

#[derive(Queryable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BudgetDB {
    pub budget_id: i32,
    pub category_id: i32,
    pub amount: f64,
    pub period: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
pub struct NewBudgetDB {
    pub category_id: i32,
    pub amount: f64,
    pub period: String,
}

impl TryFrom<BudgetDB> for Budget {
    type Error = Error;

    fn try_from(db: BudgetDB) -> Result<Self, Self::Error> {
        Ok(Self {
            budget_id: db.budget_id,
            category_id: db.category_id,
            amount: db.amount,
            period: db.period.parse()?,
            created_at: db.created_at,
        })
    }
}

impl From<NewBudget> for NewBudgetDB {
    fn from(domain: NewBudget) -> Self {
        Self {
            category_id: domain.category_id,
            amount: domain.amount,
            period: domain.period.as_str().to_string(),
        }
    }
}
