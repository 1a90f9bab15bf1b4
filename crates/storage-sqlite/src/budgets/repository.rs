use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;

use finboard_core::budgets::{Budget, BudgetRepositoryTrait, NewBudget};
use finboard_core::Result;

use super::model::{BudgetDB, NewBudgetDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::budgets;

pub struct BudgetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        BudgetRepository { pool, writer }
    }
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    fn list_budgets(&self) -> Result<Vec<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        budgets::table
            .order(budgets::budget_id.asc())
            .select(BudgetDB::as_select())
            .load::<BudgetDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(Budget::try_from)
            .collect()
    }

    fn get_budget(&self, budget_id: i32) -> Result<Option<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        budgets::table
            .find(budget_id)
            .select(BudgetDB::as_select())
            .first::<BudgetDB>(&mut conn)
            .optional()
            .into_core()?
            .map(Budget::try_from)
            .transpose()
    }

    async fn upsert_budget(&self, new_budget: NewBudget) -> Result<Budget> {
        let row: NewBudgetDB = new_budget.into();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let existing = budgets::table
                    .filter(budgets::category_id.eq(row.category_id))
                    .select(budgets::budget_id)
                    .first::<i32>(conn)
                    .optional()
                    .into_core()?;

                let saved = match existing {
                    Some(budget_id) => {
                        debug!("Updating budget {} for category {}", budget_id, row.category_id);
                        diesel::update(budgets::table.find(budget_id))
                            .set((
                                budgets::amount.eq(row.amount),
                                budgets::period.eq(&row.period),
                            ))
                            .returning(BudgetDB::as_returning())
                            .get_result::<BudgetDB>(conn)
                    }
                    None => diesel::insert_into(budgets::table)
                        .values(&row)
                        .returning(BudgetDB::as_returning())
                        .get_result::<BudgetDB>(conn),
                };
                saved.into_core()?.try_into()
            })
            .await
    }

    async fn delete_budget(&self, budget_id: i32) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(budgets::table.find(budget_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}
