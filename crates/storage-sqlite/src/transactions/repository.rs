use async_trait::async_trait;
use diesel::dsl::sum;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use std::sync::Arc;

use finboard_core::transactions::{
    NewTransaction, Transaction, TransactionFilter, TransactionQuery, TransactionRepositoryTrait,
    TransactionUpdate,
};
use finboard_core::{Error, Result};

use super::model::{NewTransactionDB, TransactionChangesetDB, TransactionDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::transactions;

/// Narrows any boxed transactions query by the set filter fields.
fn apply_filter<'a, ST>(
    mut query: transactions::BoxedQuery<'a, Sqlite, ST>,
    filter: &TransactionFilter,
) -> transactions::BoxedQuery<'a, Sqlite, ST> {
    if let Some(start) = filter.start_date {
        query = query.filter(transactions::transaction_date.ge(start));
    }
    if let Some(end) = filter.end_date {
        query = query.filter(transactions::transaction_date.le(end));
    }
    if let Some(category) = filter.category_id {
        query = query.filter(transactions::category_id.eq(category));
    }
    if let Some(kind) = filter.transaction_type {
        query = query.filter(transactions::transaction_type.eq(kind.as_str()));
    }
    query
}

fn to_domain(rows: Vec<TransactionDB>) -> Result<Vec<Transaction>> {
    rows.into_iter().map(Transaction::try_from).collect()
}

pub struct TransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        TransactionRepository { pool, writer }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    fn search_transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let selected = transactions::table
            .select(TransactionDB::as_select())
            .into_boxed();
        let rows = apply_filter(selected, &query.filter)
            .order((
                transactions::transaction_date.desc(),
                transactions::transaction_id.desc(),
            ))
            .offset(query.skip)
            .limit(query.limit)
            .load::<TransactionDB>(&mut conn)
            .into_core()?;
        to_domain(rows)
    }

    fn load_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let selected = transactions::table
            .select(TransactionDB::as_select())
            .into_boxed();
        let rows = apply_filter(selected, filter)
            .order((
                transactions::transaction_date.asc(),
                transactions::transaction_id.asc(),
            ))
            .load::<TransactionDB>(&mut conn)
            .into_core()?;
        to_domain(rows)
    }

    fn get_transaction(&self, transaction_id: i32) -> Result<Option<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        transactions::table
            .find(transaction_id)
            .select(TransactionDB::as_select())
            .first::<TransactionDB>(&mut conn)
            .optional()
            .into_core()?
            .map(Transaction::try_from)
            .transpose()
    }

    fn sum_amount(&self, filter: &TransactionFilter) -> Result<f64> {
        let mut conn = get_connection(&self.pool)?;
        let total: Option<f64> = apply_filter(
            transactions::table
                .select(sum(transactions::amount))
                .into_boxed(),
            filter,
        )
        .first(&mut conn)
        .into_core()?;
        Ok(total.unwrap_or(0.0))
    }

    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        let row: NewTransactionDB = new_transaction.into();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                diesel::insert_into(transactions::table)
                    .values(&row)
                    .returning(TransactionDB::as_returning())
                    .get_result::<TransactionDB>(conn)
                    .into_core()?
                    .try_into()
            })
            .await
    }

    async fn update_transaction(
        &self,
        transaction_id: i32,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        let changes: TransactionChangesetDB = update.into();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                if !changes.is_empty() {
                    diesel::update(transactions::table.find(transaction_id))
                        .set(&changes)
                        .execute(conn)
                        .into_core()?;
                }
                transactions::table
                    .find(transaction_id)
                    .select(TransactionDB::as_select())
                    .first::<TransactionDB>(conn)
                    .optional()
                    .into_core()?
                    .ok_or_else(|| Error::not_found("Transaction", transaction_id))?
                    .try_into()
            })
            .await
    }

    async fn delete_transaction(&self, transaction_id: i32) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(transactions::table.find(transaction_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}
