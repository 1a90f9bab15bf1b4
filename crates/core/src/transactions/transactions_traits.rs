use async_trait::async_trait;

use super::transactions_model::{
    NewTransaction, Transaction, TransactionFilter, TransactionQuery, TransactionUpdate,
};
use crate::errors::Result;

/// Persistence contract for transactions.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Filtered page, newest transaction date first.
    fn search_transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>>;

    /// Every transaction matching the filter, without paging.
    fn load_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>>;

    fn get_transaction(&self, transaction_id: i32) -> Result<Option<Transaction>>;

    /// Sum of amounts over the filtered rows (0 when none match).
    fn sum_amount(&self, filter: &TransactionFilter) -> Result<f64>;

    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;

    async fn update_transaction(
        &self,
        transaction_id: i32,
        update: TransactionUpdate,
    ) -> Result<Transaction>;

    /// Returns the number of deleted rows.
    async fn delete_transaction(&self, transaction_id: i32) -> Result<usize>;
}

#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    fn get_transactions(&self, query: TransactionQuery) -> Result<Vec<Transaction>>;
    fn get_transaction(&self, transaction_id: i32) -> Result<Transaction>;
    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;
    async fn update_transaction(
        &self,
        transaction_id: i32,
        update: TransactionUpdate,
    ) -> Result<Transaction>;
    async fn delete_transaction(&self, transaction_id: i32) -> Result<()>;
}
