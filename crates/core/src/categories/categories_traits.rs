use async_trait::async_trait;

use super::categories_model::{Category, NewCategory};
use crate::errors::Result;

/// Persistence contract for categories.
#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    /// All categories ordered by type, then name.
    fn list_categories(&self) -> Result<Vec<Category>>;
    fn get_category(&self, category_id: i32) -> Result<Option<Category>>;
    fn find_by_name(&self, name: &str) -> Result<Option<Category>>;
    fn count_categories(&self) -> Result<i64>;
    async fn create_category(&self, new_category: NewCategory) -> Result<Category>;
    /// Inserts all rows in a single write transaction.
    async fn create_categories(&self, new_categories: Vec<NewCategory>) -> Result<Vec<Category>>;
    /// Returns the number of deleted rows. Transactions and budgets of the
    /// category are removed with it.
    async fn delete_category(&self, category_id: i32) -> Result<usize>;
}

#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    fn get_categories(&self) -> Result<Vec<Category>>;
    fn get_category(&self, category_id: i32) -> Result<Category>;
    async fn create_category(&self, new_category: NewCategory) -> Result<Category>;
    async fn delete_category(&self, category_id: i32) -> Result<()>;
    /// Seeds the default set when no category exists yet. Returns what was created.
    async fn ensure_default_categories(&self) -> Result<Vec<Category>>;
}
