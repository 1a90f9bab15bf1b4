use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use finboard_core::categories::{Category, CategoryRepositoryTrait, NewCategory};
use finboard_core::Result;

use super::model::{CategoryDB, NewCategoryDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::categories;

fn insert_category(conn: &mut SqliteConnection, new_category: NewCategory) -> Result<Category> {
    let row: NewCategoryDB = new_category.into();
    diesel::insert_into(categories::table)
        .values(&row)
        .returning(CategoryDB::as_returning())
        .get_result::<CategoryDB>(conn)
        .into_core()?
        .try_into()
}

pub struct CategoryRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CategoryRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CategoryRepository { pool, writer }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    fn list_categories(&self) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        categories::table
            .order((categories::category_type.asc(), categories::name.asc()))
            .select(CategoryDB::as_select())
            .load::<CategoryDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(Category::try_from)
            .collect()
    }

    fn get_category(&self, category_id: i32) -> Result<Option<Category>> {
        let mut conn = get_connection(&self.pool)?;
        categories::table
            .find(category_id)
            .select(CategoryDB::as_select())
            .first::<CategoryDB>(&mut conn)
            .optional()
            .into_core()?
            .map(Category::try_from)
            .transpose()
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        let mut conn = get_connection(&self.pool)?;
        categories::table
            .filter(categories::name.eq(name))
            .select(CategoryDB::as_select())
            .first::<CategoryDB>(&mut conn)
            .optional()
            .into_core()?
            .map(Category::try_from)
            .transpose()
    }

    fn count_categories(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        categories::table.count().get_result(&mut conn).into_core()
    }

    async fn create_category(&self, new_category: NewCategory) -> Result<Category> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| insert_category(conn, new_category))
            .await
    }

    async fn create_categories(&self, new_categories: Vec<NewCategory>) -> Result<Vec<Category>> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Vec<Category>> {
                new_categories
                    .into_iter()
                    .map(|new_category| insert_category(conn, new_category))
                    .collect()
            })
            .await
    }

    async fn delete_category(&self, category_id: i32) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(categories::table.find(category_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDb;
    use finboard_core::transactions::{NewTransaction, TransactionRepositoryTrait, TransactionType};
    use finboard_core::Error;

    #[tokio::test]
    async fn categories_are_ordered_by_type_then_name() {
        let db = TestDb::new();
        let repo = db.categories();
        repo.create_categories(vec![
            NewCategory::new("Rent", TransactionType::Expense),
            NewCategory::new("Salary", TransactionType::Income),
            NewCategory::new("Food", TransactionType::Expense),
        ])
        .await
        .unwrap();

        let names: Vec<_> = repo
            .list_categories()
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Food", "Rent", "Salary"]);
        assert_eq!(repo.count_categories().unwrap(), 3);
        assert!(repo.find_by_name("Rent").unwrap().is_some());
        assert!(repo.find_by_name("rent").unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_names_violate_the_unique_constraint() {
        let db = TestDb::new();
        let repo = db.categories();
        repo.create_category(NewCategory::new("Gift", TransactionType::Income))
            .await
            .unwrap();
        let err = repo
            .create_category(NewCategory::new("Gift", TransactionType::Expense))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn deleting_a_category_cascades_to_its_transactions() {
        let db = TestDb::new();
        let repo = db.categories();
        let food = repo
            .create_category(NewCategory::new("Food", TransactionType::Expense))
            .await
            .unwrap();
        let transactions = db.transactions();
        transactions
            .create_transaction(NewTransaction {
                amount: 12.0,
                transaction_type: TransactionType::Expense,
                description: None,
                transaction_date: chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                category_id: food.category_id,
            })
            .await
            .unwrap();

        assert_eq!(repo.delete_category(food.category_id).await.unwrap(), 1);
        assert_eq!(repo.delete_category(food.category_id).await.unwrap(), 0);
        let remaining = transactions
            .load_transactions(&Default::default())
            .unwrap();
        assert!(remaining.is_empty());
    }
}
