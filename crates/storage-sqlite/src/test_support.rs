//! Temporary databases for repository tests.

use std::sync::Arc;
use tempfile::TempDir;

use crate::db::{create_pool, init, run_migrations, spawn_writer, DbPool, WriteHandle};
use crate::{BudgetRepository, CategoryRepository, TransactionRepository, UserRepository};

pub struct TestDb {
    pub pool: Arc<DbPool>,
    pub writer: WriteHandle,
    // Keeps the database file alive for the test
    _dir: TempDir,
}

impl TestDb {
    /// Must be called inside a Tokio runtime (the writer is a task).
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("test.db").to_string_lossy().to_string();
        let path = init(&path).expect("init database");
        let pool = create_pool(&path).expect("create pool");
        run_migrations(&pool).expect("run migrations");
        let writer = spawn_writer((*pool).clone());
        TestDb {
            pool,
            writer,
            _dir: dir,
        }
    }

    pub fn categories(&self) -> CategoryRepository {
        CategoryRepository::new(self.pool.clone(), self.writer.clone())
    }

    pub fn transactions(&self) -> TransactionRepository {
        TransactionRepository::new(self.pool.clone(), self.writer.clone())
    }

    pub fn budgets(&self) -> BudgetRepository {
        BudgetRepository::new(self.pool.clone(), self.writer.clone())
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.pool.clone(), self.writer.clone())
    }
}
