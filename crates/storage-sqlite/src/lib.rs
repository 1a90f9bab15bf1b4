//! SQLite storage implementation for Finboard.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `finboard-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for categories, transactions, budgets and users
//! - Database-specific model types (with Diesel derives)
//!
//! Reads go through the r2d2 pool. Writes are funnelled through a single
//! writer task ([`WriteHandle`]) so SQLite never sees concurrent writers.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod budgets;
pub mod categories;
pub mod transactions;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, ping, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

pub use budgets::BudgetRepository;
pub use categories::CategoryRepository;
pub use transactions::TransactionRepository;
pub use users::UserRepository;

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from finboard-core for convenience
pub use finboard_core::errors::{DatabaseError, Error, Result};
