//! Finboard Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic for Finboard: categories,
//! transactions, budgets, analytics and users. It is database-agnostic and
//! defines repository traits that are implemented by the `storage-sqlite`
//! crate.

pub mod analytics;
pub mod budgets;
pub mod categories;
pub mod constants;
pub mod errors;
pub mod transactions;
pub mod users;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
