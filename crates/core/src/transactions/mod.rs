//! Transactions module - domain models, services, and traits.

mod transactions_model;
mod transactions_service;
mod transactions_traits;

pub use transactions_model::{
    NewTransaction, Transaction, TransactionFilter, TransactionQuery, TransactionType,
    TransactionUpdate,
};
pub use transactions_service::{validate_amount, TransactionService};
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
