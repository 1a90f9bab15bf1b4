use log::debug;
use std::sync::Arc;

use super::transactions_model::{
    NewTransaction, Transaction, TransactionQuery, TransactionType, TransactionUpdate,
};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::categories::{Category, CategoryRepositoryTrait};
use crate::constants::{MAX_AMOUNT, MAX_DESCRIPTION_LEN, MAX_PAGE_LIMIT};
use crate::errors::{Error, Result, ValidationError};
use crate::utils::time_utils::validate_date_range;
use async_trait::async_trait;

/// Rejects zero, negative, non-finite and oversized amounts.
pub fn validate_amount(field: &str, amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::Validation(ValidationError::NonPositiveAmount {
            field: field.to_string(),
            value: amount,
        }));
    }
    if amount > MAX_AMOUNT {
        return Err(Error::Validation(ValidationError::AmountTooLarge {
            field: field.to_string(),
            value: amount,
            max: MAX_AMOUNT,
        }));
    }
    Ok(())
}

fn validate_description(description: Option<&str>) -> Result<()> {
    if let Some(text) = description {
        if text.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(Error::invalid_input(format!(
                "Description must be at most {} characters",
                MAX_DESCRIPTION_LEN
            )));
        }
    }
    Ok(())
}

fn ensure_type_matches(transaction_type: TransactionType, category: &Category) -> Result<()> {
    if transaction_type != category.category_type {
        return Err(Error::invalid_input(format!(
            "Transaction type {} does not match category '{}' of type {}",
            transaction_type, category.name, category.category_type
        )));
    }
    Ok(())
}

pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
    category_repository: Arc<dyn CategoryRepositoryTrait>,
}

impl TransactionService {
    pub fn new(
        repository: Arc<dyn TransactionRepositoryTrait>,
        category_repository: Arc<dyn CategoryRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            category_repository,
        }
    }

    fn require_category(&self, category_id: i32) -> Result<Category> {
        self.category_repository
            .get_category(category_id)?
            .ok_or_else(|| Error::not_found("Category", category_id))
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    fn get_transactions(&self, query: TransactionQuery) -> Result<Vec<Transaction>> {
        if query.skip < 0 {
            return Err(Error::invalid_input("skip must be zero or greater"));
        }
        if query.limit < 1 || query.limit > MAX_PAGE_LIMIT {
            return Err(Error::invalid_input(format!(
                "limit must be between 1 and {}",
                MAX_PAGE_LIMIT
            )));
        }
        validate_date_range(query.filter.start_date, query.filter.end_date)?;
        self.repository.search_transactions(&query)
    }

    fn get_transaction(&self, transaction_id: i32) -> Result<Transaction> {
        self.repository
            .get_transaction(transaction_id)?
            .ok_or_else(|| Error::not_found("Transaction", transaction_id))
    }

    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        validate_amount("amount", new_transaction.amount)?;
        validate_description(new_transaction.description.as_deref())?;
        let category = self.require_category(new_transaction.category_id)?;
        ensure_type_matches(new_transaction.transaction_type, &category)?;

        debug!(
            "Creating {} transaction of {} in category {}",
            new_transaction.transaction_type, new_transaction.amount, category.name
        );
        self.repository.create_transaction(new_transaction).await
    }

    async fn update_transaction(
        &self,
        transaction_id: i32,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        if let Some(amount) = update.amount {
            validate_amount("amount", amount)?;
        }
        validate_description(update.description.as_deref())?;

        let existing = self.get_transaction(transaction_id)?;
        let category_id = update.category_id.unwrap_or(existing.category_id);
        let category = self.require_category(category_id)?;
        let transaction_type = update
            .transaction_type
            .unwrap_or(existing.transaction_type);
        ensure_type_matches(transaction_type, &category)?;

        self.repository
            .update_transaction(transaction_id, update)
            .await
    }

    async fn delete_transaction(&self, transaction_id: i32) -> Result<()> {
        let deleted = self.repository.delete_transaction(transaction_id).await?;
        if deleted == 0 {
            return Err(Error::not_found("Transaction", transaction_id));
        }
        Ok(())
    }
}
