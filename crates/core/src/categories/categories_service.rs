use log::{debug, info};
use std::sync::Arc;

use super::categories_model::{Category, NewCategory};
use super::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::constants::{
    DEFAULT_EXPENSE_CATEGORIES, DEFAULT_INCOME_CATEGORIES, MAX_CATEGORY_NAME_LEN,
};
use crate::errors::{Error, Result, ValidationError};
use crate::transactions::TransactionType;
use async_trait::async_trait;

/// The category set created on first start.
pub fn default_categories() -> Vec<NewCategory> {
    DEFAULT_INCOME_CATEGORIES
        .iter()
        .map(|name| NewCategory::new(*name, TransactionType::Income))
        .chain(
            DEFAULT_EXPENSE_CATEGORIES
                .iter()
                .map(|name| NewCategory::new(*name, TransactionType::Expense)),
        )
        .collect()
}

pub struct CategoryService {
    repository: Arc<dyn CategoryRepositoryTrait>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn normalize(new_category: NewCategory) -> Result<NewCategory> {
        let name = new_category.name.trim().to_string();
        if name.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        if name.chars().count() > MAX_CATEGORY_NAME_LEN {
            return Err(Error::invalid_input(format!(
                "Category name must be at most {} characters",
                MAX_CATEGORY_NAME_LEN
            )));
        }
        Ok(NewCategory {
            name,
            category_type: new_category.category_type,
        })
    }
}

#[async_trait]
impl CategoryServiceTrait for CategoryService {
    fn get_categories(&self) -> Result<Vec<Category>> {
        self.repository.list_categories()
    }

    fn get_category(&self, category_id: i32) -> Result<Category> {
        self.repository
            .get_category(category_id)?
            .ok_or_else(|| Error::not_found("Category", category_id))
    }

    async fn create_category(&self, new_category: NewCategory) -> Result<Category> {
        let new_category = Self::normalize(new_category)?;
        if self.repository.find_by_name(&new_category.name)?.is_some() {
            return Err(Error::ConstraintViolation(format!(
                "Category '{}' already exists",
                new_category.name
            )));
        }
        debug!(
            "Creating {} category '{}'",
            new_category.category_type, new_category.name
        );
        self.repository.create_category(new_category).await
    }

    async fn delete_category(&self, category_id: i32) -> Result<()> {
        let deleted = self.repository.delete_category(category_id).await?;
        if deleted == 0 {
            return Err(Error::not_found("Category", category_id));
        }
        Ok(())
    }

    async fn ensure_default_categories(&self) -> Result<Vec<Category>> {
        if self.repository.count_categories()? > 0 {
            return Ok(Vec::new());
        }
        let created = self
            .repository
            .create_categories(default_categories())
            .await?;
        info!("Created {} default categories", created.len());
        Ok(created)
    }
}
