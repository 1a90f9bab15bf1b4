//! In-memory repositories for service tests.

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use std::sync::RwLock;

use crate::budgets::{Budget, BudgetRepositoryTrait, NewBudget};
use crate::categories::{Category, CategoryRepositoryTrait, NewCategory};
use crate::errors::{Error, Result};
use crate::transactions::{
    NewTransaction, Transaction, TransactionFilter, TransactionQuery, TransactionRepositoryTrait,
    TransactionUpdate,
};
use crate::users::{NewUser, PasswordHasherTrait, User, UserCredentials, UserRepositoryTrait};

#[derive(Default)]
struct Tables {
    categories: Vec<Category>,
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    users: Vec<UserCredentials>,
    next_id: i32,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// One store backing every repository trait, with cascading category deletes.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn add_category(&self, new_category: NewCategory) -> Category {
        let mut tables = self.tables.write().unwrap();
        let category = Category {
            category_id: tables.next_id(),
            name: new_category.name,
            category_type: new_category.category_type,
            created_at: now(),
        };
        tables.categories.push(category.clone());
        category
    }

    /// Inserts without any validation.
    pub fn add_transaction(&self, new_transaction: NewTransaction) -> Transaction {
        let mut tables = self.tables.write().unwrap();
        let transaction = Transaction {
            transaction_id: tables.next_id(),
            amount: new_transaction.amount,
            transaction_type: new_transaction.transaction_type,
            description: new_transaction.description,
            transaction_date: new_transaction.transaction_date,
            category_id: new_transaction.category_id,
            created_at: now(),
        };
        tables.transactions.push(transaction.clone());
        transaction
    }

    fn filtered(&self, filter: &TransactionFilter) -> Vec<Transaction> {
        let tables = self.tables.read().unwrap();
        let mut rows: Vec<Transaction> = tables
            .transactions
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.transaction_date
                .cmp(&a.transaction_date)
                .then(b.transaction_id.cmp(&a.transaction_id))
        });
        rows
    }
}

#[async_trait]
impl CategoryRepositoryTrait for InMemoryStore {
    fn list_categories(&self) -> Result<Vec<Category>> {
        let mut categories = self.tables.read().unwrap().categories.clone();
        categories.sort_by(|a, b| {
            a.category_type
                .as_str()
                .cmp(b.category_type.as_str())
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(categories)
    }

    fn get_category(&self, category_id: i32) -> Result<Option<Category>> {
        let tables = self.tables.read().unwrap();
        Ok(tables
            .categories
            .iter()
            .find(|c| c.category_id == category_id)
            .cloned())
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        let tables = self.tables.read().unwrap();
        Ok(tables.categories.iter().find(|c| c.name == name).cloned())
    }

    fn count_categories(&self) -> Result<i64> {
        Ok(self.tables.read().unwrap().categories.len() as i64)
    }

    async fn create_category(&self, new_category: NewCategory) -> Result<Category> {
        Ok(self.add_category(new_category))
    }

    async fn create_categories(&self, new_categories: Vec<NewCategory>) -> Result<Vec<Category>> {
        Ok(new_categories
            .into_iter()
            .map(|c| self.add_category(c))
            .collect())
    }

    async fn delete_category(&self, category_id: i32) -> Result<usize> {
        let mut tables = self.tables.write().unwrap();
        let before = tables.categories.len();
        tables.categories.retain(|c| c.category_id != category_id);
        tables.transactions.retain(|t| t.category_id != category_id);
        tables.budgets.retain(|b| b.category_id != category_id);
        Ok(before - tables.categories.len())
    }
}

#[async_trait]
impl TransactionRepositoryTrait for InMemoryStore {
    fn search_transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>> {
        Ok(self
            .filtered(&query.filter)
            .into_iter()
            .skip(query.skip as usize)
            .take(query.limit as usize)
            .collect())
    }

    fn load_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        Ok(self.filtered(filter))
    }

    fn get_transaction(&self, transaction_id: i32) -> Result<Option<Transaction>> {
        let tables = self.tables.read().unwrap();
        Ok(tables
            .transactions
            .iter()
            .find(|t| t.transaction_id == transaction_id)
            .cloned())
    }

    fn sum_amount(&self, filter: &TransactionFilter) -> Result<f64> {
        Ok(self.filtered(filter).iter().map(|t| t.amount).sum())
    }

    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        Ok(self.add_transaction(new_transaction))
    }

    async fn update_transaction(
        &self,
        transaction_id: i32,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        let mut tables = self.tables.write().unwrap();
        let row = tables
            .transactions
            .iter_mut()
            .find(|t| t.transaction_id == transaction_id)
            .ok_or_else(|| Error::not_found("Transaction", transaction_id))?;
        if let Some(amount) = update.amount {
            row.amount = amount;
        }
        if let Some(t) = update.transaction_type {
            row.transaction_type = t;
        }
        if update.description.is_some() {
            row.description = update.description;
        }
        if let Some(date) = update.transaction_date {
            row.transaction_date = date;
        }
        if let Some(category_id) = update.category_id {
            row.category_id = category_id;
        }
        Ok(row.clone())
    }

    async fn delete_transaction(&self, transaction_id: i32) -> Result<usize> {
        let mut tables = self.tables.write().unwrap();
        let before = tables.transactions.len();
        tables
            .transactions
            .retain(|t| t.transaction_id != transaction_id);
        Ok(before - tables.transactions.len())
    }
}

#[async_trait]
impl BudgetRepositoryTrait for InMemoryStore {
    fn list_budgets(&self) -> Result<Vec<Budget>> {
        Ok(self.tables.read().unwrap().budgets.clone())
    }

    fn get_budget(&self, budget_id: i32) -> Result<Option<Budget>> {
        let tables = self.tables.read().unwrap();
        Ok(tables
            .budgets
            .iter()
            .find(|b| b.budget_id == budget_id)
            .cloned())
    }

    async fn upsert_budget(&self, new_budget: NewBudget) -> Result<Budget> {
        let mut tables = self.tables.write().unwrap();
        if let Some(existing) = tables
            .budgets
            .iter_mut()
            .find(|b| b.category_id == new_budget.category_id)
        {
            existing.amount = new_budget.amount;
            existing.period = new_budget.period;
            return Ok(existing.clone());
        }
        let budget = Budget {
            budget_id: tables.next_id(),
            category_id: new_budget.category_id,
            amount: new_budget.amount,
            period: new_budget.period,
            created_at: now(),
        };
        tables.budgets.push(budget.clone());
        Ok(budget)
    }

    async fn delete_budget(&self, budget_id: i32) -> Result<usize> {
        let mut tables = self.tables.write().unwrap();
        let before = tables.budgets.len();
        tables.budgets.retain(|b| b.budget_id != budget_id);
        Ok(before - tables.budgets.len())
    }
}

#[async_trait]
impl UserRepositoryTrait for InMemoryStore {
    fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .find_credentials(username)?
            .map(|credentials| credentials.user))
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let tables = self.tables.read().unwrap();
        Ok(tables
            .users
            .iter()
            .find(|c| c.user.email == email)
            .map(|c| c.user.clone()))
    }

    fn find_credentials(&self, username: &str) -> Result<Option<UserCredentials>> {
        let tables = self.tables.read().unwrap();
        Ok(tables
            .users
            .iter()
            .find(|c| c.user.username == username)
            .cloned())
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        let mut tables = self.tables.write().unwrap();
        let user = User {
            user_id: tables.next_id(),
            username: new_user.username,
            email: new_user.email,
            full_name: new_user.full_name,
            is_active: true,
            created_at: now(),
        };
        tables.users.push(UserCredentials {
            user: user.clone(),
            password_hash: new_user.password_hash,
        });
        Ok(user)
    }
}

/// Reversible "hash" so tests do not pay for a real KDF.
pub struct PlainHasher;

impl PasswordHasherTrait for PlainHasher {
    fn hash_password(&self, password: &str) -> Result<String> {
        Ok(format!("plain${}", password))
    }

    fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool> {
        Ok(password_hash == format!("plain${}", password))
    }
}
