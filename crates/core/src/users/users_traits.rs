use async_trait::async_trait;

use super::users_model::{NewUser, User, UserCredentials, UserRegistration};
use crate::errors::Result;

/// Password hashing is provided by the application layer.
pub trait PasswordHasherTrait: Send + Sync {
    fn hash_password(&self, password: &str) -> Result<String>;
    fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool>;
}

#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn find_by_username(&self, username: &str) -> Result<Option<User>>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    fn find_credentials(&self, username: &str) -> Result<Option<UserCredentials>>;
    async fn create_user(&self, new_user: NewUser) -> Result<User>;
}

#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, registration: UserRegistration) -> Result<User>;
    /// Returns the user when the credentials match an active account.
    fn authenticate(&self, username: &str, password: &str) -> Result<Option<User>>;
    fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
}
