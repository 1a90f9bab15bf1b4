use log::{debug, info};
use std::sync::Arc;

use super::users_model::{NewUser, User, UserRegistration};
use super::users_traits::{PasswordHasherTrait, UserRepositoryTrait, UserServiceTrait};
use crate::errors::{Error, Result};
use async_trait::async_trait;

const MIN_USERNAME_LEN: usize = 3;
const MAX_USERNAME_LEN: usize = 50;
const MAX_EMAIL_LEN: usize = 100;
const MAX_FULL_NAME_LEN: usize = 100;
const MIN_PASSWORD_LEN: usize = 6;

fn validate_registration(registration: &UserRegistration) -> Result<()> {
    let username_len = registration.username.chars().count();
    if !(MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&username_len) {
        return Err(Error::invalid_input(format!(
            "Username must be between {} and {} characters",
            MIN_USERNAME_LEN, MAX_USERNAME_LEN
        )));
    }
    let email = registration.email.trim();
    if !email.contains('@') || email.chars().count() > MAX_EMAIL_LEN {
        return Err(Error::invalid_input("Email address is not valid"));
    }
    if registration.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Error::invalid_input(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    if let Some(full_name) = &registration.full_name {
        if full_name.chars().count() > MAX_FULL_NAME_LEN {
            return Err(Error::invalid_input(format!(
                "Full name must be at most {} characters",
                MAX_FULL_NAME_LEN
            )));
        }
    }
    Ok(())
}

pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
    hasher: Arc<dyn PasswordHasherTrait>,
}

impl UserService {
    pub fn new(
        repository: Arc<dyn UserRepositoryTrait>,
        hasher: Arc<dyn PasswordHasherTrait>,
    ) -> Self {
        Self { repository, hasher }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, registration: UserRegistration) -> Result<User> {
        validate_registration(&registration)?;
        let username = registration.username.trim().to_string();
        let email = registration.email.trim().to_string();

        if self.repository.find_by_username(&username)?.is_some() {
            return Err(Error::ConstraintViolation(
                "Username already registered".to_string(),
            ));
        }
        if self.repository.find_by_email(&email)?.is_some() {
            return Err(Error::ConstraintViolation(
                "Email already registered".to_string(),
            ));
        }

        let password_hash = self.hasher.hash_password(&registration.password)?;
        let user = self
            .repository
            .create_user(NewUser {
                username,
                email,
                password_hash,
                full_name: registration.full_name,
            })
            .await?;
        info!("Registered user '{}'", user.username);
        Ok(user)
    }

    fn authenticate(&self, username: &str, password: &str) -> Result<Option<User>> {
        let Some(credentials) = self.repository.find_credentials(username)? else {
            debug!("Login attempt for unknown user '{}'", username);
            return Ok(None);
        };
        if !credentials.user.is_active {
            return Ok(None);
        }
        if !self
            .hasher
            .verify_password(password, &credentials.password_hash)?
        {
            return Ok(None);
        }
        Ok(Some(credentials.user))
    }

    fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.repository.find_by_username(username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{InMemoryStore, PlainHasher};

    fn service() -> UserService {
        UserService::new(Arc::new(InMemoryStore::default()), Arc::new(PlainHasher))
    }

    fn registration(username: &str, email: &str) -> UserRegistration {
        UserRegistration {
            username: username.to_string(),
            email: email.to_string(),
            password: "secret123".to_string(),
            full_name: Some("Test User".to_string()),
        }
    }

    #[tokio::test]
    async fn register_then_authenticate() {
        let service = service();
        let user = service
            .register(registration("alice", "alice@example.com"))
            .await
            .unwrap();
        assert!(user.is_active);
        assert_eq!(user.full_name.as_deref(), Some("Test User"));

        let ok = service.authenticate("alice", "secret123").unwrap();
        assert_eq!(ok.map(|u| u.user_id), Some(user.user_id));
        assert!(service.authenticate("alice", "wrong").unwrap().is_none());
        assert!(service.authenticate("bob", "secret123").unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_or_email_conflicts() {
        let service = service();
        service
            .register(registration("alice", "alice@example.com"))
            .await
            .unwrap();

        let same_name = service
            .register(registration("alice", "other@example.com"))
            .await;
        assert!(matches!(same_name, Err(Error::ConstraintViolation(_))));

        let same_email = service
            .register(registration("alicia", "alice@example.com"))
            .await;
        assert!(matches!(same_email, Err(Error::ConstraintViolation(_))));
    }

    #[tokio::test]
    async fn registration_fields_are_validated() {
        let service = service();
        assert!(service
            .register(registration("al", "al@example.com"))
            .await
            .is_err());
        assert!(service
            .register(registration("alice", "not-an-email"))
            .await
            .is_err());

        let mut short_password = registration("alice", "alice@example.com");
        short_password.password = "12345".to_string();
        assert!(matches!(
            service.register(short_password).await,
            Err(Error::Validation(_))
        ));
    }
}
