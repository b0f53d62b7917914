//! User service for registration and authentication

use std::sync::Arc;

use crate::domain::user::{
    validate_email, validate_password, validate_username, NewUser, User, UserRepository,
};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Request for registering a new user
#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// User service for registration and login
#[derive(Debug)]
pub struct UserService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: UserRepository, H: PasswordHasher> UserService<R, H> {
    /// Create a new user service
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Register a new user
    ///
    /// The duplicate-username pre-check is a fast path only; the store's
    /// uniqueness constraint remains the authoritative guard and its
    /// violation maps to the same conflict error.
    pub async fn register(&self, request: RegisterUserRequest) -> Result<User, DomainError> {
        validate_username(&request.username).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_email(&request.email).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&request.password).map_err(|e| DomainError::validation(e.to_string()))?;

        if self.repository.username_exists(&request.username).await? {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                request.username
            )));
        }

        let password_hash = self.hasher.hash(&request.password)?;

        self.repository
            .insert(NewUser {
                username: request.username,
                email: request.email,
                password_hash,
            })
            .await
    }

    /// Authenticate a user with username and password
    ///
    /// An unknown username and a wrong password fail with the same error, so
    /// the response never reveals whether a username is registered.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, DomainError> {
        let user = match self.repository.find_by_username(username).await? {
            Some(u) => u,
            None => return Err(DomainError::AuthenticationFailed),
        };

        if !self.hasher.verify(password, user.password_hash()) {
            return Err(DomainError::AuthenticationFailed);
        }

        Ok(user)
    }

    /// Get a user by id
    pub async fn get(&self, id: i64) -> Result<Option<User>, DomainError> {
        self.repository.find_by_id(id).await
    }
}
