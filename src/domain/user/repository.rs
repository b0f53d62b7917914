//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{NewUser, User};
use crate::domain::DomainError;

/// Repository trait for user storage
///
/// Implementations must enforce username and email uniqueness; a violated
/// constraint surfaces as `DomainError::Conflict`.
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get a user by their id
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;

    /// Get a user by their username (for login)
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Insert a new user; the store assigns the id
    async fn insert(&self, new_user: NewUser) -> Result<User, DomainError>;

    /// Check if a username exists
    async fn username_exists(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_username(username).await?.is_some())
    }
}
