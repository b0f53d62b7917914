//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{NewUser, User, UserRepository};
use crate::domain::DomainError;

/// In-memory implementation of UserRepository
///
/// Ids are assigned sequentially starting at 1, mirroring a serial column.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<i64, User>>>,
    /// Index for username -> user id lookup
    username_index: Arc<RwLock<HashMap<String, i64>>>,
    next_id: Arc<RwLock<i64>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            username_index: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(RwLock::new(1)),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        // Resolve the id first and release the index before touching the
        // users map; insert acquires the locks in the opposite order.
        let user_id = {
            let username_index = self.username_index.read().await;
            username_index.get(username).copied()
        };

        match user_id {
            Some(id) => {
                let users = self.users.read().await;
                Ok(users.get(&id).cloned())
            }
            None => Ok(None),
        }
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let mut username_index = self.username_index.write().await;

        if username_index.contains_key(&new_user.username) {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                new_user.username
            )));
        }

        if users.values().any(|u| u.email() == new_user.email) {
            return Err(DomainError::conflict(format!(
                "Email '{}' already exists",
                new_user.email
            )));
        }

        let mut next_id = self.next_id.write().await;
        let id = *next_id;
        *next_id += 1;

        let user = User::new(id, new_user.username, new_user.email, new_user.password_hash);
        username_index.insert(user.username().to_string(), id);
        users.insert(id, user.clone());

        Ok(user)
    }
}
