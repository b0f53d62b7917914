//! Application state for shared services

use std::sync::Arc;

use crate::domain::review::Review;
use crate::domain::user::{User, UserRepository};
use crate::domain::{DomainError, ReviewRepository};
use crate::infrastructure::auth::{IdentityResolver, TokenService};
use crate::infrastructure::review::{CreateReviewRequest, ReviewService};
use crate::infrastructure::user::{PasswordHasher, RegisterUserRequest, UserService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub review_service: Arc<dyn ReviewServiceTrait>,
    pub identity: Arc<dyn IdentityResolverTrait>,
    pub token_service: Arc<dyn TokenService>,
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, request: RegisterUserRequest) -> Result<User, DomainError>;
    async fn authenticate(&self, username: &str, password: &str) -> Result<User, DomainError>;
    async fn get(&self, id: i64) -> Result<Option<User>, DomainError>;
}

/// Trait for review service operations
#[async_trait::async_trait]
pub trait ReviewServiceTrait: Send + Sync {
    async fn create(
        &self,
        request: CreateReviewRequest,
        author: &User,
    ) -> Result<Review, DomainError>;
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Review>, DomainError>;
    async fn list_by_hotel(&self, hotel_id: i64) -> Result<Vec<Review>, DomainError>;
}

/// Trait for resolving bearer tokens into authenticated users
#[async_trait::async_trait]
pub trait IdentityResolverTrait: Send + Sync {
    async fn resolve(&self, token: &str) -> Result<User, DomainError>;
}

// Implement traits for the actual services

#[async_trait::async_trait]
impl<R: UserRepository + 'static, H: PasswordHasher + 'static> UserServiceTrait
    for UserService<R, H>
{
    async fn register(&self, request: RegisterUserRequest) -> Result<User, DomainError> {
        UserService::register(self, request).await
    }

    async fn authenticate(&self, username: &str, password: &str) -> Result<User, DomainError> {
        UserService::authenticate(self, username, password).await
    }

    async fn get(&self, id: i64) -> Result<Option<User>, DomainError> {
        UserService::get(self, id).await
    }
}

#[async_trait::async_trait]
impl<R: ReviewRepository + 'static> ReviewServiceTrait for ReviewService<R> {
    async fn create(
        &self,
        request: CreateReviewRequest,
        author: &User,
    ) -> Result<Review, DomainError> {
        ReviewService::create(self, request, author).await
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Review>, DomainError> {
        ReviewService::list(self, offset, limit).await
    }

    async fn list_by_hotel(&self, hotel_id: i64) -> Result<Vec<Review>, DomainError> {
        ReviewService::list_by_hotel(self, hotel_id).await
    }
}

#[async_trait::async_trait]
impl<R: UserRepository + 'static> IdentityResolverTrait for IdentityResolver<R> {
    async fn resolve(&self, token: &str) -> Result<User, DomainError> {
        IdentityResolver::resolve(self, token).await
    }
}

impl AppState {
    /// Create new application state with provided services
    pub fn new(
        user_service: Arc<dyn UserServiceTrait>,
        review_service: Arc<dyn ReviewServiceTrait>,
        identity: Arc<dyn IdentityResolverTrait>,
        token_service: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            user_service,
            review_service,
            identity,
            token_service,
        }
    }
}
