//! Review repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{NewReview, Review};
use crate::domain::DomainError;

/// Repository trait for review storage
#[async_trait]
pub trait ReviewRepository: Send + Sync + Debug {
    /// Insert a new review; the store assigns the id
    async fn insert(&self, new_review: NewReview) -> Result<Review, DomainError>;

    /// List reviews ordered by id, skipping `offset` rows and returning at
    /// most `limit`
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Review>, DomainError>;

    /// List all reviews for the given hotel, ordered by id
    async fn list_by_hotel(&self, hotel_id: i64) -> Result<Vec<Review>, DomainError>;
}
