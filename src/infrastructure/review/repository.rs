//! In-memory review repository implementation

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::review::{NewReview, Review, ReviewRepository};
use crate::domain::DomainError;

/// In-memory implementation of ReviewRepository
///
/// Reviews are kept in insertion order; ids are assigned sequentially
/// starting at 1.
#[derive(Debug)]
pub struct InMemoryReviewRepository {
    reviews: Arc<RwLock<Vec<Review>>>,
    next_id: Arc<RwLock<i64>>,
}

impl InMemoryReviewRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            reviews: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(RwLock::new(1)),
        }
    }
}

impl Default for InMemoryReviewRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn insert(&self, new_review: NewReview) -> Result<Review, DomainError> {
        let mut reviews = self.reviews.write().await;
        let mut next_id = self.next_id.write().await;

        let id = *next_id;
        *next_id += 1;

        let review = Review::new(
            id,
            new_review.content,
            new_review.rating,
            new_review.author_id,
            new_review.hotel_id,
        );
        reviews.push(review.clone());

        Ok(review)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Review>, DomainError> {
        let reviews = self.reviews.read().await;

        let offset = offset.max(0) as usize;
        let limit = limit.max(0) as usize;

        Ok(reviews.iter().skip(offset).take(limit).cloned().collect())
    }

    async fn list_by_hotel(&self, hotel_id: i64) -> Result<Vec<Review>, DomainError> {
        let reviews = self.reviews.read().await;

        Ok(reviews
            .iter()
            .filter(|r| r.hotel_id() == hotel_id)
            .cloned()
            .collect())
    }
}
