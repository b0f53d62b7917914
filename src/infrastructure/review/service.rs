//! Review service

use std::sync::Arc;

use crate::domain::review::{
    validate_content, validate_rating, NewReview, Review, ReviewRepository,
};
use crate::domain::user::User;
use crate::domain::DomainError;

/// Request for creating a new review
///
/// There is deliberately no author field: the author is always the
/// authenticated caller.
#[derive(Debug, Clone)]
pub struct CreateReviewRequest {
    pub content: String,
    pub rating: i32,
    pub hotel_id: i64,
}

/// Review service for creation and listing
#[derive(Debug)]
pub struct ReviewService<R: ReviewRepository> {
    repository: Arc<R>,
}

impl<R: ReviewRepository> ReviewService<R> {
    /// Create a new review service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Create a review authored by `author`
    ///
    /// `hotel_id` is stored as given; it is not checked against any hotel
    /// entity.
    pub async fn create(
        &self,
        request: CreateReviewRequest,
        author: &User,
    ) -> Result<Review, DomainError> {
        validate_content(&request.content).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_rating(request.rating).map_err(|e| DomainError::validation(e.to_string()))?;

        self.repository
            .insert(NewReview {
                content: request.content,
                rating: request.rating,
                author_id: author.id(),
                hotel_id: request.hotel_id,
            })
            .await
    }

    /// List reviews with offset/limit pagination
    pub async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Review>, DomainError> {
        self.repository.list(offset, limit).await
    }

    /// List all reviews for a hotel
    pub async fn list_by_hotel(&self, hotel_id: i64) -> Result<Vec<Review>, DomainError> {
        self.repository.list_by_hotel(hotel_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::review::repository::InMemoryReviewRepository;

    fn create_service() -> ReviewService<InMemoryReviewRepository> {
        ReviewService::new(Arc::new(InMemoryReviewRepository::new()))
    }

    fn author(id: i64) -> User {
        User::new(id, "alice", "alice@x.com", "hashed")
    }

    fn make_request(content: &str, rating: i32, hotel_id: i64) -> CreateReviewRequest {
        CreateReviewRequest {
            content: content.to_string(),
            rating,
            hotel_id,
        }
    }

    #[tokio::test]
    async fn test_create_review() {
        let service = create_service();

        let review = service
            .create(make_request("great stay", 5, 42), &author(1))
            .await
            .unwrap();

        assert_eq!(review.content(), "great stay");
        assert_eq!(review.rating(), 5);
        assert_eq!(review.author_id(), 1);
        assert_eq!(review.hotel_id(), 42);
    }

    #[tokio::test]
    async fn test_author_is_always_the_caller() {
        let service = create_service();

        // Whatever the request carries, the stored author is the
        // authenticated user passed in.
        let review = service
            .create(make_request("nice", 4, 7), &author(99))
            .await
            .unwrap();

        assert_eq!(review.author_id(), 99);
    }

    #[tokio::test]
    async fn test_create_review_empty_content() {
        let service = create_service();

        let result = service.create(make_request("", 4, 7), &author(1)).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_review_bad_rating() {
        let service = create_service();

        let result = service.create(make_request("ok", 0, 7), &author(1)).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));

        let result = service.create(make_request("ok", 6, 7), &author(1)).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_list_and_list_by_hotel() {
        let service = create_service();

        service
            .create(make_request("a", 5, 42), &author(1))
            .await
            .unwrap();
        service
            .create(make_request("b", 3, 7), &author(1))
            .await
            .unwrap();

        let all = service.list(0, 100).await.unwrap();
        assert_eq!(all.len(), 2);

        let for_hotel = service.list_by_hotel(42).await.unwrap();
        assert_eq!(for_hotel.len(), 1);
        assert_eq!(for_hotel[0].content(), "a");
    }
}
