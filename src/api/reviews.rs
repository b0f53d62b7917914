//! Review creation and listing endpoints

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::RequireUser;
use crate::api::state::{AppState, ReviewServiceTrait};
use crate::api::types::{ApiError, Json};
use crate::domain::review::Review;
use crate::infrastructure::review::CreateReviewRequest;

/// Create the reviews router
pub fn create_reviews_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_review))
        .route("/", get(list_reviews))
        .route("/hotel/{hotel_id}", get(list_reviews_by_hotel))
}

/// Review creation request
///
/// There is no author field: the author is always taken from the bearer
/// token, so a client cannot write a review as someone else.
#[derive(Debug, Deserialize)]
pub struct CreateReviewBody {
    pub content: String,
    pub rating: i32,
    pub hotel_id: i64,
}

/// Review response
#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub id: i64,
    pub content: String,
    pub rating: i32,
    pub author_id: i64,
    pub hotel_id: i64,
    pub created_at: String,
}

impl ReviewResponse {
    fn from_review(review: &Review) -> Self {
        Self {
            id: review.id(),
            content: review.content().to_string(),
            rating: review.rating(),
            author_id: review.author_id(),
            hotel_id: review.hotel_id(),
            created_at: review.created_at().to_rfc3339(),
        }
    }
}

/// Pagination parameters for listing reviews
#[derive(Debug, Deserialize)]
pub struct ListReviewsQuery {
    #[serde(default)]
    pub offset: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

/// Create a review as the authenticated user
///
/// POST /reviews
pub async fn create_review(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(body): Json<CreateReviewBody>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let review = state
        .review_service
        .create(
            CreateReviewRequest {
                content: body.content,
                rating: body.rating,
                hotel_id: body.hotel_id,
            },
            &user,
        )
        .await?;

    Ok(Json(ReviewResponse::from_review(&review)))
}

/// List reviews with pagination
///
/// GET /reviews?offset=0&limit=100
pub async fn list_reviews(
    State(state): State<AppState>,
    Query(query): Query<ListReviewsQuery>,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    let reviews = state.review_service.list(query.offset, query.limit).await?;

    Ok(Json(reviews.iter().map(ReviewResponse::from_review).collect()))
}

/// List all reviews for a hotel
///
/// GET /reviews/hotel/{hotel_id}
///
/// A hotel with no reviews is a 404.
pub async fn list_reviews_by_hotel(
    State(state): State<AppState>,
    Path(hotel_id): Path<i64>,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    let reviews = state.review_service.list_by_hotel(hotel_id).await?;

    if reviews.is_empty() {
        return Err(ApiError::not_found(
            "No reviews found for the specified hotel",
        ));
    }

    Ok(Json(reviews.iter().map(ReviewResponse::from_review).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pagination() {
        let query: ListReviewsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.offset, 0);
        assert_eq!(query.limit, 100);
    }

    #[test]
    fn test_review_response_shape() {
        let review = Review::new(1, "great stay", 5, 7, 42);
        let response = ReviewResponse::from_review(&review);

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"author_id\":7"));
        assert!(json.contains("\"hotel_id\":42"));
        assert!(json.contains("\"rating\":5"));
    }

    #[test]
    fn test_create_body_has_no_author_field() {
        // An author_id in the body is ignored: the parsed struct simply has
        // no field to carry it
        let body: CreateReviewBody = serde_json::from_str(
            r#"{"content":"x","rating":5,"hotel_id":1,"author_id":123}"#,
        )
        .unwrap();
        assert_eq!(body.hotel_id, 1);
    }
}
