//! Review entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A review left by a user for a hotel
///
/// `hotel_id` is an opaque external identifier; it is not checked against
/// any hotel entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Store-generated identifier
    id: i64,
    /// Review text
    content: String,
    /// Rating from 1 to 5
    rating: i32,
    /// Id of the authoring user; always derived from the authenticated
    /// identity, never from client input
    author_id: i64,
    /// External hotel identifier
    hotel_id: i64,
    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl Review {
    /// Create a review with a known id, as assigned by the store
    pub fn new(id: i64, content: impl Into<String>, rating: i32, author_id: i64, hotel_id: i64) -> Self {
        Self {
            id,
            content: content.into(),
            rating,
            author_id,
            hotel_id,
            created_at: Utc::now(),
        }
    }

    /// Restore a review from stored fields, preserving its original timestamp
    pub fn from_stored(
        id: i64,
        content: impl Into<String>,
        rating: i32,
        author_id: i64,
        hotel_id: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            content: content.into(),
            rating,
            author_id,
            hotel_id,
            created_at,
        }
    }

    // Getters

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn rating(&self) -> i32 {
        self.rating
    }

    pub fn author_id(&self) -> i64 {
        self.author_id
    }

    pub fn hotel_id(&self) -> i64 {
        self.hotel_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Field set for inserting a new review; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewReview {
    pub content: String,
    pub rating: i32,
    pub author_id: i64,
    pub hotel_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_creation() {
        let review = Review::new(1, "great stay", 5, 7, 42);

        assert_eq!(review.id(), 1);
        assert_eq!(review.content(), "great stay");
        assert_eq!(review.rating(), 5);
        assert_eq!(review.author_id(), 7);
        assert_eq!(review.hotel_id(), 42);
    }

    #[test]
    fn test_review_serialization() {
        let review = Review::new(1, "great stay", 5, 7, 42);

        let json = serde_json::to_string(&review).unwrap();
        assert!(json.contains("\"content\":\"great stay\""));
        assert!(json.contains("\"author_id\":7"));
        assert!(json.contains("\"hotel_id\":42"));
    }
}
