//! PostgreSQL review repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::review::{NewReview, Review, ReviewRepository};
use crate::domain::DomainError;

/// PostgreSQL implementation of ReviewRepository
#[derive(Debug, Clone)]
pub struct PostgresReviewRepository {
    pool: PgPool,
}

impl PostgresReviewRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PostgresReviewRepository {
    async fn insert(&self, new_review: NewReview) -> Result<Review, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO reviews (content, rating, author_id, hotel_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, content, rating, author_id, hotel_id, created_at
            "#,
        )
        .bind(&new_review.content)
        .bind(new_review.rating)
        .bind(new_review.author_id)
        .bind(new_review.hotel_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create review: {}", e)))?;

        Ok(row_to_review(&row))
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Review>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, content, rating, author_id, hotel_id, created_at
            FROM reviews
            ORDER BY id
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(offset.max(0))
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list reviews: {}", e)))?;

        Ok(rows.iter().map(row_to_review).collect())
    }

    async fn list_by_hotel(&self, hotel_id: i64) -> Result<Vec<Review>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, content, rating, author_id, hotel_id, created_at
            FROM reviews
            WHERE hotel_id = $1
            ORDER BY id
            "#,
        )
        .bind(hotel_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list reviews for hotel: {}", e)))?;

        Ok(rows.iter().map(row_to_review).collect())
    }
}

fn row_to_review(row: &sqlx::postgres::PgRow) -> Review {
    let id: i64 = row.get("id");
    let content: String = row.get("content");
    let rating: i32 = row.get("rating");
    let author_id: i64 = row.get("author_id");
    let hotel_id: i64 = row.get("hotel_id");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");

    Review::from_stored(id, content, rating, author_id, hotel_id, created_at)
}
