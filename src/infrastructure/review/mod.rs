//! Review infrastructure module

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresReviewRepository;
pub use repository::InMemoryReviewRepository;
pub use service::{CreateReviewRequest, ReviewService};
