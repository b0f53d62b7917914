//! Hotel Reviews API
//!
//! A small HTTP service with:
//! - User registration and password login issuing JWT bearer tokens
//! - Request-scoped identity resolution from bearer tokens
//! - Review records tied to a user and a hotel identifier

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::auth::{IdentityResolver, JwtConfig, JwtService, TokenService};
use infrastructure::review::{InMemoryReviewRepository, PostgresReviewRepository, ReviewService};
use infrastructure::storage::run_schema_migrations;
use infrastructure::user::{
    Argon2Hasher, InMemoryUserRepository, PostgresUserRepository, UserService,
};
use rand::Rng;
use tracing::info;

/// Create the application state with all services initialized
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let token_service = create_token_service(config)?;
    let hasher = Arc::new(Argon2Hasher::new());

    let use_postgres = config.storage.backend.eq_ignore_ascii_case("postgres");
    info!(backend = %config.storage.backend, "Storage backend selected");

    if use_postgres {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        info!("Connecting to PostgreSQL...");
        let pool = sqlx::PgPool::connect(&database_url)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;
        info!("PostgreSQL connection established");

        run_schema_migrations(&pool).await?;

        let user_repository = Arc::new(PostgresUserRepository::new(pool.clone()));
        let review_repository = Arc::new(PostgresReviewRepository::new(pool));

        let identity = Arc::new(IdentityResolver::new(
            token_service.clone(),
            user_repository.clone(),
        ));

        Ok(AppState::new(
            Arc::new(UserService::new(user_repository, hasher)),
            Arc::new(ReviewService::new(review_repository)),
            identity,
            token_service,
        ))
    } else {
        let user_repository = Arc::new(InMemoryUserRepository::new());
        let review_repository = Arc::new(InMemoryReviewRepository::new());

        let identity = Arc::new(IdentityResolver::new(
            token_service.clone(),
            user_repository.clone(),
        ));

        Ok(AppState::new(
            Arc::new(UserService::new(user_repository, hasher)),
            Arc::new(ReviewService::new(review_repository)),
            identity,
            token_service,
        ))
    }
}

/// Build the token service from configuration
///
/// Secret resolution order: config value, then the JWT_SECRET env var, then
/// a random secret (with a warning, since tokens will not survive restarts).
fn create_token_service(config: &AppConfig) -> anyhow::Result<Arc<dyn TokenService>> {
    let secret = config
        .auth
        .jwt_secret
        .clone()
        .or_else(|| std::env::var("JWT_SECRET").ok())
        .unwrap_or_else(|| {
            tracing::warn!(
                "No JWT secret configured. Generating a random secret; \
                issued tokens will NOT survive a restart. \
                Set auth.jwt_secret or the JWT_SECRET environment variable."
            );
            generate_random_secret()
        });

    let service = JwtService::new(JwtConfig::new(
        secret,
        config.auth.jwt_algorithm.clone(),
        config.auth.access_token_minutes,
    ))?;

    Ok(Arc::new(service))
}

/// Generate a random signing secret
fn generate_random_secret() -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::state::{IdentityResolverTrait, ReviewServiceTrait, UserServiceTrait};
    use crate::domain::DomainError;
    use crate::infrastructure::review::CreateReviewRequest;
    use crate::infrastructure::user::RegisterUserRequest;

    fn in_memory_state() -> AppState {
        let token_service: Arc<dyn TokenService> = Arc::new(
            JwtService::new(JwtConfig::new("integration-test-secret", "HS256", 30)).unwrap(),
        );
        let hasher = Arc::new(Argon2Hasher::new());
        let user_repository = Arc::new(InMemoryUserRepository::new());
        let review_repository = Arc::new(InMemoryReviewRepository::new());

        let identity = Arc::new(IdentityResolver::new(
            token_service.clone(),
            user_repository.clone(),
        ));

        AppState::new(
            Arc::new(UserService::new(user_repository, hasher)),
            Arc::new(ReviewService::new(review_repository)),
            identity,
            token_service,
        )
    }

    #[test]
    fn test_random_secret_length() {
        let secret = generate_random_secret();
        assert_eq!(secret.len(), 64);
        assert_ne!(secret, generate_random_secret());
    }

    #[tokio::test]
    async fn test_full_flow() {
        let state = in_memory_state();

        // Register
        let user = state
            .user_service
            .register(RegisterUserRequest {
                username: "alice".to_string(),
                email: "alice@x.com".to_string(),
                password: "pw123".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(user.id(), 1);

        // Login
        let user = state
            .user_service
            .authenticate("alice", "pw123")
            .await
            .unwrap();

        // Issue and validate a token
        let ttl = state.token_service.access_token_ttl();
        let token = state.token_service.issue(user.id(), ttl).unwrap();
        assert_eq!(state.token_service.validate(&token).unwrap(), 1);

        // Resolve the bearer token to the user and create a review
        let identity = state.identity.resolve(&token).await.unwrap();
        let review = state
            .review_service
            .create(
                CreateReviewRequest {
                    content: "great stay".to_string(),
                    rating: 5,
                    hotel_id: 42,
                },
                &identity,
            )
            .await
            .unwrap();

        assert_eq!(review.author_id(), 1);
        assert_eq!(review.hotel_id(), 42);

        // Wrong password fails with the login error
        let result = state.user_service.authenticate("alice", "wrongpw").await;
        assert!(matches!(result, Err(DomainError::AuthenticationFailed)));
    }

    #[tokio::test]
    async fn test_register_then_login_round_trip() {
        let state = in_memory_state();

        for (i, (username, email)) in [
            ("alice", "alice@x.com"),
            ("bob_1", "bob@example.org"),
            ("carol-2", "carol@mail.net"),
        ]
        .iter()
        .enumerate()
        {
            let registered = state
                .user_service
                .register(RegisterUserRequest {
                    username: username.to_string(),
                    email: email.to_string(),
                    password: format!("password-{}", i),
                })
                .await
                .unwrap();

            let logged_in = state
                .user_service
                .authenticate(username, &format!("password-{}", i))
                .await
                .unwrap();
            assert_eq!(logged_in.id(), registered.id());

            let ttl = state.token_service.access_token_ttl();
            let token = state.token_service.issue(logged_in.id(), ttl).unwrap();
            assert_eq!(
                state.token_service.validate(&token).unwrap(),
                registered.id()
            );
        }
    }
}
