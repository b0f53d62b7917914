//! Request-scoped identity resolution
//!
//! Turns a bearer token presented on a request into the authenticated user,
//! by validating the token and looking up its subject in the user store.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;

use super::jwt::TokenService;

/// Resolves bearer tokens to users
///
/// The result is recomputed on every call: one store read per request, no
/// caching, so a resolved identity always reflects current store state.
#[derive(Debug)]
pub struct IdentityResolver<R: UserRepository> {
    tokens: Arc<dyn TokenService>,
    users: Arc<R>,
}

impl<R: UserRepository> IdentityResolver<R> {
    /// Create a new identity resolver
    pub fn new(tokens: Arc<dyn TokenService>, users: Arc<R>) -> Self {
        Self { tokens, users }
    }

    /// Resolve a bearer token to its user
    ///
    /// Any token rejection becomes `Unauthenticated`; a valid token whose
    /// subject no longer exists becomes `UnknownSubject`. Both map to 401 at
    /// the boundary, but the latter signals stale-token data inconsistency
    /// rather than a bad token, so it is logged separately.
    pub async fn resolve(&self, token: &str) -> Result<User, DomainError> {
        let subject = self.tokens.validate(token).map_err(|e| {
            debug!(reason = %e, "Rejected bearer token");
            DomainError::unauthenticated("Invalid bearer token")
        })?;

        match self.users.find_by_id(subject).await? {
            Some(user) => Ok(user),
            None => {
                warn!(subject, "Valid token for a user that no longer exists");
                Err(DomainError::unknown_subject(subject))
            }
        }
    }
}

impl<R: UserRepository> Clone for IdentityResolver<R> {
    fn clone(&self) -> Self {
        Self {
            tokens: self.tokens.clone(),
            users: self.users.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{MockUserRepository, NewUser};
    use crate::infrastructure::auth::jwt::{JwtConfig, JwtService};
    use chrono::Duration;

    fn create_tokens() -> Arc<dyn TokenService> {
        Arc::new(JwtService::new(JwtConfig::new("test-secret", "HS256", 30)).unwrap())
    }

    async fn register(repo: &MockUserRepository, username: &str) -> User {
        repo.insert(NewUser {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password_hash: "hashed".to_string(),
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_resolve_valid_token() {
        let tokens = create_tokens();
        let repo = Arc::new(MockUserRepository::new());
        let user = register(&repo, "alice").await;

        let resolver = IdentityResolver::new(tokens.clone(), repo);
        let token = tokens.issue(user.id(), Duration::minutes(5)).unwrap();

        let resolved = resolver.resolve(&token).await.unwrap();
        assert_eq!(resolved.id(), user.id());
        assert_eq!(resolved.username(), "alice");
    }

    #[tokio::test]
    async fn test_resolve_invalid_token() {
        let tokens = create_tokens();
        let repo = Arc::new(MockUserRepository::new());
        register(&repo, "alice").await;

        let resolver = IdentityResolver::new(tokens, repo);

        let result = resolver.resolve("garbage-token").await;
        assert!(matches!(result, Err(DomainError::Unauthenticated { .. })));
    }

    #[tokio::test]
    async fn test_resolve_expired_token() {
        let tokens = create_tokens();
        let repo = Arc::new(MockUserRepository::new());
        let user = register(&repo, "alice").await;

        let resolver = IdentityResolver::new(tokens.clone(), repo);
        let token = tokens.issue(user.id(), Duration::minutes(-5)).unwrap();

        let result = resolver.resolve(&token).await;
        assert!(matches!(result, Err(DomainError::Unauthenticated { .. })));
    }

    #[tokio::test]
    async fn test_resolve_unknown_subject() {
        let tokens = create_tokens();
        let repo = Arc::new(MockUserRepository::new());

        let resolver = IdentityResolver::new(tokens.clone(), repo);

        // Token for a user id that was never inserted
        let token = tokens.issue(999, Duration::minutes(5)).unwrap();

        let result = resolver.resolve(&token).await;
        assert!(matches!(
            result,
            Err(DomainError::UnknownSubject { subject: 999 })
        ));
    }

    #[tokio::test]
    async fn test_resolve_propagates_store_errors() {
        let tokens = create_tokens();
        let repo = Arc::new(MockUserRepository::new());
        let user = register(&repo, "alice").await;
        repo.set_should_fail(true).await;

        let resolver = IdentityResolver::new(tokens.clone(), repo);
        let token = tokens.issue(user.id(), Duration::minutes(5)).unwrap();

        let result = resolver.resolve(&token).await;
        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }
}
