//! JWT token issuance and validation

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

use crate::domain::DomainError;

/// Claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the user id, serialized as a string so the claim encoding is
    /// stable regardless of the id's native numeric type
    pub sub: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

/// Why a token was rejected
///
/// The three kinds stay distinct for callers (logging, tests); the HTTP
/// boundary collapses all of them to a single 401.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("token is malformed")]
    Malformed,
}

/// Configuration for the JWT service
///
/// The secret is process-wide state loaded once at startup. It is never
/// logged and never derived from request data.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Signing algorithm identifier (HS256, HS384 or HS512)
    pub algorithm: String,
    /// Access token lifetime in minutes
    pub access_token_minutes: i64,
}

impl JwtConfig {
    /// Create new JWT configuration
    pub fn new(
        secret: impl Into<String>,
        algorithm: impl Into<String>,
        access_token_minutes: i64,
    ) -> Self {
        Self {
            secret: secret.into(),
            algorithm: algorithm.into(),
            access_token_minutes,
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            algorithm: "HS256".to_string(),
            access_token_minutes: 30,
        }
    }
}

/// Trait for token operations
pub trait TokenService: Send + Sync + Debug {
    /// Issue a signed token for `subject`, valid for `ttl` from now
    ///
    /// `ttl` is a required explicit parameter; there is no silent fallback
    /// lifetime.
    fn issue(&self, subject: i64, ttl: Duration) -> Result<String, DomainError>;

    /// Validate a token's signature and expiry, returning its subject id
    fn validate(&self, token: &str) -> Result<i64, TokenError>;

    /// The configured access-token lifetime
    fn access_token_ttl(&self) -> Duration;
}

/// Token service backed by a symmetric JWT secret
#[derive(Clone)]
pub struct JwtService {
    algorithm: Algorithm,
    access_token_minutes: i64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("algorithm", &self.algorithm)
            .field("access_token_minutes", &self.access_token_minutes)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Create a new JWT service with the given configuration
    ///
    /// Fails when the algorithm identifier is not a supported symmetric
    /// algorithm.
    pub fn new(config: JwtConfig) -> Result<Self, DomainError> {
        let algorithm = parse_algorithm(&config.algorithm)?;
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Ok(Self {
            algorithm,
            access_token_minutes: config.access_token_minutes,
            encoding_key,
            decoding_key,
        })
    }
}

fn parse_algorithm(identifier: &str) -> Result<Algorithm, DomainError> {
    match identifier {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => Err(DomainError::configuration(format!(
            "Unsupported signing algorithm: {}. Use HS256, HS384 or HS512.",
            other
        ))),
    }
}

impl TokenService for JwtService {
    fn issue(&self, subject: i64, ttl: Duration) -> Result<String, DomainError> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to sign token: {}", e)))
    }

    fn validate(&self, token: &str) -> Result<i64, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // No clock leeway: a token is invalid the moment its exp passes.
        validation.leeway = 0;

        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidSignature
                }
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })?;

        token_data
            .claims
            .sub
            .parse::<i64>()
            .map_err(|_| TokenError::Malformed)
    }

    fn access_token_ttl(&self) -> Duration {
        Duration::minutes(self.access_token_minutes)
    }
}
