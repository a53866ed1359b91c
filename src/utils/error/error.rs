//! Error handling for chirpd
//!
//! This module defines all error types used throughout the service.

use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Result type alias for chirpd
pub type Result<T> = std::result::Result<T, ChirpError>;

/// Main error type for the service
///
/// Authentication failures are deliberately coarse: every variant that maps to
/// 401 carries an internal detail string for logs, but the HTTP body never
/// distinguishes why a token was rejected beyond the expired/revoked split.
#[derive(Error, Debug)]
pub enum ChirpError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No credential present in the request metadata
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// Credential header present but not in the expected shape
    #[error("Malformed credential: {0}")]
    MalformedCredential(String),

    /// Token failed validation (signature, algorithm, structure, or claims)
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Token past its expiry instant
    #[error("Token expired: {0}")]
    TokenExpired(String),

    /// Refresh token explicitly revoked
    #[error("Token revoked: {0}")]
    TokenRevoked(String),

    /// Identity resolved but lacks rights over the target resource
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Credential checks that are not token-shaped (e.g. wrong password)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Hashing-primitive errors
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ChirpError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a missing-credential error
    pub fn missing_credential(msg: impl Into<String>) -> Self {
        Self::MissingCredential(msg.into())
    }

    /// Create a malformed-credential error
    pub fn malformed_credential(msg: impl Into<String>) -> Self {
        Self::MalformedCredential(msg.into())
    }

    /// Create an invalid-token error
    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::InvalidToken(msg.into())
    }

    /// Create a token-expired error
    pub fn token_expired(msg: impl Into<String>) -> Self {
        Self::TokenExpired(msg.into())
    }

    /// Create a token-revoked error
    pub fn token_revoked(msg: impl Into<String>) -> Self {
        Self::TokenRevoked(msg.into())
    }

    /// Create a forbidden error
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    /// Create an unauthorized error
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    /// Create a not-found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a crypto error
    pub fn crypto(msg: impl Into<String>) -> Self {
        Self::Crypto(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the error is an unexpected internal failure worth alerting on
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Config(_)
                | Self::Database(_)
                | Self::Io(_)
                | Self::Serialization(_)
                | Self::Crypto(_)
                | Self::Internal(_)
        )
    }
}

impl ResponseError for ChirpError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message) = match self {
            ChirpError::MissingCredential(_) => (
                actix_web::http::StatusCode::UNAUTHORIZED,
                "MISSING_CREDENTIAL",
                "Couldn't find credential".to_string(),
            ),
            ChirpError::MalformedCredential(_) => (
                actix_web::http::StatusCode::UNAUTHORIZED,
                "MALFORMED_CREDENTIAL",
                "Malformed authorization header".to_string(),
            ),
            ChirpError::InvalidToken(_) => (
                actix_web::http::StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                "Invalid token".to_string(),
            ),
            ChirpError::TokenExpired(_) => (
                actix_web::http::StatusCode::UNAUTHORIZED,
                "TOKEN_EXPIRED",
                "Token has expired".to_string(),
            ),
            ChirpError::TokenRevoked(_) => (
                actix_web::http::StatusCode::UNAUTHORIZED,
                "TOKEN_REVOKED",
                "Token has been revoked".to_string(),
            ),
            ChirpError::Unauthorized(_) => (
                actix_web::http::StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                self.to_string(),
            ),
            ChirpError::Forbidden(_) => (
                actix_web::http::StatusCode::FORBIDDEN,
                "FORBIDDEN",
                self.to_string(),
            ),
            ChirpError::NotFound(_) => (
                actix_web::http::StatusCode::NOT_FOUND,
                "NOT_FOUND",
                self.to_string(),
            ),
            ChirpError::Validation(_) => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                self.to_string(),
            ),
            ChirpError::Database(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                "Database operation failed".to_string(),
            ),
            ChirpError::Crypto(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "CRYPTO_ERROR",
                "An internal error occurred".to_string(),
            ),
            _ => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            ),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
            },
        };

        HttpResponse::build(status_code).json(error_response)
    }
}

/// Standard error response format
#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_unauthenticated_categories_map_to_401() {
        let errors = [
            ChirpError::missing_credential("no header"),
            ChirpError::malformed_credential("wrong scheme"),
            ChirpError::invalid_token("bad signature"),
            ChirpError::token_expired("past exp"),
            ChirpError::token_revoked("revoked_at set"),
        ];

        for error in errors {
            assert_eq!(error.error_response().status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_forbidden_is_distinct_from_unauthenticated() {
        let error = ChirpError::forbidden("not the author");
        assert_eq!(error.error_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_invalid_token_body_does_not_leak_cause() {
        // The internal detail names the signature; the response must not.
        let error = ChirpError::invalid_token("signature mismatch for key id 7");
        let response = error.error_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_internal_classification() {
        assert!(ChirpError::crypto("argon2 failure").is_internal());
        assert!(ChirpError::internal("boom").is_internal());
        assert!(!ChirpError::invalid_token("nope").is_internal());
        assert!(!ChirpError::forbidden("nope").is_internal());
    }
}
