//! JWT access token handling
//!
//! This module provides signed access token creation and verification.
//! Tokens are stateless: validity is fully determined by the signature and
//! the issued-at/expiry timestamps, so any process holding the shared secret
//! validates identically.

use crate::config::AuthConfig;
use crate::utils::error::{ChirpError, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Issuer claim stamped into every token
const TOKEN_ISSUER: &str = "chirpd";

/// JWT handler for access token operations
#[derive(Clone)]
pub struct JwtHandler {
    /// Encoding key for signing tokens
    encoding_key: EncodingKey,
    /// Decoding key for verifying tokens
    decoding_key: DecodingKey,
    /// JWT algorithm
    algorithm: Algorithm,
    /// Default token lifetime in seconds
    default_ttl: u64,
}

impl std::fmt::Debug for JwtHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtHandler")
            .field("algorithm", &self.algorithm)
            .field("default_ttl", &self.default_ttl)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID in string form)
    pub sub: String,
    /// Issued at timestamp (UTC seconds)
    pub iat: i64,
    /// Expiration timestamp (UTC seconds)
    pub exp: i64,
    /// Issuer
    pub iss: String,
}

impl JwtHandler {
    /// Create a new JWT handler from the auth configuration
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            default_ttl: config.access_token_ttl,
        }
    }

    /// Create an access token for a user
    ///
    /// The subject is the string form of `user_id`, issued-at is the current
    /// UTC time, and expiry is issued-at plus `ttl` (the configured default
    /// when `None`).
    pub fn create_access_token(&self, user_id: Uuid, ttl: Option<Duration>) -> Result<String> {
        let ttl = ttl.unwrap_or_else(|| Duration::seconds(self.default_ttl as i64));
        let now = Utc::now();

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            iss: TOKEN_ISSUER.to_string(),
        };

        let header = Header::new(self.algorithm);
        let token = encode(&header, &claims, &self.encoding_key)
            .map_err(|e| ChirpError::internal(format!("Failed to sign token: {}", e)))?;

        debug!("Created access token for user: {}", user_id);
        Ok(token)
    }

    /// Verify an access token and return the subject user ID
    ///
    /// Rejects tokens whose header algorithm differs from the configured
    /// HMAC one, tokens with a bad signature or issuer, tokens outside their
    /// [issued-at, expiry] window, and tokens whose subject is not a UUID.
    /// Only expiry is reported distinctly; every other failure collapses
    /// into the same invalid-token category.
    pub fn verify_access_token(&self, token: &str) -> Result<Uuid> {
        // Validation pins the algorithm list to HS256, so a token whose
        // header names any other algorithm never reaches signature checking.
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        ChirpError::token_expired("access token past expiry")
                    }
                    _ => ChirpError::invalid_token(format!("token rejected: {}", e)),
                }
            })?;

        let claims = token_data.claims;

        if claims.iat > Utc::now().timestamp() {
            return Err(ChirpError::invalid_token("token issued in the future"));
        }

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| ChirpError::invalid_token("subject is not a valid user id"))?;

        debug!("Token verified for user: {}", user_id);
        Ok(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_handler(secret: &str) -> JwtHandler {
        JwtHandler::new(&AuthConfig {
            jwt_secret: secret.to_string(),
            ..AuthConfig::test_defaults()
        })
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let handler = test_handler("my-super-secret-key-of-decent-length");
        let user_id = Uuid::new_v4();

        let token = handler
            .create_access_token(user_id, Some(Duration::hours(1)))
            .unwrap();
        let parsed = handler.verify_access_token(&token).unwrap();

        assert_eq!(parsed, user_id);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let handler = test_handler("my-super-secret-key-of-decent-length");
        let other = test_handler("a-completely-different-secret-string");
        let token = handler
            .create_access_token(Uuid::new_v4(), None)
            .unwrap();

        let result = other.verify_access_token(&token);
        assert!(matches!(result, Err(ChirpError::InvalidToken(_))));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let handler = test_handler("my-super-secret-key-of-decent-length");
        // Negative lifetime puts expiry in the past at issue time.
        let token = handler
            .create_access_token(Uuid::new_v4(), Some(Duration::hours(-1)))
            .unwrap();

        let result = handler.verify_access_token(&token);
        assert!(matches!(result, Err(ChirpError::TokenExpired(_))));
    }

    #[test]
    fn test_tampered_signature_is_rejected() {
        let handler = test_handler("my-super-secret-key-of-decent-length");
        let token = handler
            .create_access_token(Uuid::new_v4(), None)
            .unwrap();

        // Flip a character inside the signature segment.
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        let result = handler.verify_access_token(&tampered);
        assert!(matches!(result, Err(ChirpError::InvalidToken(_))));
    }

    #[test]
    fn test_unexpected_algorithm_is_rejected() {
        let handler = test_handler("my-super-secret-key-of-decent-length");
        let user_id = Uuid::new_v4();
        let now = Utc::now();

        // Sign with the same secret but a different algorithm; the verifier
        // must reject on the header alone.
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
            iss: TOKEN_ISSUER.to_string(),
        };
        let forged = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(b"my-super-secret-key-of-decent-length"),
        )
        .unwrap();

        let result = handler.verify_access_token(&forged);
        assert!(matches!(result, Err(ChirpError::InvalidToken(_))));
    }

    #[test]
    fn test_foreign_issuer_is_rejected() {
        let handler = test_handler("my-super-secret-key-of-decent-length");
        let now = Utc::now();

        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
            iss: "someone-else".to_string(),
        };
        let foreign = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"my-super-secret-key-of-decent-length"),
        )
        .unwrap();

        let result = handler.verify_access_token(&foreign);
        assert!(matches!(result, Err(ChirpError::InvalidToken(_))));
    }

    #[test]
    fn test_non_uuid_subject_is_rejected() {
        let handler = test_handler("my-super-secret-key-of-decent-length");
        let now = Utc::now();

        let claims = Claims {
            sub: "definitely-not-a-uuid".to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
            iss: TOKEN_ISSUER.to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"my-super-secret-key-of-decent-length"),
        )
        .unwrap();

        let result = handler.verify_access_token(&token);
        assert!(matches!(result, Err(ChirpError::InvalidToken(_))));
    }
}
