//! Authentication and authorization system
//!
//! Password hashing, signed access tokens, refresh token lifecycle, and the
//! gate that composes them to authenticate requests and authorize actions
//! against resource owners. Every component here is stateless or delegates
//! its mutable state to the storage collaborator, and none of them writes
//! responses or terminates the process; failures are typed results only.

pub mod credentials;
pub mod jwt;
pub mod password;
pub mod refresh;

#[cfg(test)]
mod tests;

pub use jwt::JwtHandler;
pub use refresh::{RefreshTokenLedger, RefreshTokenRecord, RefreshTokenStore};

use crate::config::AuthConfig;
use crate::utils::error::{ChirpError, Result};
use actix_web::http::header::HeaderMap;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Main authentication system
///
/// A pure coordination layer over the token codec, the credential extractor,
/// and the refresh token ledger. It never remaps the failure categories its
/// collaborators raise; each maps 1:1 to an externally visible status.
#[derive(Clone)]
pub struct AuthSystem {
    /// Authentication configuration
    config: Arc<AuthConfig>,
    /// Access token handler
    jwt: Arc<JwtHandler>,
    /// Refresh token ledger
    refresh: Arc<RefreshTokenLedger>,
}

impl std::fmt::Debug for AuthSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSystem").finish_non_exhaustive()
    }
}

impl AuthSystem {
    /// Create a new authentication system
    pub fn new(config: &AuthConfig, store: Arc<dyn RefreshTokenStore>) -> Self {
        let config = Arc::new(config.clone());
        let jwt = Arc::new(JwtHandler::new(&config));
        let refresh = Arc::new(RefreshTokenLedger::new(store, &config));

        Self {
            config,
            jwt,
            refresh,
        }
    }

    /// Access token handler
    pub fn jwt(&self) -> &JwtHandler {
        &self.jwt
    }

    /// Refresh token ledger
    pub fn refresh(&self) -> &RefreshTokenLedger {
        &self.refresh
    }

    /// Authenticate a request carrying a bearer access token
    ///
    /// Returns the identity asserted by the token. Extraction and validation
    /// failures propagate unchanged.
    pub fn authenticate_request(&self, headers: &HeaderMap) -> Result<Uuid> {
        let token = credentials::extract_bearer_token(headers)?;
        self.jwt.verify_access_token(&token)
    }

    /// Authenticate a request carrying a bearer refresh token
    pub async fn authenticate_refresh(&self, headers: &HeaderMap) -> Result<Uuid> {
        let token = credentials::extract_bearer_token(headers)?;
        self.refresh.resolve(&token).await
    }

    /// Authorize an action against a resource's declared owner
    ///
    /// Succeeds only on exact equality. A mismatch is forbidden, not
    /// unauthenticated: the caller was identified, but lacks rights here.
    pub fn authorize_ownership(&self, identity: Uuid, resource_owner: Uuid) -> Result<()> {
        if identity == resource_owner {
            Ok(())
        } else {
            debug!(
                "Ownership check failed: {} is not {}",
                identity, resource_owner
            );
            Err(ChirpError::forbidden(
                "you are not the owner of this resource",
            ))
        }
    }

    /// Authenticate a trusted service caller by static API key
    pub fn authenticate_service_caller(&self, headers: &HeaderMap) -> Result<()> {
        let key = credentials::extract_api_key(headers)?;

        if !constant_time_eq(&key, &self.config.polka_key) {
            return Err(ChirpError::unauthorized("invalid api key"));
        }

        Ok(())
    }
}

/// Constant-time string comparison
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (a_byte, b_byte) in a.bytes().zip(b.bytes()) {
        result |= a_byte ^ b_byte;
    }

    result == 0
}
