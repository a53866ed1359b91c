//! Refresh token ledger
//!
//! Long-lived opaque refresh tokens: issuance, resolution, and revocation.
//! The ledger owns the record shape and random-generation policy; persistence
//! is delegated to a storage collaborator behind [`RefreshTokenStore`].

use crate::config::AuthConfig;
use crate::utils::error::{ChirpError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::{RngCore, rngs::OsRng};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Number of random bytes in a refresh token
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// A persisted refresh token record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTokenRecord {
    /// The opaque token string
    pub token: String,
    /// Identity that owns the token
    pub user_id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Expiry timestamp
    pub expires_at: DateTime<Utc>,
    /// Revocation timestamp, set once on revoke
    pub revoked_at: Option<DateTime<Utc>>,
}

/// Storage collaborator contract for refresh tokens
///
/// Implemented by the database layer; each call is a single storage round
/// trip and inherits the ambient request's cancellation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// Insert a freshly issued token record
    async fn insert_refresh_token(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<()>;

    /// Look up a token record by its token string
    async fn find_refresh_token(&self, token: &str) -> Result<Option<RefreshTokenRecord>>;

    /// Stamp a token's revocation timestamp (last write wins)
    async fn revoke_refresh_token(&self, token: &str, revoked_at: DateTime<Utc>) -> Result<()>;
}

/// Generate a new opaque refresh token string
///
/// 32 bytes from the OS entropy source, hex-encoded.
pub fn generate_refresh_token() -> String {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Lifecycle manager for refresh tokens
#[derive(Clone)]
pub struct RefreshTokenLedger {
    /// Storage collaborator
    store: Arc<dyn RefreshTokenStore>,
    /// Token lifetime
    ttl: Duration,
}

impl std::fmt::Debug for RefreshTokenLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshTokenLedger")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl RefreshTokenLedger {
    /// Create a new ledger over the given store
    pub fn new(store: Arc<dyn RefreshTokenStore>, config: &AuthConfig) -> Self {
        Self {
            store,
            ttl: Duration::days(config.refresh_token_ttl_days),
        }
    }

    /// Issue a new refresh token owned by `user_id`
    pub async fn issue(&self, user_id: Uuid) -> Result<String> {
        let token = generate_refresh_token();
        let expires_at = Utc::now() + self.ttl;

        self.store
            .insert_refresh_token(&token, user_id, expires_at)
            .await?;

        debug!("Issued refresh token for user: {}", user_id);
        Ok(token)
    }

    /// Resolve a refresh token to its owning identity
    ///
    /// Only a record that is present, unexpired, and unrevoked resolves.
    pub async fn resolve(&self, token: &str) -> Result<Uuid> {
        let record = self
            .store
            .find_refresh_token(token)
            .await?
            .ok_or_else(|| ChirpError::invalid_token("unknown refresh token"))?;

        if Utc::now() > record.expires_at {
            return Err(ChirpError::token_expired("refresh token past expiry"));
        }

        if record.revoked_at.is_some() {
            return Err(ChirpError::token_revoked("refresh token has been revoked"));
        }

        Ok(record.user_id)
    }

    /// Revoke a refresh token
    ///
    /// Idempotent at this level: revoking an already-revoked or unknown
    /// token is not a caller-facing failure. Storage errors still surface.
    pub async fn revoke(&self, token: &str) -> Result<()> {
        self.store.revoke_refresh_token(token, Utc::now()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig::test_defaults()
    }

    fn record(user_id: Uuid, expires_at: DateTime<Utc>) -> RefreshTokenRecord {
        RefreshTokenRecord {
            token: generate_refresh_token(),
            user_id,
            created_at: Utc::now(),
            expires_at,
            revoked_at: None,
        }
    }

    #[test]
    fn test_generated_tokens_are_high_entropy_hex() {
        let token = generate_refresh_token();
        assert_eq!(token.len(), REFRESH_TOKEN_BYTES * 2);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(token, generate_refresh_token());
    }

    #[tokio::test]
    async fn test_issue_records_owner_and_expiry() {
        let user_id = Uuid::new_v4();
        let mut store = MockRefreshTokenStore::new();
        store
            .expect_insert_refresh_token()
            .withf(move |token, owner, expires_at| {
                let expected_expiry = Utc::now() + Duration::days(60);
                token.len() == REFRESH_TOKEN_BYTES * 2
                    && *owner == user_id
                    && (*expires_at - expected_expiry).num_seconds().abs() < 5
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let ledger = RefreshTokenLedger::new(Arc::new(store), &test_config());
        let token = ledger.issue(user_id).await.unwrap();
        assert_eq!(token.len(), REFRESH_TOKEN_BYTES * 2);
    }

    #[tokio::test]
    async fn test_resolve_fresh_token() {
        let user_id = Uuid::new_v4();
        let stored = record(user_id, Utc::now() + Duration::days(60));
        let token = stored.token.clone();

        let expected = token.clone();
        let mut store = MockRefreshTokenStore::new();
        store
            .expect_find_refresh_token()
            .withf(move |t| t == expected)
            .returning(move |_| Ok(Some(stored.clone())));

        let ledger = RefreshTokenLedger::new(Arc::new(store), &test_config());
        assert_eq!(ledger.resolve(&token).await.unwrap(), user_id);
    }

    #[tokio::test]
    async fn test_resolve_unknown_token() {
        let mut store = MockRefreshTokenStore::new();
        store.expect_find_refresh_token().returning(|_| Ok(None));

        let ledger = RefreshTokenLedger::new(Arc::new(store), &test_config());
        let result = ledger.resolve("deadbeef").await;
        assert!(matches!(result, Err(ChirpError::InvalidToken(_))));
    }

    #[tokio::test]
    async fn test_resolve_expired_token() {
        let stored = record(Uuid::new_v4(), Utc::now() - Duration::seconds(1));
        let token = stored.token.clone();

        let mut store = MockRefreshTokenStore::new();
        store
            .expect_find_refresh_token()
            .returning(move |_| Ok(Some(stored.clone())));

        let ledger = RefreshTokenLedger::new(Arc::new(store), &test_config());
        let result = ledger.resolve(&token).await;
        assert!(matches!(result, Err(ChirpError::TokenExpired(_))));
    }

    #[tokio::test]
    async fn test_resolve_revoked_token() {
        let mut stored = record(Uuid::new_v4(), Utc::now() + Duration::days(60));
        stored.revoked_at = Some(Utc::now());
        let token = stored.token.clone();

        let mut store = MockRefreshTokenStore::new();
        store
            .expect_find_refresh_token()
            .returning(move |_| Ok(Some(stored.clone())));

        let ledger = RefreshTokenLedger::new(Arc::new(store), &test_config());
        let result = ledger.resolve(&token).await;
        assert!(matches!(result, Err(ChirpError::TokenRevoked(_))));
    }

    #[tokio::test]
    async fn test_revoke_stamps_current_time() {
        let mut store = MockRefreshTokenStore::new();
        store
            .expect_revoke_refresh_token()
            .withf(|token, revoked_at| {
                token == "sometoken" && (Utc::now() - *revoked_at).num_seconds().abs() < 5
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let ledger = RefreshTokenLedger::new(Arc::new(store), &test_config());
        ledger.revoke("sometoken").await.unwrap();
    }
}
