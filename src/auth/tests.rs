//! End-to-end tests for the authentication system

use super::*;
use crate::auth::refresh::RefreshTokenRecord;
use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory refresh token store backing the end-to-end tests
#[derive(Default)]
struct InMemoryStore {
    records: Mutex<HashMap<String, RefreshTokenRecord>>,
}

#[async_trait]
impl RefreshTokenStore for InMemoryStore {
    async fn insert_refresh_token(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        let record = RefreshTokenRecord {
            token: token.to_string(),
            user_id,
            created_at: Utc::now(),
            expires_at,
            revoked_at: None,
        };
        self.records
            .lock()
            .unwrap()
            .insert(token.to_string(), record);
        Ok(())
    }

    async fn find_refresh_token(&self, token: &str) -> Result<Option<RefreshTokenRecord>> {
        Ok(self.records.lock().unwrap().get(token).cloned())
    }

    async fn revoke_refresh_token(&self, token: &str, revoked_at: DateTime<Utc>) -> Result<()> {
        if let Some(record) = self.records.lock().unwrap().get_mut(token) {
            record.revoked_at = Some(revoked_at);
        }
        Ok(())
    }
}

fn test_system() -> AuthSystem {
    AuthSystem::new(
        &AuthConfig::test_defaults(),
        Arc::new(InMemoryStore::default()),
    )
}

fn bearer_headers(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static("authorization"),
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );
    headers
}

fn api_key_headers(key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static("authorization"),
        HeaderValue::from_str(&format!("ApiKey {}", key)).unwrap(),
    );
    headers
}

#[tokio::test]
async fn test_refresh_flow_round_trips_identity() {
    let auth = test_system();
    let user_id = Uuid::new_v4();

    // Issue a refresh token, present it as a bearer credential, and mint a
    // new access token for the resolved identity.
    let refresh_token = auth.refresh().issue(user_id).await.unwrap();
    let resolved = auth
        .authenticate_refresh(&bearer_headers(&refresh_token))
        .await
        .unwrap();
    assert_eq!(resolved, user_id);

    let access_token = auth.jwt().create_access_token(resolved, None).unwrap();
    let authenticated = auth
        .authenticate_request(&bearer_headers(&access_token))
        .unwrap();
    assert_eq!(authenticated, user_id);
}

#[tokio::test]
async fn test_revoked_refresh_token_stops_resolving() {
    let auth = test_system();
    let user_id = Uuid::new_v4();

    let refresh_token = auth.refresh().issue(user_id).await.unwrap();
    auth.refresh().revoke(&refresh_token).await.unwrap();

    let result = auth
        .authenticate_refresh(&bearer_headers(&refresh_token))
        .await;
    assert!(matches!(result, Err(ChirpError::TokenRevoked(_))));

    // Revocation is idempotent.
    auth.refresh().revoke(&refresh_token).await.unwrap();
}

#[tokio::test]
async fn test_access_token_does_not_work_as_refresh_token() {
    let auth = test_system();
    let user_id = Uuid::new_v4();

    let access_token = auth.jwt().create_access_token(user_id, None).unwrap();
    let result = auth
        .authenticate_refresh(&bearer_headers(&access_token))
        .await;
    assert!(matches!(result, Err(ChirpError::InvalidToken(_))));
}

#[test]
fn test_authenticate_request_without_header() {
    let auth = test_system();
    let result = auth.authenticate_request(&HeaderMap::new());
    assert!(matches!(result, Err(ChirpError::MissingCredential(_))));
}

#[test]
fn test_ownership_check() {
    let auth = test_system();
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();

    assert!(auth.authorize_ownership(owner, owner).is_ok());

    let result = auth.authorize_ownership(stranger, owner);
    assert!(matches!(result, Err(ChirpError::Forbidden(_))));
}

#[test]
fn test_service_caller_with_correct_key() {
    let auth = test_system();
    let headers = api_key_headers(&AuthConfig::test_defaults().polka_key);
    assert!(auth.authenticate_service_caller(&headers).is_ok());
}

#[test]
fn test_service_caller_with_wrong_key() {
    let auth = test_system();
    let headers = api_key_headers("not-the-configured-key");
    let result = auth.authenticate_service_caller(&headers);
    assert!(matches!(result, Err(ChirpError::Unauthorized(_))));
}

#[test]
fn test_service_caller_with_bearer_scheme_is_malformed() {
    let auth = test_system();
    let headers = bearer_headers(&AuthConfig::test_defaults().polka_key);
    let result = auth.authenticate_service_caller(&headers);
    assert!(matches!(result, Err(ChirpError::MalformedCredential(_))));
}
