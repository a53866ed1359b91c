//! Request and response models for authentication endpoints

use crate::core::models::PublicUser;
use serde::{Deserialize, Serialize};

/// User login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Optional access token lifetime in seconds, capped at the configured
    /// default
    pub expires_in_seconds: Option<i64>,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: PublicUser,
}

/// Refresh response carrying only the new access token
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}
