//! User domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Account identity, assigned at registration and never reused
    pub id: Uuid,
    /// Email address (unique)
    pub email: String,
    /// Argon2 digest of the account password; never exposed
    pub password_hash: String,
    /// Whether the account holds the paid Chirpd Red tier
    pub is_chirpd_red: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// The externally visible view of this account
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            email: self.email.clone(),
            is_chirpd_red: self.is_chirpd_red,
        }
    }
}

/// User representation returned by the API (no credential material)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    pub is_chirpd_red: bool,
}
