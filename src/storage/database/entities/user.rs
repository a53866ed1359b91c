use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::models::User;

/// User database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// User ID (UUID)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Email address (unique)
    #[sea_orm(unique)]
    pub email: String,

    /// Argon2 password digest
    pub hashed_password: String,

    /// Paid tier flag
    pub is_chirpd_red: bool,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

/// User entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Chirps authored by this user
    #[sea_orm(has_many = "super::chirp::Entity")]
    Chirps,

    /// Refresh tokens owned by this user
    #[sea_orm(has_many = "super::refresh_token::Entity")]
    RefreshTokens,
}

impl Related<super::chirp::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Chirps.def()
    }
}

impl Related<super::refresh_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RefreshTokens.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert the database model to the domain user
    pub fn to_domain_user(&self) -> User {
        User {
            id: self.id,
            email: self.email.clone(),
            password_hash: self.hashed_password.clone(),
            is_chirpd_red: self.is_chirpd_red,
            created_at: self.created_at.with_timezone(&chrono::Utc),
            updated_at: self.updated_at.with_timezone(&chrono::Utc),
        }
    }
}
