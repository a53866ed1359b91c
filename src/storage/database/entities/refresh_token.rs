use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::auth::RefreshTokenRecord;

/// Refresh token database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "refresh_tokens")]
pub struct Model {
    /// The opaque token string
    #[sea_orm(primary_key, auto_increment = false)]
    pub token: String,

    /// User ID this token belongs to
    pub user_id: Uuid,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,

    /// Expiry timestamp
    pub expires_at: DateTimeWithTimeZone,

    /// Revocation timestamp (null while the token is live)
    pub revoked_at: Option<DateTimeWithTimeZone>,
}

/// Refresh token entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Belongs to user relation
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert the database model to the ledger record shape
    pub fn to_record(&self) -> RefreshTokenRecord {
        RefreshTokenRecord {
            token: self.token.clone(),
            user_id: self.user_id,
            created_at: self.created_at.with_timezone(&chrono::Utc),
            expires_at: self.expires_at.with_timezone(&chrono::Utc),
            revoked_at: self
                .revoked_at
                .map(|revoked_at| revoked_at.with_timezone(&chrono::Utc)),
        }
    }
}
