use crate::auth::{RefreshTokenRecord, RefreshTokenStore};
use crate::config::DatabaseConfig;
use crate::core::models::{Chirp, User};
use crate::utils::error::{ChirpError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::*;
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use super::entities::{self, chirp, refresh_token, user};
use super::migration::Migrator;

/// SeaORM-based database implementation
///
/// Exposes the narrow query interface consumed by handlers and the refresh
/// token ledger; nothing else in the service builds queries.
#[derive(Debug)]
pub struct SeaOrmDatabase {
    db: DatabaseConnection,
}

impl SeaOrmDatabase {
    /// Create a new database connection
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let mut opt = ConnectOptions::new(config.url.clone());
        opt.max_connections(config.max_connections)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.connection_timeout))
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .sqlx_logging(false);

        let db = Database::connect(opt)
            .await
            .map_err(ChirpError::Database)?;

        info!("Database connection established");
        Ok(Self { db })
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        info!("Running database migrations");
        Migrator::up(&self.db, None)
            .await
            .map_err(ChirpError::Database)?;
        info!("Database migrations completed");
        Ok(())
    }

    /// Find user by ID
    pub async fn find_user_by_id(&self, user_id: Uuid) -> Result<Option<User>> {
        debug!("Finding user by ID: {}", user_id);

        let model = entities::UserEntity::find_by_id(user_id)
            .one(&self.db)
            .await?;

        Ok(model.map(|model| model.to_domain_user()))
    }

    /// Find user by email
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        debug!("Finding user by email");

        let model = entities::UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(model.map(|model| model.to_domain_user()))
    }

    /// Create a new user
    pub async fn create_user(&self, email: &str, password_hash: &str) -> Result<User> {
        debug!("Creating user");

        let now = Utc::now();
        let model = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.to_string()),
            hashed_password: Set(password_hash.to_string()),
            is_chirpd_red: Set(false),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let inserted = model.insert(&self.db).await?;
        Ok(inserted.to_domain_user())
    }

    /// Update a user's email and password hash
    pub async fn update_user_credentials(
        &self,
        user_id: Uuid,
        email: &str,
        password_hash: &str,
    ) -> Result<User> {
        debug!("Updating credentials for user: {}", user_id);

        let mut model: user::ActiveModel = entities::UserEntity::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ChirpError::not_found("User not found"))?
            .into();

        model.email = Set(email.to_string());
        model.hashed_password = Set(password_hash.to_string());
        model.updated_at = Set(Utc::now().into());

        let updated = model.update(&self.db).await?;
        Ok(updated.to_domain_user())
    }

    /// Upgrade a user to the paid tier
    ///
    /// Returns `None` when no such user exists.
    pub async fn upgrade_user_to_red(&self, user_id: Uuid) -> Result<Option<User>> {
        debug!("Upgrading user to Chirpd Red: {}", user_id);

        let Some(found) = entities::UserEntity::find_by_id(user_id)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut model: user::ActiveModel = found.into();
        model.is_chirpd_red = Set(true);
        model.updated_at = Set(Utc::now().into());

        let updated = model.update(&self.db).await?;
        Ok(Some(updated.to_domain_user()))
    }

    /// Delete every user (dev-platform reset)
    pub async fn delete_all_users(&self) -> Result<()> {
        entities::UserEntity::delete_many().exec(&self.db).await?;
        Ok(())
    }

    /// Create a new chirp
    pub async fn create_chirp(&self, body: &str, user_id: Uuid) -> Result<Chirp> {
        debug!("Creating chirp for user: {}", user_id);

        let now = Utc::now();
        let model = chirp::ActiveModel {
            id: Set(Uuid::new_v4()),
            body: Set(body.to_string()),
            user_id: Set(user_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let inserted = model.insert(&self.db).await?;
        Ok(inserted.to_domain_chirp())
    }

    /// List all chirps ordered by creation time ascending
    pub async fn list_chirps(&self) -> Result<Vec<Chirp>> {
        let models = entities::ChirpEntity::find()
            .order_by_asc(chirp::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.iter().map(|model| model.to_domain_chirp()).collect())
    }

    /// List chirps by a single author ordered by creation time ascending
    pub async fn list_chirps_by_author(&self, author_id: Uuid) -> Result<Vec<Chirp>> {
        let models = entities::ChirpEntity::find()
            .filter(chirp::Column::UserId.eq(author_id))
            .order_by_asc(chirp::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.iter().map(|model| model.to_domain_chirp()).collect())
    }

    /// Find a chirp by ID
    pub async fn find_chirp(&self, chirp_id: Uuid) -> Result<Option<Chirp>> {
        let model = entities::ChirpEntity::find_by_id(chirp_id)
            .one(&self.db)
            .await?;

        Ok(model.map(|model| model.to_domain_chirp()))
    }

    /// Delete a chirp by ID
    pub async fn delete_chirp(&self, chirp_id: Uuid) -> Result<()> {
        entities::ChirpEntity::delete_by_id(chirp_id)
            .exec(&self.db)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl RefreshTokenStore for SeaOrmDatabase {
    async fn insert_refresh_token(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        debug!("Storing refresh token for user: {}", user_id);

        let now = Utc::now();
        let model = refresh_token::ActiveModel {
            token: Set(token.to_string()),
            user_id: Set(user_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            expires_at: Set(expires_at.into()),
            revoked_at: Set(None),
        };

        model.insert(&self.db).await?;
        Ok(())
    }

    async fn find_refresh_token(&self, token: &str) -> Result<Option<RefreshTokenRecord>> {
        let model = entities::RefreshTokenEntity::find_by_id(token.to_string())
            .one(&self.db)
            .await?;

        Ok(model.map(|model| model.to_record()))
    }

    async fn revoke_refresh_token(&self, token: &str, revoked_at: DateTime<Utc>) -> Result<()> {
        // Revoking an unknown token is a no-op; the ledger contract is
        // idempotent and the stamp is last-write-wins.
        let Some(found) = entities::RefreshTokenEntity::find_by_id(token.to_string())
            .one(&self.db)
            .await?
        else {
            return Ok(());
        };

        let mut model: refresh_token::ActiveModel = found.into();
        model.revoked_at = Set(Some(revoked_at.into()));
        model.updated_at = Set(revoked_at.into());
        model.update(&self.db).await?;

        Ok(())
    }
}
