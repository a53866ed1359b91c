//! Storage layer
//!
//! Owns the database connection and exposes it to the rest of the service.
//! All mutable service state lives behind this layer; the subsystems above
//! it are stateless.

pub mod database;

use crate::config::DatabaseConfig;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::info;

pub use database::SeaOrmDatabase;

/// Storage layer holding the shared database handle
#[derive(Debug, Clone)]
pub struct StorageLayer {
    /// Database connection wrapper
    pub database: Arc<SeaOrmDatabase>,
}

impl StorageLayer {
    /// Connect to the database and run pending migrations
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        info!("Initializing storage layer");

        let database = SeaOrmDatabase::new(config).await?;
        database.migrate().await?;

        Ok(Self {
            database: Arc::new(database),
        })
    }
}
