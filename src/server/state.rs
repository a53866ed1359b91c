//! Application state shared across HTTP handlers

use crate::auth::AuthSystem;
use crate::config::Config;
use crate::storage::StorageLayer;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

/// HTTP server state shared across handlers
///
/// All fields are wrapped in `Arc` for cheap cloning into each worker. The
/// page-hit counter is explicit state here rather than a process global, so
/// the service is testable without a running server.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Authentication system
    pub auth: Arc<AuthSystem>,
    /// Storage layer
    pub storage: Arc<StorageLayer>,
    /// File server page-hit counter
    hits: Arc<AtomicI64>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, auth: AuthSystem, storage: StorageLayer) -> Self {
        Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
            storage: Arc::new(storage),
            hits: Arc::new(AtomicI64::new(0)),
        }
    }

    /// Record one page hit
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Current page-hit count
    pub fn hits(&self) -> i64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Reset the page-hit count to zero
    pub fn reset_hits(&self) {
        self.hits.store(0, Ordering::Relaxed);
    }
}
