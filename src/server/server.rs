//! HTTP server core implementation

use crate::auth::AuthSystem;
use crate::config::{Config, ServerConfig};
use crate::server::middleware::HitCounterMiddleware;
use crate::server::routes;
use crate::server::state::AppState;
use crate::storage::StorageLayer;
use crate::utils::error::Result;
use actix_files::Files;
use actix_web::{App, HttpServer as ActixHttpServer, web};
use tracing::info;
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    ///
    /// Connects storage, runs migrations, and wires the auth system to the
    /// database-backed refresh token store.
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let storage = StorageLayer::new(&config.database).await?;
        let auth = AuthSystem::new(&config.auth, storage.database.clone());
        let state = AppState::new(config.clone(), auth, storage);

        Ok(Self {
            config: config.server.clone(),
            state,
        })
    }

    /// Start serving requests
    pub async fn start(self) -> Result<()> {
        let state = web::Data::new(self.state);
        let bind_addr = (self.config.host.clone(), self.config.port);

        info!("Serving on {}:{}", self.config.host, self.config.port);

        ActixHttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .wrap(TracingLogger::default())
                .configure(routes::health::configure_routes)
                .configure(routes::users::configure_routes)
                .configure(routes::auth::configure_routes)
                .configure(routes::chirps::configure_routes)
                .configure(routes::webhooks::configure_routes)
                .configure(routes::admin::configure_routes)
                .service(
                    web::scope("/app")
                        .wrap(HitCounterMiddleware)
                        .service(Files::new("/", "./static").index_file("index.html")),
                )
        })
        .bind(bind_addr)?
        .run()
        .await?;

        Ok(())
    }
}
