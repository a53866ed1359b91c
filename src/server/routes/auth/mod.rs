//! Authentication endpoints
//!
//! Login, token refresh, and refresh-token revocation.

pub mod login;
pub mod models;
pub mod refresh;

use actix_web::web;

/// Configure authentication routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/login", web::post().to(login::login))
        .route("/api/refresh", web::post().to(refresh::refresh_token))
        .route("/api/revoke", web::post().to(refresh::revoke_token));
}
