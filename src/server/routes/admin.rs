//! Admin endpoints
//!
//! Page-hit metrics and the dev-only reset.

use crate::server::state::AppState;
use crate::utils::error::ChirpError;
use actix_web::{HttpResponse, Result as ActixResult, web};
use tracing::{info, warn};

/// Configure admin routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/admin/metrics", web::get().to(metrics))
        .route("/admin/reset", web::post().to(reset));
}

/// Render the page-hit counter as HTML
pub async fn metrics(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let html = format!(
        "<html>\n  <body>\n    <h1>Welcome, Chirpd Admin</h1>\n    <p>Chirpd has been visited {} times!</p>\n  </body>\n</html>",
        state.hits()
    );

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}

/// Reset the hit counter and delete all users
///
/// Only allowed on the dev platform; destructive everywhere else.
pub async fn reset(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    if !state.config.is_dev_platform() {
        warn!("Reset requested outside the dev platform");
        return Err(ChirpError::forbidden("Reset only allowed in dev environment").into());
    }

    state.reset_hits();
    state.storage.database.delete_all_users().await?;

    info!("Hit counter reset and users deleted");
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Hits reset to 0"))
}
