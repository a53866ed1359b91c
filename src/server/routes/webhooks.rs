//! Billing provider webhook
//!
//! The only caller is the payment provider, authorized by the static
//! service API key under the `ApiKey` scheme. The webhook is not tied to
//! any user identity.

use crate::server::state::AppState;
use crate::utils::error::ChirpError;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde::Deserialize;
use tracing::{debug, info};
use uuid::Uuid;

/// Event name that triggers a tier upgrade
const USER_UPGRADED_EVENT: &str = "user.upgraded";

/// Configure webhook routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/polka/webhooks", web::post().to(polka_webhook));
}

/// Webhook payload
#[derive(Debug, Deserialize)]
pub struct WebhookRequest {
    pub event: String,
    pub data: WebhookData,
}

/// Webhook payload data
#[derive(Debug, Deserialize)]
pub struct WebhookData {
    pub user_id: Uuid,
}

/// Handle a billing event
///
/// Unrecognized events are acknowledged without action so the provider
/// does not retry them.
pub async fn polka_webhook(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<WebhookRequest>,
) -> ActixResult<HttpResponse> {
    state.auth.authenticate_service_caller(req.headers())?;

    if request.event != USER_UPGRADED_EVENT {
        debug!("Ignoring webhook event: {}", request.event);
        return Ok(HttpResponse::NoContent().finish());
    }

    state
        .storage
        .database
        .upgrade_user_to_red(request.data.user_id)
        .await?
        .ok_or_else(|| ChirpError::not_found("User not found"))?;

    info!("User upgraded to Chirpd Red: {}", request.data.user_id);
    Ok(HttpResponse::NoContent().finish())
}
