//! Token refresh and revocation endpoints
//!
//! Both endpoints take the refresh token from the bearer authorization
//! header only, never from a request body.

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use tracing::{debug, info};

use super::models::RefreshResponse;

/// Exchange a refresh token for a new access token
pub async fn refresh_token(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> ActixResult<HttpResponse> {
    let user_id = state.auth.authenticate_refresh(req.headers()).await?;

    let access_token = state.auth.jwt().create_access_token(user_id, None)?;

    debug!("Access token refreshed for user: {}", user_id);

    let response = RefreshResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: state.config.auth.access_token_ttl as i64,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// Revoke the presented refresh token
///
/// Responds 204 regardless of whether the token was still live; revocation
/// is idempotent.
pub async fn revoke_token(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> ActixResult<HttpResponse> {
    let token = crate::auth::credentials::extract_bearer_token(req.headers())?;

    state.auth.refresh().revoke(&token).await?;

    info!("Refresh token revoked");
    Ok(HttpResponse::NoContent().finish())
}
