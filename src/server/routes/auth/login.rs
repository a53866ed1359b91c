//! User login endpoint

use crate::auth::password::verify_password;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::ChirpError;
use actix_web::{HttpResponse, Result as ActixResult, web};
use chrono::Duration;
use tracing::{info, warn};

use super::models::{LoginRequest, LoginResponse};

/// User login endpoint
///
/// Verifies the password and issues one access token plus one refresh
/// token. Unknown email and wrong password are indistinguishable to the
/// caller.
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    let user = state
        .storage
        .database
        .find_user_by_email(&request.email)
        .await?
        .ok_or_else(|| {
            warn!("Login attempt for unknown email");
            ChirpError::unauthorized("Incorrect email or password")
        })?;

    if !verify_password(&request.password, &user.password_hash)? {
        warn!("Login attempt with wrong password for user: {}", user.id);
        return Err(ChirpError::unauthorized("Incorrect email or password").into());
    }

    let default_ttl = state.config.auth.access_token_ttl as i64;
    let ttl_seconds = request
        .expires_in_seconds
        .filter(|requested| *requested > 0)
        .map_or(default_ttl, |requested| requested.min(default_ttl));

    let access_token = state
        .auth
        .jwt()
        .create_access_token(user.id, Some(Duration::seconds(ttl_seconds)))?;

    let refresh_token = state.auth.refresh().issue(user.id).await?;

    info!("User logged in: {}", user.id);

    let response = LoginResponse {
        access_token,
        refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: ttl_seconds,
        user: user.to_public(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}
