//! User registration and profile endpoints

use crate::auth::password::hash_password;
use crate::core::models::PublicUser;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::ChirpError;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde::Deserialize;
use tracing::info;

/// Configure user routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/users")
            .route(web::post().to(create_user))
            .route(web::put().to(update_user)),
    );
}

/// User registration / update request
#[derive(Debug, Deserialize)]
pub struct UserCredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Register a new user
pub async fn create_user(
    state: web::Data<AppState>,
    request: web::Json<UserCredentialsRequest>,
) -> ActixResult<HttpResponse> {
    validate_email(&request.email)?;

    if request.password.is_empty() {
        return Err(ChirpError::validation("Password must not be empty").into());
    }

    let password_hash = hash_password(&request.password)?;
    let user = state
        .storage
        .database
        .create_user(&request.email, &password_hash)
        .await?;

    info!("User created: {}", user.id);
    Ok(HttpResponse::Created().json(ApiResponse::<PublicUser>::success(user.to_public())))
}

/// Update the authenticated user's email and password
pub async fn update_user(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<UserCredentialsRequest>,
) -> ActixResult<HttpResponse> {
    let user_id = state.auth.authenticate_request(req.headers())?;

    validate_email(&request.email)?;

    if request.password.is_empty() {
        return Err(ChirpError::validation("Password must not be empty").into());
    }

    let password_hash = hash_password(&request.password)?;
    let user = state
        .storage
        .database
        .update_user_credentials(user_id, &request.email, &password_hash)
        .await?;

    info!("User updated: {}", user.id);
    Ok(HttpResponse::Ok().json(ApiResponse::<PublicUser>::success(user.to_public())))
}

/// Minimal email shape check
fn validate_email(email: &str) -> Result<(), ChirpError> {
    let well_formed = email.contains('@') && !email.starts_with('@') && !email.ends_with('@');
    if well_formed {
        Ok(())
    } else {
        Err(ChirpError::validation("Invalid email address"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("walt@breakingbad.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("@nodomain").is_err());
        assert!(validate_email("nouser@").is_err());
    }
}
