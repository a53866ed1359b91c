//! Chirp endpoints
//!
//! Create, list, fetch, and delete chirps. Mutations require an access
//! token; deletion additionally requires ownership of the target chirp.

use crate::core::models::Chirp;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::ChirpError;
use crate::utils::validation::validate_chirp_body;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Configure chirp routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/chirps")
            .route(web::post().to(create_chirp))
            .route(web::get().to(list_chirps)),
    )
    .service(
        web::resource("/api/chirps/{chirp_id}")
            .route(web::get().to(get_chirp))
            .route(web::delete().to(delete_chirp)),
    )
    .route("/api/validate_chirp", web::post().to(validate_chirp));
}

/// Chirp creation request
#[derive(Debug, Deserialize)]
pub struct CreateChirpRequest {
    pub body: String,
}

/// Listing query parameters
#[derive(Debug, Deserialize)]
pub struct ListChirpsQuery {
    pub author_id: Option<Uuid>,
    pub sort: Option<String>,
}

/// Standalone body validation request
#[derive(Debug, Deserialize)]
pub struct ValidateChirpRequest {
    pub body: String,
}

/// Standalone body validation response
#[derive(Debug, Serialize)]
pub struct ValidateChirpResponse {
    pub cleaned_body: String,
}

/// Create a chirp authored by the authenticated user
pub async fn create_chirp(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<CreateChirpRequest>,
) -> ActixResult<HttpResponse> {
    let user_id = state.auth.authenticate_request(req.headers())?;

    let cleaned = validate_chirp_body(&request.body)?;
    let chirp = state.storage.database.create_chirp(&cleaned, user_id).await?;

    info!("Chirp created: {} by {}", chirp.id, user_id);
    Ok(HttpResponse::Created().json(ApiResponse::<Chirp>::success(chirp)))
}

/// List chirps, optionally filtered by author and sorted by creation time
pub async fn list_chirps(
    state: web::Data<AppState>,
    query: web::Query<ListChirpsQuery>,
) -> ActixResult<HttpResponse> {
    let mut chirps = match query.author_id {
        Some(author_id) => {
            state
                .storage
                .database
                .list_chirps_by_author(author_id)
                .await?
        }
        None => state.storage.database.list_chirps().await?,
    };

    // Storage returns ascending; only the descending case reorders.
    if query.sort.as_deref() == Some("desc") {
        chirps.reverse();
    }

    Ok(HttpResponse::Ok().json(ApiResponse::<Vec<Chirp>>::success(chirps)))
}

/// Fetch a single chirp
pub async fn get_chirp(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    let chirp_id = path.into_inner();

    let chirp = state
        .storage
        .database
        .find_chirp(chirp_id)
        .await?
        .ok_or_else(|| ChirpError::not_found("Chirp not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::<Chirp>::success(chirp)))
}

/// Delete a chirp; only the author may do so
pub async fn delete_chirp(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    let user_id = state.auth.authenticate_request(req.headers())?;
    let chirp_id = path.into_inner();

    // Existence is checked before ownership so strangers still get a 404
    // for chirps that never existed, but a 403 for ones they can see.
    let chirp = state
        .storage
        .database
        .find_chirp(chirp_id)
        .await?
        .ok_or_else(|| ChirpError::not_found("Chirp not found"))?;

    state.auth.authorize_ownership(user_id, chirp.user_id)?;

    state.storage.database.delete_chirp(chirp_id).await?;

    info!("Chirp deleted: {} by {}", chirp_id, user_id);
    Ok(HttpResponse::NoContent().finish())
}

/// Validate and clean a chirp body without storing anything
pub async fn validate_chirp(
    request: web::Json<ValidateChirpRequest>,
) -> ActixResult<HttpResponse> {
    let cleaned_body = validate_chirp_body(&request.body)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(ValidateChirpResponse { cleaned_body })))
}
