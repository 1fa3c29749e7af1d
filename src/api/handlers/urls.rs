//! Handlers for creating and inspecting shortened URLs.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::url::{CreateUrlRequest, UrlResponse, is_shortcut_segment};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a shortened URL.
///
/// # Endpoint
///
/// `POST /api/urls`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/" }
/// ```
///
/// # Response
///
/// 201 Created with a [`UrlResponse`].
///
/// # Errors
///
/// - 400 Bad Request if `url` is not an absolute URL (nothing is created)
/// - 500 Internal Server Error if no free shortcut could be generated
pub async fn create_url_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUrlRequest>,
) -> Result<(StatusCode, Json<UrlResponse>), AppError> {
    payload.validate()?;

    let url = state.url_service.create(payload.url).await?;

    Ok((
        StatusCode::CREATED,
        Json(UrlResponse::new(url, state.url_service.links())),
    ))
}

/// Returns a shortened URL's details without recording usage.
///
/// # Endpoint
///
/// `GET /api/urls/{shortcut}`
///
/// # Errors
///
/// Returns 404 Not Found if the shortcut doesn't exist.
pub async fn url_detail_handler(
    Path(shortcut): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UrlResponse>, AppError> {
    if !is_shortcut_segment(&shortcut) {
        return Err(AppError::not_found(
            "Shortcut not found",
            json!({ "shortcut": shortcut }),
        ));
    }

    let url = state.url_service.get(&shortcut).await?;

    Ok(Json(UrlResponse::new(url, state.url_service.links())))
}
