//! Handler for shortcut resolution.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use tracing::debug;

use crate::api::dto::url::is_shortcut_segment;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a shortcut to its original URL.
///
/// # Endpoint
///
/// `GET /{shortcut}/` (or `/{prefix}/{shortcut}/` when `RESOLVE_PREFIX` is set)
///
/// # Request Flow
///
/// 1. Reject path segments that cannot be shortcuts
/// 2. Atomically bump `use_count` and stamp `last_accessed` in the store
/// 3. Return 302 Found to the original URL
///
/// # Errors
///
/// Returns 404 Not Found if the shortcut doesn't exist. No usage data is
/// modified in that case.
pub async fn redirect_handler(
    Path(shortcut): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    if !is_shortcut_segment(&shortcut) {
        return Err(AppError::not_found(
            "Shortcut not found",
            json!({ "shortcut": shortcut }),
        ));
    }

    let original = state.url_service.resolve(&shortcut).await?;
    debug!(%shortcut, "Redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, original)]))
}
