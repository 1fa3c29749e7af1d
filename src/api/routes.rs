//! API route configuration.

use crate::api::handlers::{create_url_handler, url_detail_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// JSON API routes, nested under `/api`.
///
/// # Endpoints
///
/// - `POST /urls`            - Shorten a URL
/// - `GET  /urls/{shortcut}` - Inspect a shortened URL without recording usage
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/urls", post(create_url_handler))
        .route("/urls/{shortcut}", get(url_detail_handler))
}
