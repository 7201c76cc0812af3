//! Axum router configuration.

use axum::{extract::DefaultBodyLimit, routing::post, Router};
use tower_http::trace::TraceLayer;

use super::uploads;

/// Create the API router.
///
/// `max_body_size` bounds how much of a request body is buffered before the
/// parser runs; larger bodies are refused with 413.
pub fn create_router(max_body_size: usize) -> Router {
    Router::new()
        .route("/uploads", post(uploads::ingest_upload))
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(TraceLayer::new_for_http())
}
