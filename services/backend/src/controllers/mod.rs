pub mod root;
pub mod song;
pub use root::RootController;
pub use song::SongController;

use std::fmt::Display;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Logs a failure at the handler boundary and turns it into `{"error": ...}` 500.
pub(crate) fn internal_error(endpoint: &str, e: impl Display) -> Response {
    error!("Error in {} endpoint: {}", endpoint, e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
        .into_response()
}
