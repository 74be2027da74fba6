use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::controllers::internal_error;
use crate::db::SongStore;

pub struct RootController;

impl RootController {
    pub async fn health_check(store: &dyn SongStore) -> Response {
        match store.ping().await {
            Ok(()) => (StatusCode::OK, Json(json!({ "status": "OK" }))).into_response(),
            Err(e) => {
                error!("Health check failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "status": "unhealthy", "error": e.to_string() })),
                )
                    .into_response()
            }
        }
    }

    pub async fn count(store: &dyn SongStore) -> Response {
        match store.count().await {
            Ok(count) => (StatusCode::OK, Json(json!({ "count": count }))).into_response(),
            Err(e) => internal_error("/count", e),
        }
    }
}
