use axum::{
    extract::{rejection::JsonRejection, FromRequestParts, Path, State},
    http::{request::Parts, StatusCode},
    response::Response,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::controllers::{internal_error, SongController};
use crate::AppState;

/// `{id}` path segment. Only unsigned decimal integers match; anything else
/// is treated as an unmatched route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SongId(pub i64);

impl SongId {
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        raw.parse().ok().map(SongId)
    }
}

impl<S> FromRequestParts<S> for SongId
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| StatusCode::NOT_FOUND)?;
        SongId::parse(&raw).ok_or(StatusCode::NOT_FOUND)
    }
}

pub fn song_routes() -> Router<AppState> {
    Router::new()
        .route("/song", get(list_songs_route).post(create_song_route))
        .route(
            "/song/{id}",
            get(get_song_route)
                .put(update_song_route)
                .delete(delete_song_route),
        )
}

pub async fn list_songs_route(State(state): State<AppState>) -> Response {
    SongController::list(state.store.as_ref()).await
}

pub async fn get_song_route(State(state): State<AppState>, SongId(id): SongId) -> Response {
    SongController::get(state.store.as_ref(), id).await
}

pub async fn create_song_route(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(payload)) => SongController::create(state.store.as_ref(), payload).await,
        Err(rejection) => internal_error("/song POST", rejection.body_text()),
    }
}

pub async fn update_song_route(
    State(state): State<AppState>,
    SongId(id): SongId,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(payload)) => SongController::update(state.store.as_ref(), id, payload).await,
        Err(rejection) => internal_error("/song/<id> PUT", rejection.body_text()),
    }
}

pub async fn delete_song_route(State(state): State<AppState>, SongId(id): SongId) -> Response {
    SongController::delete(state.store.as_ref(), id).await
}
