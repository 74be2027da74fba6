use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use tracing::info;

use crate::controllers::internal_error;
use crate::db::SongStore;
use crate::models::song::Song;

pub struct SongController;

fn message(status: StatusCode, key: &str, text: String) -> Response {
    let mut body = Map::new();
    body.insert(key.to_string(), Value::String(text));
    (status, Json(Value::Object(body))).into_response()
}

impl SongController {
    pub async fn list(store: &dyn SongStore) -> Response {
        match store.list().await {
            Ok(songs) => (StatusCode::OK, Json(json!({ "songs": songs }))).into_response(),
            Err(e) => internal_error("/song", e),
        }
    }

    pub async fn get(store: &dyn SongStore, id: i64) -> Response {
        match store.find(id).await {
            Ok(Some(song)) => (StatusCode::OK, Json(song)).into_response(),
            Ok(None) => message(
                StatusCode::NOT_FOUND,
                "message",
                "song with id not found".to_string(),
            ),
            Err(e) => internal_error("/song/<id>", e),
        }
    }

    pub async fn create(store: &dyn SongStore, payload: Value) -> Response {
        let song = match Song::from_value(payload) {
            Ok(song) => song,
            Err(e) => return internal_error("/song POST", e),
        };

        // Uniqueness of `id` is checked here, not by the collection.
        match store.find(song.id).await {
            Ok(Some(_)) => {
                return message(
                    StatusCode::FOUND,
                    "Message",
                    format!("song with id {} already present", song.id),
                );
            }
            Ok(None) => {}
            Err(e) => return internal_error("/song POST", e),
        }

        match store.insert(&song).await {
            Ok(inserted) => {
                info!("Created song {} as {}", song.id, inserted);
                (StatusCode::CREATED, Json(json!({ "inserted id": inserted }))).into_response()
            }
            Err(e) => internal_error("/song POST", e),
        }
    }

    /// Find, then `$set`, then re-read. The three calls are not atomic, so two
    /// concurrent writers to one id may interleave.
    pub async fn update(store: &dyn SongStore, id: i64, payload: Value) -> Response {
        let Value::Object(changes) = payload else {
            return internal_error("/song/<id> PUT", "request body must be a JSON object");
        };

        let existing = match store.find(id).await {
            Ok(Some(song)) => song,
            Ok(None) => return message(StatusCode::NOT_FOUND, "message", "song not found".to_string()),
            Err(e) => return internal_error("/song/<id> PUT", e),
        };

        let (Some(title), Some(lyrics)) = (changes.get("title"), changes.get("lyrics")) else {
            return internal_error(
                "/song/<id> PUT",
                "request body must include `title` and `lyrics`",
            );
        };
        let unchanged = existing.title() == Some(title) && existing.lyrics() == Some(lyrics);

        // The body may move the song to a new id, but only to another integer.
        let current_id = match changes.get("id") {
            None => id,
            Some(value) => match value.as_i64() {
                Some(new_id) => new_id,
                None => {
                    return internal_error(
                        "/song/<id> PUT",
                        format!("`id` must be an integer, got {value}"),
                    );
                }
            },
        };

        match store.update(id, &changes).await {
            Ok(0) => return message(StatusCode::NOT_FOUND, "message", "song not found".to_string()),
            Ok(_) => {}
            Err(e) => return internal_error("/song/<id> PUT", e),
        }

        if unchanged {
            return message(
                StatusCode::OK,
                "message",
                "song found, but nothing updated".to_string(),
            );
        }

        match store.find(current_id).await {
            Ok(Some(updated)) => (StatusCode::OK, Json(updated)).into_response(),
            Ok(None) => message(StatusCode::NOT_FOUND, "message", "song not found".to_string()),
            Err(e) => internal_error("/song/<id> PUT", e),
        }
    }

    pub async fn delete(store: &dyn SongStore, id: i64) -> Response {
        match store.delete(id).await {
            Ok(0) => message(StatusCode::NOT_FOUND, "message", "song not found".to_string()),
            Ok(_) => StatusCode::NO_CONTENT.into_response(),
            Err(e) => internal_error("/song/<id> DELETE", e),
        }
    }
}
