use axum::{extract::State, response::Response};

use crate::controllers::RootController;
use crate::AppState;

pub async fn health_check_route(State(state): State<AppState>) -> Response {
    RootController::health_check(state.store.as_ref()).await
}

pub async fn count_route(State(state): State<AppState>) -> Response {
    RootController::count(state.store.as_ref()).await
}
