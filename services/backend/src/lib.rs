pub mod controllers;
pub mod db;
pub mod models;
pub mod routers;
pub mod secrets;
pub mod seed;

use std::sync::Arc;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::db::SongStore;
use crate::routers::{count_route, health_check_route, song_routes};

/// Shared request state: the store handle created once at startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SongStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn SongStore>) -> Self {
        AppState { store }
    }
}

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", axum::routing::get(health_check_route))
        .route("/count", axum::routing::get(count_route))
        .merge(song_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
