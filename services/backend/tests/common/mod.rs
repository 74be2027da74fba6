//! Common test utilities for E2E tests

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use songs_backend::db::{replace_collection, MemoryStore, SongStore, StoreError, StoreResult};
use songs_backend::models::song::Song;
use songs_backend::seed::load_seed;
use songs_backend::{app, AppState};
use tokio::net::TcpListener;

/// Test server instance
pub struct TestServer {
    pub addr: String,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Server over an in-memory store seeded from the bundled data file
    pub async fn new() -> Self {
        let store = MemoryStore::new();
        replace_collection(&store, &seed_songs()).await.unwrap();
        Self::with_store(Arc::new(store)).await
    }

    pub async fn with_store(store: Arc<dyn SongStore>) -> Self {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap();

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let router = app(AppState::new(store));
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            addr: format!("http://{}", addr),
            client,
        }
    }

    /// Get base URL for API requests
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }
}

pub fn seed_songs() -> Vec<Song> {
    load_seed(&PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/songs.json"))
}

/// Store whose every call fails, as an unreachable database would
pub struct FailingStore;

fn down() -> StoreError {
    StoreError::Invalid("connection refused".to_string())
}

#[async_trait]
impl SongStore for FailingStore {
    async fn ping(&self) -> StoreResult<()> {
        Err(down())
    }

    async fn count(&self) -> StoreResult<u64> {
        Err(down())
    }

    async fn list(&self) -> StoreResult<Vec<Map<String, Value>>> {
        Err(down())
    }

    async fn find(&self, _id: i64) -> StoreResult<Option<Song>> {
        Err(down())
    }

    async fn insert(&self, _song: &Song) -> StoreResult<String> {
        Err(down())
    }

    async fn update(&self, _id: i64, _changes: &Map<String, Value>) -> StoreResult<u64> {
        Err(down())
    }

    async fn delete(&self, _id: i64) -> StoreResult<u64> {
        Err(down())
    }

    async fn replace_all(&self, _songs: &[Song]) -> StoreResult<()> {
        Err(down())
    }
}
