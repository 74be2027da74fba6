//! Song persistence. Handlers only see [`SongStore`]; the MongoDB driver and
//! the in-process store both sit behind it.

pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::info;

use crate::models::song::Song;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Driver(#[from] mongodb::error::Error),
    #[error("could not encode document: {0}")]
    Encode(#[from] mongodb::bson::ser::Error),
    #[error("could not decode document: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0}")]
    Invalid(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Single-document operations over the `songs` collection, keyed by the
/// application-level `id`.
#[async_trait]
pub trait SongStore: Send + Sync {
    async fn ping(&self) -> StoreResult<()>;

    async fn count(&self) -> StoreResult<u64>;

    /// Every stored document with `_id` removed. Fields are returned as
    /// stored, so a document another client wrote with a non-integer `id`
    /// is still listed.
    async fn list(&self) -> StoreResult<Vec<Map<String, Value>>>;

    async fn find(&self, id: i64) -> StoreResult<Option<Song>>;

    /// Returns the store-internal identifier of the new document.
    async fn insert(&self, song: &Song) -> StoreResult<String>;

    /// Merges `changes` into the first document with this `id`. Returns the
    /// number of matched documents.
    async fn update(&self, id: i64, changes: &Map<String, Value>) -> StoreResult<u64>;

    /// Returns the number of deleted documents.
    async fn delete(&self, id: i64) -> StoreResult<u64>;

    /// Drops the collection and bulk-inserts `songs`.
    async fn replace_all(&self, songs: &[Song]) -> StoreResult<()>;
}

/// Destructive startup reload. Nothing happens when there are no seeds.
pub async fn replace_collection(store: &dyn SongStore, seeds: &[Song]) -> StoreResult<()> {
    if seeds.is_empty() {
        info!("No seed songs loaded, keeping existing collection");
        return Ok(());
    }
    store.replace_all(seeds).await?;
    info!("Replaced songs collection with {} seed songs", seeds.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn song(id: i64, title: &str) -> Song {
        Song::from_value(json!({"id": id, "title": title, "lyrics": "..."})).unwrap()
    }

    #[tokio::test]
    async fn replace_collection_swaps_contents() {
        let store = MemoryStore::new();
        store.insert(&song(99, "stale")).await.unwrap();

        replace_collection(&store, &[song(1, "a"), song(2, "b")])
            .await
            .unwrap();

        assert_eq!(store.count().await.unwrap(), 2);
        assert!(store.find(99).await.unwrap().is_none());
        assert_eq!(store.find(2).await.unwrap().unwrap().title(), Some(&json!("b")));
    }

    #[tokio::test]
    async fn replace_collection_without_seeds_keeps_data() {
        let store = MemoryStore::new();
        store.insert(&song(5, "live")).await.unwrap();

        replace_collection(&store, &[]).await.unwrap();

        assert_eq!(store.count().await.unwrap(), 1);
    }
}
