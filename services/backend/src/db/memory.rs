use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use super::{SongStore, StoreError, StoreResult};
use crate::models::song::Song;

/// In-process stand-in for the songs collection. Documents are kept as raw
/// JSON objects in insertion order, so `$set` can write any field, `id`
/// included, the same way the real collection allows.
#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<Vec<(ObjectId, Map<String, Value>)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_songs(songs: &[Song]) -> StoreResult<Self> {
        let store = Self::new();
        store.replace_all(songs).await?;
        Ok(store)
    }
}

fn to_object(song: &Song) -> StoreResult<Map<String, Value>> {
    match serde_json::to_value(song)? {
        Value::Object(object) => Ok(object),
        other => Err(StoreError::Invalid(format!("song is not an object: {other}"))),
    }
}

fn matches(document: &Map<String, Value>, id: i64) -> bool {
    document.get("id").and_then(Value::as_i64) == Some(id)
}

fn to_song(document: &Map<String, Value>) -> StoreResult<Song> {
    Ok(Song::from_value(Value::Object(document.clone()))?)
}

#[async_trait]
impl SongStore for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self.documents.read().await.len() as u64)
    }

    async fn list(&self) -> StoreResult<Vec<Map<String, Value>>> {
        Ok(self
            .documents
            .read()
            .await
            .iter()
            .map(|(_, document)| document.clone())
            .collect())
    }

    async fn find(&self, id: i64) -> StoreResult<Option<Song>> {
        self.documents
            .read()
            .await
            .iter()
            .find(|(_, document)| matches(document, id))
            .map(|(_, document)| to_song(document))
            .transpose()
    }

    async fn insert(&self, song: &Song) -> StoreResult<String> {
        let oid = ObjectId::new();
        self.documents.write().await.push((oid, to_object(song)?));
        Ok(oid.to_hex())
    }

    async fn update(&self, id: i64, changes: &Map<String, Value>) -> StoreResult<u64> {
        let mut documents = self.documents.write().await;
        let Some((_, document)) = documents.iter_mut().find(|(_, d)| matches(d, id)) else {
            return Ok(0);
        };
        for (key, value) in changes {
            document.insert(key.clone(), value.clone());
        }
        Ok(1)
    }

    async fn delete(&self, id: i64) -> StoreResult<u64> {
        let mut documents = self.documents.write().await;
        match documents.iter().position(|(_, d)| matches(d, id)) {
            Some(index) => {
                documents.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn replace_all(&self, songs: &[Song]) -> StoreResult<()> {
        let fresh = songs
            .iter()
            .map(|song| to_object(song).map(|object| (ObjectId::new(), object)))
            .collect::<StoreResult<Vec<_>>>()?;
        *self.documents.write().await = fresh;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn song(value: Value) -> Song {
        Song::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn insert_returns_distinct_hex_ids() {
        let store = MemoryStore::new();
        let a = store.insert(&song(json!({"id": 1}))).await.unwrap();
        let b = store.insert(&song(json!({"id": 2}))).await.unwrap();
        assert_ne!(a, b);
        assert_eq!(a.len(), 24);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn update_merges_fields() {
        let store = MemoryStore::new();
        store
            .insert(&song(json!({"id": 4, "title": "a", "lyrics": "b", "year": 1990})))
            .await
            .unwrap();

        let changes = json!({"title": "c", "mood": "calm"});
        let matched = store.update(4, changes.as_object().unwrap()).await.unwrap();
        assert_eq!(matched, 1);

        let stored = store.find(4).await.unwrap().unwrap();
        assert_eq!(stored.title(), Some(&json!("c")));
        assert_eq!(stored.lyrics(), Some(&json!("b")));
        assert_eq!(stored.fields["year"], json!(1990));
        assert_eq!(stored.fields["mood"], json!("calm"));
    }

    #[tokio::test]
    async fn update_and_delete_report_misses() {
        let store = MemoryStore::new();
        let changes = Map::new();
        assert_eq!(store.update(1, &changes).await.unwrap(), 0);
        assert_eq!(store.delete(1).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn delete_removes_only_first_match() {
        let store = MemoryStore::new();
        store.insert(&song(json!({"id": 8, "n": 1}))).await.unwrap();
        store.insert(&song(json!({"id": 8, "n": 2}))).await.unwrap();

        assert_eq!(store.delete(8).await.unwrap(), 1);
        let left = store.find(8).await.unwrap().unwrap();
        assert_eq!(left.fields["n"], json!(2));
    }

    #[tokio::test]
    async fn list_returns_documents_with_foreign_ids() {
        let store = MemoryStore::with_songs(&[song(json!({"id": 6, "title": "t"}))])
            .await
            .unwrap();
        let changes = json!({"id": "six"});
        store.update(6, changes.as_object().unwrap()).await.unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["id"], json!("six"));
        assert_eq!(listed[0]["title"], json!("t"));
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let store = MemoryStore::with_songs(&[song(json!({"id": 3})), song(json!({"id": 1}))])
            .await
            .unwrap();
        let ids: Vec<Value> = store.list().await.unwrap().iter().map(|d| d["id"].clone()).collect();
        assert_eq!(ids, vec![json!(3), json!(1)]);
    }
}
