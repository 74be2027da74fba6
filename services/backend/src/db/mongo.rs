use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, doc, Bson, Document};
use mongodb::{Client, Collection};
use serde_json::{Map, Value};
use tracing::debug;

use super::{SongStore, StoreError, StoreResult};
use crate::models::song::{Song, INTERNAL_ID};

const DATABASE: &str = "songs";
const COLLECTION: &str = "songs";

#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    songs: Collection<Document>,
}

impl MongoStore {
    /// Builds the client. The driver connects lazily, so this only fails on a
    /// malformed URL or unresolvable options.
    pub async fn new(url: &str) -> StoreResult<Self> {
        let client = Client::with_uri_str(url).await?;
        let songs = client.database(DATABASE).collection::<Document>(COLLECTION);
        Ok(Self { client, songs })
    }
}

fn to_document(song: &Song) -> StoreResult<Document> {
    Ok(bson::to_document(song)?)
}

fn to_json_object(mut document: Document) -> StoreResult<Map<String, Value>> {
    document.remove(INTERNAL_ID);
    match Bson::Document(document).into_relaxed_extjson() {
        Value::Object(object) => Ok(object),
        other => Err(StoreError::Invalid(format!("document is not an object: {other}"))),
    }
}

fn from_document(document: Document) -> StoreResult<Song> {
    Ok(Song::from_value(Value::Object(to_json_object(document)?))?)
}

#[async_trait]
impl SongStore for MongoStore {
    async fn ping(&self) -> StoreResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self.songs.count_documents(doc! {}).await?)
    }

    async fn list(&self) -> StoreResult<Vec<Map<String, Value>>> {
        let documents: Vec<Document> = self.songs.find(doc! {}).await?.try_collect().await?;
        documents.into_iter().map(to_json_object).collect()
    }

    async fn find(&self, id: i64) -> StoreResult<Option<Song>> {
        self.songs
            .find_one(doc! { "id": id })
            .await?
            .map(from_document)
            .transpose()
    }

    async fn insert(&self, song: &Song) -> StoreResult<String> {
        let result = self.songs.insert_one(to_document(song)?).await?;
        match result.inserted_id {
            Bson::ObjectId(oid) => Ok(oid.to_hex()),
            other => Ok(other.to_string()),
        }
    }

    async fn update(&self, id: i64, changes: &Map<String, Value>) -> StoreResult<u64> {
        let set = bson::to_document(changes)?;
        let result = self
            .songs
            .update_one(doc! { "id": id }, doc! { "$set": set })
            .await?;
        debug!(id, matched = result.matched_count, modified = result.modified_count, "song updated");
        Ok(result.matched_count)
    }

    async fn delete(&self, id: i64) -> StoreResult<u64> {
        Ok(self.songs.delete_one(doc! { "id": id }).await?.deleted_count)
    }

    async fn replace_all(&self, songs: &[Song]) -> StoreResult<()> {
        let documents = songs.iter().map(to_document).collect::<StoreResult<Vec<_>>>()?;
        self.songs.drop().await?;
        if documents.is_empty() {
            return Ok(());
        }
        let result = self.songs.insert_many(documents).await?;
        if result.inserted_ids.len() != songs.len() {
            return Err(StoreError::Invalid(format!(
                "inserted {} of {} seed songs",
                result.inserted_ids.len(),
                songs.len()
            )));
        }
        Ok(())
    }
}
