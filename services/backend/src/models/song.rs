use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field name of the store-internal document identifier.
pub const INTERNAL_ID: &str = "_id";

/// A song document. `id` is the application-level key; every other field is
/// carried through untouched.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Song {
    pub id: i64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Song {
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let mut song: Song = serde_json::from_value(value)?;
        song.fields.remove(INTERNAL_ID);
        Ok(song)
    }

    pub fn title(&self) -> Option<&Value> {
        self.fields.get("title")
    }

    pub fn lyrics(&self) -> Option<&Value> {
        self.fields.get("lyrics")
    }
}
