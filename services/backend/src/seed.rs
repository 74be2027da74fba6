use std::path::Path;

use anyhow::Context;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::models::song::Song;

fn read_seed(path: &Path) -> anyhow::Result<Vec<Song>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;
    let records: Vec<Value> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array", path.display()))?;
    let songs = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match Song::from_value(record) {
            Ok(song) => Some(song),
            Err(e) => {
                warn!("Skipping seed song at index {}: {}", index, e);
                None
            }
        })
        .collect();
    Ok(songs)
}

/// Loads the seed songs. A file that cannot be read or parsed is logged and
/// yields no seeds; records without an integer `id` are skipped.
pub fn load_seed(path: &Path) -> Vec<Song> {
    match read_seed(path) {
        Ok(songs) => {
            info!("Loaded {} seed songs from {}", songs.len(), path.display());
            songs
        }
        Err(e) => {
            error!("Error loading JSON file: {:#}", e);
            Vec::new()
        }
    }
}
