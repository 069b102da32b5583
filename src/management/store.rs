use std::{
    collections::HashSet,
    io::{Error, ErrorKind},
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::{
    config,
    types::{PlaylistEntry, Recommendation, Song, Stored},
    utils,
};

pub const COLLECTION_IMPORTED_SONGS: &str = "imported_songs";
pub const COLLECTION_RECOMMENDATIONS: &str = "recommendations";
pub const COLLECTION_BUILT_PLAYLIST: &str = "built_playlist";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    IoError(#[from] Error),
    #[error("store collection is corrupt: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[error("unknown recommendation id: {0}")]
    UnknownRecommendation(String),
}

/// Flat record store with three independent collections.
///
/// Each collection is a JSON file under the store root. Writes replace the
/// whole collection: the new content goes to a temporary file that is then
/// renamed over the old one, so readers see either the previous or the new
/// list. Callers that share a store serialize writes (the server keeps it
/// behind a mutex).
#[derive(Debug, Clone)]
pub struct LibraryStore {
    root: PathBuf,
}

impl LibraryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Opens the store at the configured data directory.
    pub fn from_env() -> Self {
        Self::new(config::data_dir())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Replaces the imported songs with `songs`.
    ///
    /// Every record is stamped with the same `createdAt`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::IoError`] when the store directory or file cannot be written
    /// - [`StoreError::SerdeError`] when serialization fails
    pub async fn replace_imported_songs(&self, songs: &[Song]) -> Result<(), StoreError> {
        let created_at = utils::unix_now();
        let records: Vec<Stored<Song>> = songs
            .iter()
            .cloned()
            .map(|record| Stored { record, created_at })
            .collect();
        self.persist(COLLECTION_IMPORTED_SONGS, &records).await
    }

    pub async fn imported_songs(&self) -> Result<Vec<Stored<Song>>, StoreError> {
        self.load(COLLECTION_IMPORTED_SONGS).await
    }

    /// Replaces the stored recommendations.
    ///
    /// Built playlist entries pointing at recommendations that are no longer
    /// stored are dropped in the same call.
    pub async fn replace_recommendations(
        &self,
        recommendations: &[Recommendation],
    ) -> Result<(), StoreError> {
        let created_at = utils::unix_now();
        let records: Vec<Stored<Recommendation>> = recommendations
            .iter()
            .cloned()
            .map(|record| Stored { record, created_at })
            .collect();
        self.persist(COLLECTION_RECOMMENDATIONS, &records).await?;

        let ids: HashSet<&str> = recommendations.iter().map(|r| r.id.as_str()).collect();
        let entries = self.playlist().await?;
        let kept: Vec<PlaylistEntry> = entries
            .iter()
            .filter(|entry| ids.contains(entry.song_id.as_str()))
            .cloned()
            .collect();
        if kept.len() != entries.len() {
            self.persist(COLLECTION_BUILT_PLAYLIST, &kept).await?;
        }
        Ok(())
    }

    pub async fn recommendations(&self) -> Result<Vec<Stored<Recommendation>>, StoreError> {
        self.load(COLLECTION_RECOMMENDATIONS).await
    }

    /// Replaces the built playlist with entries for `song_ids`, in order.
    ///
    /// Every id must reference a stored recommendation; otherwise nothing is
    /// written.
    pub async fn replace_playlist(
        &self,
        song_ids: &[String],
    ) -> Result<Vec<PlaylistEntry>, StoreError> {
        let recommendations = self.recommendations().await?;
        let known: HashSet<&str> = recommendations
            .iter()
            .map(|r| r.record.id.as_str())
            .collect();

        if let Some(unknown) = song_ids.iter().find(|id| !known.contains(id.as_str())) {
            return Err(StoreError::UnknownRecommendation(unknown.clone()));
        }

        let added_at = utils::unix_now();
        let entries: Vec<PlaylistEntry> = song_ids
            .iter()
            .map(|song_id| PlaylistEntry {
                id: utils::generate_entry_id(),
                song_id: song_id.clone(),
                added_at,
            })
            .collect();

        self.persist(COLLECTION_BUILT_PLAYLIST, &entries).await?;
        Ok(entries)
    }

    pub async fn playlist(&self) -> Result<Vec<PlaylistEntry>, StoreError> {
        self.load(COLLECTION_BUILT_PLAYLIST).await
    }

    /// Removes all three collections.
    pub async fn clear(&self) -> Result<(), StoreError> {
        for collection in [
            COLLECTION_IMPORTED_SONGS,
            COLLECTION_RECOMMENDATIONS,
            COLLECTION_BUILT_PLAYLIST,
        ] {
            match async_fs::remove_file(self.get_path(collection)).await {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(StoreError::IoError(e)),
            }
        }
        Ok(())
    }

    async fn persist<T: Serialize>(&self, collection: &str, records: &[T]) -> Result<(), StoreError> {
        async_fs::create_dir_all(&self.root).await?;

        let json = serde_json::to_string_pretty(records)?;
        let path = self.get_path(collection);
        let tmp_path = path.with_extension("json.tmp");
        async_fs::write(&tmp_path, json).await?;
        async_fs::rename(&tmp_path, &path).await?;
        Ok(())
    }

    async fn load<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, StoreError> {
        let json = match async_fs::read_to_string(self.get_path(collection)).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::IoError(e)),
        };
        Ok(serde_json::from_str(&json)?)
    }

    fn get_path(&self, collection: &str) -> PathBuf {
        self.root.join(format!("{collection}.json"))
    }
}
