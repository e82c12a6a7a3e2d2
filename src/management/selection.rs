use std::path::{Path, PathBuf};

use crate::types::Artist;

/// Snapshot of the artists picked for the next playlist.
///
/// Order is selection order; it becomes the round-robin order when the
/// playlist is generated.
#[derive(Debug, Default)]
pub struct SelectionManager {
    artists: Vec<Artist>,
}

impl SelectionManager {
    pub fn new(artists: Vec<Artist>) -> Self {
        Self { artists }
    }

    pub async fn load() -> Result<Self, String> {
        Self::load_from(&Self::cache_path()).await
    }

    /// Loads the snapshot, starting empty if none was saved yet.
    pub async fn load_or_default() -> Self {
        Self::load().await.unwrap_or_default()
    }

    pub async fn load_from(path: &Path) -> Result<Self, String> {
        let content = async_fs::read_to_string(path)
            .await
            .map_err(|e| e.to_string())?;
        let artists: Vec<Artist> = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { artists })
    }

    pub async fn persist(&self) -> Result<(), String> {
        self.persist_to(&Self::cache_path()).await
    }

    pub async fn persist_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.artists).map_err(|e| e.to_string())?;
        async_fs::write(path, json)
            .await
            .map_err(|e| e.to_string())
    }

    /// Adds an artist unless one with the same id is already selected.
    pub fn add(&mut self, artist: Artist) -> bool {
        if self.contains(&artist.id) {
            return false;
        }
        self.artists.push(artist);
        true
    }

    pub fn remove(&mut self, artist_id: &str) -> Option<Artist> {
        let index = self.artists.iter().position(|a| a.id == artist_id)?;
        Some(self.artists.remove(index))
    }

    pub fn contains(&self, artist_id: &str) -> bool {
        self.artists.iter().any(|a| a.id == artist_id)
    }

    pub fn clear(&mut self) {
        self.artists.clear();
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn artist_ids(&self) -> Vec<String> {
        self.artists.iter().map(|a| a.id.clone()).collect()
    }

    pub fn count(&self) -> usize {
        self.artists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artists.is_empty()
    }

    fn cache_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("artistmix/state/selected-artists.json");
        path
    }
}
