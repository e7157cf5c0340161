use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Token store file name in cache directory
const STORE_FILE: &str = "storage.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredEntry {
    value: String,
    stored_at: DateTime<Utc>,
}

/// Key-value store persisted as a JSON file, surviving process restarts.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store backed by `storage.json` inside `cache_dir`.
    pub fn new(cache_dir: PathBuf) -> Self {
        Self {
            path: cache_dir.join(STORE_FILE),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, StoredEntry>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = std::fs::read_to_string(&self.path)
            .context("Failed to read token store file")?;
        serde_json::from_str(&contents).context("Failed to parse token store file")
    }

    fn save(&self, entries: &BTreeMap<String, StoredEntry>) -> Result<()> {
        if entries.is_empty() {
            if self.path.exists() {
                std::fs::remove_file(&self.path).context("Failed to remove token store file")?;
            }
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, contents).context("Failed to write token store file")?;
        Ok(())
    }
}

impl super::TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key).map(|entry| entry.value))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.load()?;
        entries.insert(
            key.to_string(),
            StoredEntry {
                value: value.to_string(),
                stored_at: Utc::now(),
            },
        );
        self.save(&entries)?;
        debug!(key = key, path = %self.path.display(), "Stored value");
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
            debug!(key = key, path = %self.path.display(), "Deleted value");
        }
        Ok(())
    }

    fn stored_at(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        Ok(self.load()?.get(key).map(|entry| entry.stored_at))
    }
}
