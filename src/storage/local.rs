//! Local filesystem storage implementation.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! ├── config.toml           # Application configuration
//! ├── locale.toml           # Optional message overrides
//! └── preferences.json      # Persisted preferences
//! ```

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::storage::{PreferenceStore, Preferences};

const PREFERENCES_KEY: &str = "preferences.json";

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.path(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl PreferenceStore for LocalStorage {
    async fn load(&self) -> Result<Preferences> {
        match self.read_json::<Preferences>(PREFERENCES_KEY).await {
            Ok(prefs) => Ok(prefs.unwrap_or_default()),
            Err(AppError::Json(e)) => {
                log::warn!("Ignoring unreadable {}: {}", PREFERENCES_KEY, e);
                Ok(Preferences::default())
            }
            Err(e) => Err(e),
        }
    }

    async fn save(&self, preferences: &Preferences) -> Result<()> {
        self.write_json(PREFERENCES_KEY, preferences).await?;
        log::debug!("Saved preferences to {}", self.path(PREFERENCES_KEY).display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Language;

    #[tokio::test]
    async fn missing_file_means_english() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());
        assert_eq!(storage.load_language().await.unwrap(), Language::En);
    }

    #[tokio::test]
    async fn language_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("nested"));
        storage.save_language(Language::Zh).await.unwrap();

        let raw = std::fs::read_to_string(dir.path().join("nested/preferences.json")).unwrap();
        assert!(raw.contains(r#""fw_lang": "zh""#));
        assert!(!dir.path().join("nested/preferences.tmp").exists());

        let reopened = LocalStorage::new(dir.path().join("nested"));
        assert_eq!(reopened.load_language().await.unwrap(), Language::Zh);
    }

    #[tokio::test]
    async fn garbage_or_unknown_values_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());

        std::fs::write(dir.path().join(PREFERENCES_KEY), "{not json").unwrap();
        assert_eq!(storage.load_language().await.unwrap(), Language::En);

        std::fs::write(dir.path().join(PREFERENCES_KEY), r#"{"fw_lang":"de"}"#).unwrap();
        assert_eq!(storage.load_language().await.unwrap(), Language::En);
    }
}
