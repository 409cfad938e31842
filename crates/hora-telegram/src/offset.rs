//! Durable update cursor.

use hora_core::error::HoraError;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

#[derive(Debug, Serialize, Deserialize)]
struct OffsetRecord {
    offset: i64,
}

/// JSON file holding `{"offset": n}`, the next update id to request.
#[derive(Debug, Clone)]
pub struct OffsetStore {
    path: PathBuf,
}

impl OffsetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted offset. A missing file means nothing was seen yet.
    pub async fn load(&self) -> Result<i64, HoraError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no offset file at {}, starting from 0", self.path.display());
                return Ok(0);
            }
            Err(e) => {
                return Err(HoraError::Offset(format!(
                    "failed reading {}: {e}",
                    self.path.display()
                )))
            }
        };

        let record: OffsetRecord = serde_json::from_str(&raw).map_err(|e| {
            HoraError::Offset(format!("failed parsing {}: {e}", self.path.display()))
        })?;
        if record.offset < 0 {
            return Err(HoraError::Offset(format!(
                "negative offset {} in {}",
                record.offset,
                self.path.display()
            )));
        }
        Ok(record.offset)
    }

    /// Replace the persisted offset: write a sibling temp file, then rename it over.
    pub async fn save(&self, offset: i64) -> Result<(), HoraError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let tmp = self.path.with_extension("tmp");
        let payload = serde_json::to_vec(&OffsetRecord { offset })?;
        fs::write(&tmp, payload).await?;
        fs::rename(&tmp, &self.path).await?;
        debug!("saved offset {offset} to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_loads_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = OffsetStore::new(dir.path().join("offset.json"));
        assert_eq!(store.load().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = OffsetStore::new(dir.path().join("offset.json"));
        store.save(815_000_123).await.unwrap();
        assert_eq!(store.load().await.unwrap(), 815_000_123);

        // A fresh handle on the same path sees the same value, as after a restart.
        let reopened = OffsetStore::new(store.path());
        assert_eq!(reopened.load().await.unwrap(), 815_000_123);
    }

    #[tokio::test]
    async fn test_save_overwrites_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("offset.json");
        let store = OffsetStore::new(&path);
        store.save(10).await.unwrap();
        store.save(11).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw, r#"{"offset":11}"#);
        assert!(!path.with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = OffsetStore::new(dir.path().join("state/telegram/offset.json"));
        store.save(3).await.unwrap();
        assert_eq!(store.load().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("offset.json");
        std::fs::write(&path, "{\"cursor\": 4}").unwrap();
        let err = OffsetStore::new(&path).load().await.unwrap_err();
        assert!(matches!(err, HoraError::Offset(_)));
    }

    #[tokio::test]
    async fn test_negative_offset_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("offset.json");
        std::fs::write(&path, r#"{"offset": -1}"#).unwrap();
        assert!(OffsetStore::new(&path).load().await.is_err());
    }
}
