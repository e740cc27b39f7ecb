//! File-backed state store
//!
//! Persists each state key as a plain text file, `{dir}/{key}.txt`. An
//! absent file reads as "never written", not as an error. This is the
//! deployment default; the [`StateStore`] trait keeps the orchestrator
//! independent of where the watermark actually lives.

use crate::domain::{Result, StateStore, SyncError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::watch;

/// State store writing one text file per key.
pub struct FileStateStore {
    dir: PathBuf,
}

impl FileStateStore {
    /// Create a store rooted at `dir`. The directory is created on first
    /// write, not here.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.txt"))
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn get_state(
        &self,
        key: &str,
        shutdown: &watch::Receiver<bool>,
    ) -> Result<Option<String>> {
        if *shutdown.borrow() {
            return Err(SyncError::Cancelled);
        }

        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SyncError::State(format!(
                "Failed to read state file {}: {e}",
                path.display()
            ))),
        }
    }

    async fn set_state(
        &self,
        key: &str,
        value: &str,
        shutdown: &watch::Receiver<bool>,
    ) -> Result<()> {
        if *shutdown.borrow() {
            return Err(SyncError::Cancelled);
        }

        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            SyncError::State(format!(
                "Failed to create state directory {}: {e}",
                self.dir.display()
            ))
        })?;

        let path = self.path_for(key);
        tokio::fs::write(&path, value).await.map_err(|e| {
            SyncError::State(format!(
                "Failed to write state file {}: {e}",
                path.display()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn unsignalled() -> watch::Receiver<bool> {
        // The receiver keeps the last value after the sender drops
        watch::channel(false).1
    }

    #[tokio::test]
    async fn missing_key_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStateStore::new(dir.path());

        let value = store.get_state("LastChecked", &unsignalled()).await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn round_trips_a_value() {
        let dir = TempDir::new().unwrap();
        let store = FileStateStore::new(dir.path().join("state"));
        let shutdown = unsignalled();

        store
            .set_state("LastChecked", "2020-12-17T14:39:00Z", &shutdown)
            .await
            .unwrap();
        let value = store.get_state("LastChecked", &shutdown).await.unwrap();
        assert_eq!(value.as_deref(), Some("2020-12-17T14:39:00Z"));
    }

    #[tokio::test]
    async fn overwrites_previous_value() {
        let dir = TempDir::new().unwrap();
        let store = FileStateStore::new(dir.path());
        let shutdown = unsignalled();

        store.set_state("k", "first", &shutdown).await.unwrap();
        store.set_state("k", "second", &shutdown).await.unwrap();
        let value = store.get_state("k", &shutdown).await.unwrap();
        assert_eq!(value.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn honours_the_shutdown_signal() {
        let dir = TempDir::new().unwrap();
        let store = FileStateStore::new(dir.path());
        let (tx, rx) = watch::channel(false);
        tx.send(true).unwrap();

        assert!(matches!(
            store.get_state("k", &rx).await,
            Err(SyncError::Cancelled)
        ));
        assert!(matches!(
            store.set_state("k", "v", &rx).await,
            Err(SyncError::Cancelled)
        ));
    }
}
