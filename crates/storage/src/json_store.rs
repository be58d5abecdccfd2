//! Single-document JSON file storage.
//!
//! The whole project collection is stored as one pretty-printed JSON
//! array at a fixed path under the platform's application-data
//! directory. Writes go to a temp file first and are renamed into
//! place, so a crash mid-write leaves the previous document intact.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};
use unitrack_core::ProjectSnapshot;

use super::{Result, StorageError, Store};

/// Name of the persisted document.
pub const DATA_FILE_NAME: &str = "projects.json";

/// File-based JSON storage backend.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Create a store backed by an explicit file path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    /// Create a store at the well-known per-platform location,
    /// `<data_dir>/unitrack/projects.json`. Falls back to a dot
    /// directory under the home directory when the platform reports no
    /// data directory.
    pub fn default_location() -> Self {
        let dir = dirs::data_dir()
            .map(|d| d.join("unitrack"))
            .or_else(|| dirs::home_dir().map(|h| h.join(".unitrack")))
            .unwrap_or_else(|| PathBuf::from(".unitrack"));
        Self::new(dir.join(DATA_FILE_NAME))
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Store for JsonStore {
    async fn load(&self) -> Result<Vec<ProjectSnapshot>> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no data file, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&raw) {
            Ok(snapshots) => Ok(snapshots),
            Err(e) => {
                // A corrupt document must not take the app down.
                warn!(path = %self.path.display(), error = %e, "corrupt data file, starting empty");
                Ok(Vec::new())
            }
        }
    }

    async fn save(&mut self, snapshots: &[ProjectSnapshot]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(snapshots)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json.as_bytes()).await?;
        fs::rename(&tmp, &self.path).await.map_err(StorageError::Io)?;
        debug!(path = %self.path.display(), count = snapshots.len(), "saved projects");
        Ok(())
    }
}
