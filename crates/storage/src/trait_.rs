//! Storage trait abstraction.

use async_trait::async_trait;
use unitrack_core::ProjectSnapshot;

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persistence collaborator for the project collection.
///
/// The whole ordered collection is read and written as one unit; the
/// store only ever sees snapshots, never live records. Different
/// backends can be plugged in behind this trait.
#[async_trait]
pub trait Store: Send + Sync {
    /// Load the full ordered collection.
    ///
    /// A missing or unreadable document is not an error at this layer's
    /// callers: implementations are expected to degrade to an empty
    /// collection wherever recovery is possible.
    async fn load(&self) -> Result<Vec<ProjectSnapshot>>;

    /// Replace the persisted collection with `snapshots`.
    async fn save(&mut self, snapshots: &[ProjectSnapshot]) -> Result<()>;
}
