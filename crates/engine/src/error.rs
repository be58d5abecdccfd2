//! Engine error type.

use unitrack_core::{ProjectError, ProjectId};

/// Errors that can occur during engine operations.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EngineError {
    /// The referenced project is not in the collection.
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// A record-level mutation was rejected.
    #[error(transparent)]
    Project(#[from] ProjectError),
}
