//! Unitrack core data model.
//!
//! This crate defines the project record that the progress engine
//! operates on: work totals, the two-state activity timer, and the
//! plain snapshot form used for persistence.

#![warn(missing_docs)]

mod error;
mod id;
mod project;
mod snapshot;

pub use error::ProjectError;
pub use id::ProjectId;
pub use project::{Etc, Project};
pub use snapshot::ProjectSnapshot;

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
