//! Persisted form of a project record.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::id::ProjectId;
use crate::project::Project;
use crate::Time;

/// Plain serializable capture of a [`Project`].
///
/// Carries every field except the live start timestamp. A raw timestamp
/// is useless after a restart, so only the `timer_running` flag is
/// written, and loading normalizes it back to stopped: committed
/// elapsed seconds survive, the in-flight delta of an unclean shutdown
/// is dropped rather than double-counted.
///
/// Every field defaults so that documents written by older versions
/// (or hand-edited ones with fields missing) still load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    /// Unique identifier
    #[serde(default)]
    pub id: ProjectId,

    /// Project name
    #[serde(default)]
    pub name: String,

    /// Free-text notes
    #[serde(default)]
    pub description: String,

    /// Total work units
    #[serde(default)]
    pub total_units: f64,

    /// Completed work units
    #[serde(default)]
    pub current_units: f64,

    /// Committed active seconds
    #[serde(default)]
    pub elapsed: f64,

    /// Whether the timer was running when the snapshot was taken
    #[serde(default)]
    pub timer_running: bool,

    /// When the project was created
    #[serde(default = "Utc::now")]
    pub created_at: Time,
}

impl From<&Project> for ProjectSnapshot {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id(),
            name: project.name.clone(),
            description: project.description.clone(),
            total_units: project.total_units(),
            current_units: project.current_units(),
            elapsed: project.elapsed(),
            timer_running: project.timer_running(),
            created_at: project.created_at,
        }
    }
}

impl ProjectSnapshot {
    /// Rebuild a project from its persisted form.
    ///
    /// The record always comes back with its timer stopped, whatever
    /// `timer_running` says; numeric fields are clamped back into the
    /// record's invariants.
    pub fn into_project(self) -> Project {
        Project::restore(
            self.id,
            self.name,
            self.description,
            self.total_units,
            self.current_units,
            self.elapsed,
            self.created_at,
        )
    }
}
