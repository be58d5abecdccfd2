//! The progress engine: id-addressed operations over the owned
//! project collection.

use tracing::debug;
use unitrack_core::{Etc, Project, ProjectId, ProjectSnapshot, Time};
use unitrack_storage::Store;

use crate::error::EngineError;

/// Owns the ordered collection of projects and applies every mutation.
///
/// Insertion order is the display/iteration order. The engine is plain
/// synchronous single-writer code: every operation that reads the clock
/// takes `now` as a parameter, and the storage collaborator only ever
/// exchanges snapshots at the [`load`](ProgressEngine::load) /
/// [`persist`](ProgressEngine::persist) edges.
#[derive(Debug, Default)]
pub struct ProgressEngine {
    projects: Vec<Project>,
}

impl ProgressEngine {
    /// Create an engine with an empty collection.
    pub fn new() -> Self {
        Self { projects: Vec::new() }
    }

    fn get(&self, id: ProjectId) -> Result<&Project, EngineError> {
        self.projects
            .iter()
            .find(|p| p.id() == id)
            .ok_or(EngineError::NotFound(id))
    }

    fn get_mut(&mut self, id: ProjectId) -> Result<&mut Project, EngineError> {
        self.projects
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or(EngineError::NotFound(id))
    }

    /// Create a new empty project at the end of the collection and
    /// return its id.
    pub fn add_project(&mut self) -> ProjectId {
        let project = Project::new();
        let id = project.id();
        self.projects.push(project);
        debug!(%id, "project added");
        id
    }

    /// Remove a project permanently, returning the removed record.
    ///
    /// The relative order of the remaining projects is unchanged. Any
    /// "are you sure" confirmation belongs to the caller.
    pub fn delete_project(&mut self, id: ProjectId) -> Result<Project, EngineError> {
        let idx = self
            .projects
            .iter()
            .position(|p| p.id() == id)
            .ok_or(EngineError::NotFound(id))?;
        let removed = self.projects.remove(idx);
        debug!(%id, name = %removed.name, "project deleted");
        Ok(removed)
    }

    /// Start a project's timer at `now`.
    pub fn start_timer(&mut self, id: ProjectId, now: Time) -> Result<(), EngineError> {
        self.get_mut(id)?.start(now)?;
        debug!(%id, "timer started");
        Ok(())
    }

    /// Stop a project's timer, committing the delta since start.
    /// No-op when the timer is not running.
    pub fn stop_timer(&mut self, id: ProjectId, now: Time) -> Result<(), EngineError> {
        let project = self.get_mut(id)?;
        project.stop(now);
        debug!(%id, elapsed = project.elapsed(), "timer stopped");
        Ok(())
    }

    /// Display elapsed seconds at `now`: committed time plus the live
    /// in-flight delta. Commits nothing.
    pub fn tick(&self, id: ProjectId, now: Time) -> Result<f64, EngineError> {
        Ok(self.get(id)?.effective_elapsed(now))
    }

    /// Set a project's completed work quantity (clamped to the total;
    /// reaching the total stops the timer at `now`).
    pub fn update_current_units(
        &mut self,
        id: ProjectId,
        v: f64,
        now: Time,
    ) -> Result<(), EngineError> {
        self.get_mut(id)?.set_current_units(v, now)?;
        Ok(())
    }

    /// Set a project's total work quantity.
    pub fn update_total_units(
        &mut self,
        id: ProjectId,
        v: f64,
        now: Time,
    ) -> Result<(), EngineError> {
        self.get_mut(id)?.set_total_units(v, now)?;
        Ok(())
    }

    /// Rename a project.
    pub fn rename(&mut self, id: ProjectId, name: impl Into<String>) -> Result<(), EngineError> {
        self.get_mut(id)?.name = name.into();
        Ok(())
    }

    /// Replace a project's description.
    pub fn set_description(
        &mut self,
        id: ProjectId,
        text: impl Into<String>,
    ) -> Result<(), EngineError> {
        self.get_mut(id)?.description = text.into();
        Ok(())
    }

    /// Zero a project's totals, elapsed time and description, keeping
    /// its name.
    pub fn reset(&mut self, id: ProjectId) -> Result<(), EngineError> {
        self.get_mut(id)?.reset();
        debug!(%id, "project reset");
        Ok(())
    }

    /// Estimate a project's time to completion at `now`.
    pub fn compute_etc(&self, id: ProjectId, now: Time) -> Result<Etc, EngineError> {
        Ok(self.get(id)?.etc(now))
    }

    /// Read access to a single project.
    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id() == id)
    }

    /// All projects in insertion order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Number of projects.
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Capture the full ordered collection as plain snapshots.
    pub fn serialize(&self) -> Vec<ProjectSnapshot> {
        self.projects.iter().map(ProjectSnapshot::from).collect()
    }

    /// Rebuild an engine from persisted snapshots, in order.
    ///
    /// Records persisted with their timer running come back stopped
    /// with their committed elapsed time intact; a stale start
    /// timestamp from a previous process cannot be resumed safely.
    pub fn deserialize(snapshots: Vec<ProjectSnapshot>) -> Self {
        Self {
            projects: snapshots.into_iter().map(ProjectSnapshot::into_project).collect(),
        }
    }

    /// Load the collection from a store. Missing or corrupt data
    /// surfaces as an empty collection at the store layer.
    pub async fn load<S: Store>(store: &S) -> Result<Self, unitrack_storage::StorageError> {
        let snapshots = store.load().await?;
        debug!(count = snapshots.len(), "projects loaded");
        Ok(Self::deserialize(snapshots))
    }

    /// Persist the full collection to a store.
    pub async fn persist<S: Store>(
        &self,
        store: &mut S,
    ) -> Result<(), unitrack_storage::StorageError> {
        store.save(&self.serialize()).await
    }
}
