//! Project record - work totals and the activity timer.

use chrono::Utc;

use crate::error::ProjectError;
use crate::id::ProjectId;
use crate::Time;

/// A project tracks a quantity of work and the active time spent on it.
///
/// The numeric fields are kept behind validated setters: `current_units`
/// is clamped into `0..=total_units` on every mutation, and reaching the
/// total while the timer runs commits the in-flight delta and stops it.
/// Committed `elapsed` seconds only ever change through the stop
/// transition (and [`Project::reset`]). Persistence goes through
/// [`crate::ProjectSnapshot`], never through this type directly.
#[derive(Debug, Clone)]
pub struct Project {
    /// Unique identifier
    id: ProjectId,

    /// Project name, may be empty
    pub name: String,

    /// Free-text notes
    pub description: String,

    /// Total work units
    total_units: f64,

    /// Completed work units, always within `0..=total_units`
    current_units: f64,

    /// Committed active seconds
    elapsed: f64,

    /// Set exactly while the timer runs; never persisted
    started_at: Option<Time>,

    /// When created
    pub created_at: Time,
}

/// Estimated time to completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Etc {
    /// Not enough signal: no total, no progress, or no elapsed time yet.
    Unknown,
    /// All work units are done.
    Complete,
    /// Estimated seconds remaining at the observed throughput.
    Remaining(f64),
}

impl std::fmt::Display for Etc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Etc::Unknown => write!(f, "--:--:--"),
            Etc::Complete => write!(f, "complete"),
            Etc::Remaining(secs) => {
                let whole = *secs as u64;
                write!(f, "{:02}:{:02}:{:02}", whole / 3600, (whole % 3600) / 60, whole % 60)
            }
        }
    }
}

fn validate(v: f64) -> Result<f64, ProjectError> {
    if !v.is_finite() || v < 0.0 {
        return Err(ProjectError::InvalidValue(v));
    }
    Ok(v)
}

impl Project {
    /// Create an empty project with a fresh id and zeroed work totals.
    pub fn new() -> Self {
        Self {
            id: ProjectId::new(),
            name: String::new(),
            description: String::new(),
            total_units: 0.0,
            current_units: 0.0,
            elapsed: 0.0,
            started_at: None,
            created_at: Utc::now(),
        }
    }

    /// Unique identifier, immutable after creation.
    pub fn id(&self) -> ProjectId {
        self.id
    }

    /// Total work units.
    pub fn total_units(&self) -> f64 {
        self.total_units
    }

    /// Completed work units.
    pub fn current_units(&self) -> f64 {
        self.current_units
    }

    /// Committed active seconds (excludes any in-flight timer delta).
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Whether the activity timer is currently running.
    pub fn timer_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Set the total work quantity.
    ///
    /// Fails on negative or non-finite input. If the new total is below
    /// `current_units`, the latter is clamped down; committed elapsed
    /// time is untouched by that clamp. A clamp that lands the project
    /// on completion stops the timer.
    pub fn set_total_units(&mut self, v: f64, now: Time) -> Result<(), ProjectError> {
        self.total_units = validate(v)?;
        if self.current_units > self.total_units {
            self.current_units = self.total_units;
        }
        if self.is_complete() {
            self.stop(now);
        }
        Ok(())
    }

    /// Set the completed work quantity.
    ///
    /// Fails on negative or non-finite input; otherwise the value is
    /// clamped to `total_units`. Reaching the total (with a positive
    /// total) stops the timer, committing the in-flight delta at `now`.
    pub fn set_current_units(&mut self, v: f64, now: Time) -> Result<(), ProjectError> {
        self.current_units = validate(v)?.min(self.total_units);
        if self.is_complete() {
            self.stop(now);
        }
        Ok(())
    }

    /// Whether all work units are done (requires a positive total).
    pub fn is_complete(&self) -> bool {
        self.total_units > 0.0 && self.current_units >= self.total_units
    }

    /// Start the activity timer at `now`.
    pub fn start(&mut self, now: Time) -> Result<(), ProjectError> {
        if self.started_at.is_some() {
            return Err(ProjectError::AlreadyRunning);
        }
        if self.is_complete() {
            return Err(ProjectError::Completed);
        }
        self.started_at = Some(now);
        Ok(())
    }

    /// Stop the activity timer, committing the delta since start.
    ///
    /// No-op when not running. The delta is floored at zero so a clock
    /// that went backwards cannot shrink the committed total.
    pub fn stop(&mut self, now: Time) {
        if let Some(started) = self.started_at.take() {
            let delta = (now - started).num_milliseconds() as f64 / 1000.0;
            self.elapsed += delta.max(0.0);
        }
    }

    /// Active seconds including the in-flight delta while running.
    ///
    /// Pure read used for the periodic display tick; nothing is
    /// committed, so a crash before the next stop cannot double-count.
    pub fn effective_elapsed(&self, now: Time) -> f64 {
        match self.started_at {
            Some(started) => {
                let live = (now - started).num_milliseconds() as f64 / 1000.0;
                self.elapsed + live.max(0.0)
            }
            None => self.elapsed,
        }
    }

    /// Estimate the time to completion from observed throughput.
    pub fn etc(&self, now: Time) -> Etc {
        if self.total_units <= 0.0 {
            return Etc::Unknown;
        }
        let remaining = self.total_units - self.current_units;
        if remaining <= 0.0 {
            return Etc::Complete;
        }
        let elapsed = self.effective_elapsed(now);
        if self.current_units <= 0.0 || elapsed <= 0.0 {
            return Etc::Unknown;
        }
        let throughput = self.current_units / elapsed;
        Etc::Remaining(remaining / throughput)
    }

    /// Completed fraction in `0..=1`; zero when there is no total.
    pub fn progress_ratio(&self) -> f64 {
        if self.total_units <= 0.0 {
            0.0
        } else {
            (self.current_units / self.total_units).clamp(0.0, 1.0)
        }
    }

    /// Zero the work totals, elapsed time and description, and stop the
    /// timer without committing. The name is preserved.
    pub fn reset(&mut self) {
        self.total_units = 0.0;
        self.current_units = 0.0;
        self.elapsed = 0.0;
        self.description.clear();
        self.started_at = None;
    }

    pub(crate) fn restore(
        id: ProjectId,
        name: String,
        description: String,
        total_units: f64,
        current_units: f64,
        elapsed: f64,
        created_at: Time,
    ) -> Self {
        // Clamp rather than reject: a hand-edited document should load.
        let total_units = if total_units.is_finite() { total_units.max(0.0) } else { 0.0 };
        let current_units = if current_units.is_finite() {
            current_units.clamp(0.0, total_units)
        } else {
            0.0
        };
        let elapsed = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };
        Self {
            id,
            name,
            description,
            total_units,
            current_units,
            elapsed,
            started_at: None,
            created_at,
        }
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn t0() -> Time {
        Utc::now()
    }

    fn project(total: f64, current: f64, elapsed: f64) -> Project {
        let now = t0();
        let mut p = Project::new();
        p.set_total_units(total, now).unwrap();
        p.set_current_units(current, now).unwrap();
        p.elapsed = elapsed;
        p
    }

    #[test]
    fn current_units_clamp_to_total() {
        let now = t0();
        let mut p = project(10.0, 0.0, 0.0);

        p.set_current_units(4.5, now).unwrap();
        assert_eq!(p.current_units(), 4.5);

        p.set_current_units(25.0, now).unwrap();
        assert_eq!(p.current_units(), 10.0);

        assert_eq!(p.set_current_units(-1.0, now), Err(ProjectError::InvalidValue(-1.0)));
        assert_eq!(p.current_units(), 10.0);

        assert!(p.set_current_units(f64::NAN, now).is_err());
    }

    #[test]
    fn lowering_total_clamps_current_but_not_elapsed() {
        let now = t0();
        let mut p = project(100.0, 60.0, 42.0);

        p.set_total_units(50.0, now).unwrap();
        assert_eq!(p.total_units(), 50.0);
        assert_eq!(p.current_units(), 50.0);
        assert_eq!(p.elapsed(), 42.0);
    }

    #[test]
    fn negative_total_is_rejected() {
        let now = t0();
        let mut p = project(10.0, 5.0, 0.0);
        assert!(p.set_total_units(-0.1, now).is_err());
        assert_eq!(p.total_units(), 10.0);
    }

    #[test]
    fn reaching_total_stops_timer() {
        let now = t0();
        let mut p = project(10.0, 0.0, 0.0);
        p.start(now).unwrap();

        p.set_current_units(10.0, now + Duration::seconds(30)).unwrap();
        assert!(!p.timer_running());
        assert_eq!(p.elapsed(), 30.0);
    }

    #[test]
    fn clamp_past_total_stops_timer() {
        let now = t0();
        let mut p = project(10.0, 0.0, 0.0);
        p.start(now).unwrap();

        p.set_current_units(99.0, now + Duration::seconds(5)).unwrap();
        assert_eq!(p.current_units(), 10.0);
        assert!(!p.timer_running());
        assert_eq!(p.elapsed(), 5.0);
    }

    #[test]
    fn lowering_total_onto_current_stops_timer() {
        let now = t0();
        let mut p = project(100.0, 40.0, 0.0);
        p.start(now).unwrap();

        p.set_total_units(40.0, now + Duration::seconds(10)).unwrap();
        assert!(!p.timer_running());
        assert_eq!(p.elapsed(), 10.0);
    }

    #[test]
    fn zero_total_never_counts_as_complete() {
        let now = t0();
        let mut p = project(0.0, 0.0, 0.0);
        p.start(now).unwrap();
        assert!(p.timer_running());
        assert!(!p.is_complete());
    }

    #[test]
    fn start_twice_fails() {
        let now = t0();
        let mut p = project(10.0, 0.0, 0.0);
        p.start(now).unwrap();
        assert_eq!(p.start(now), Err(ProjectError::AlreadyRunning));
    }

    #[test]
    fn start_on_completed_project_fails() {
        let now = t0();
        let mut p = project(10.0, 10.0, 0.0);
        assert_eq!(p.start(now), Err(ProjectError::Completed));
    }

    #[test]
    fn stop_commits_exact_simulated_delta() {
        let now = t0();
        let mut p = project(10.0, 0.0, 0.0);

        p.start(now).unwrap();
        p.stop(now + Duration::seconds(90));
        assert_eq!(p.elapsed(), 90.0);

        // A second session accumulates.
        p.start(now + Duration::seconds(100)).unwrap();
        p.stop(now + Duration::seconds(130));
        assert_eq!(p.elapsed(), 120.0);
    }

    #[test]
    fn stop_when_not_running_is_noop() {
        let now = t0();
        let mut p = project(10.0, 0.0, 7.0);
        p.stop(now);
        assert_eq!(p.elapsed(), 7.0);
    }

    #[test]
    fn backwards_clock_commits_zero_not_negative() {
        let now = t0();
        let mut p = project(10.0, 0.0, 5.0);
        p.start(now).unwrap();
        p.stop(now - Duration::seconds(60));
        assert_eq!(p.elapsed(), 5.0);
    }

    #[test]
    fn effective_elapsed_includes_live_delta_without_committing() {
        let now = t0();
        let mut p = project(10.0, 0.0, 100.0);
        p.start(now).unwrap();

        let later = now + Duration::seconds(20);
        assert_eq!(p.effective_elapsed(later), 120.0);
        assert_eq!(p.elapsed(), 100.0);
    }

    #[test]
    fn etc_from_throughput() {
        let now = t0();
        let p = project(100.0, 25.0, 50.0);
        // 0.5 units/sec observed, 75 units left.
        assert_eq!(p.etc(now), Etc::Remaining(150.0));
    }

    #[test]
    fn etc_uses_live_elapsed_while_running() {
        let now = t0();
        let mut p = project(100.0, 25.0, 25.0);
        p.start(now).unwrap();

        let later = now + Duration::seconds(25);
        assert_eq!(p.etc(later), Etc::Remaining(150.0));
    }

    #[test]
    fn etc_unknown_without_signal() {
        let now = t0();
        assert_eq!(project(0.0, 0.0, 50.0).etc(now), Etc::Unknown);
        assert_eq!(project(100.0, 0.0, 50.0).etc(now), Etc::Unknown);
        assert_eq!(project(100.0, 25.0, 0.0).etc(now), Etc::Unknown);
    }

    #[test]
    fn etc_complete_when_no_work_remains() {
        let now = t0();
        assert_eq!(project(100.0, 100.0, 50.0).etc(now), Etc::Complete);
    }

    #[test]
    fn etc_formats_as_hms() {
        assert_eq!(Etc::Remaining(3725.0).to_string(), "01:02:05");
        assert_eq!(Etc::Unknown.to_string(), "--:--:--");
        assert_eq!(Etc::Complete.to_string(), "complete");
    }

    #[test]
    fn reset_preserves_name_only() {
        let now = t0();
        let mut p = project(100.0, 25.0, 50.0);
        p.name = "thesis".to_string();
        p.description = "chapter 3".to_string();
        p.start(now).unwrap();

        p.reset();
        assert_eq!(p.name, "thesis");
        assert_eq!(p.description, "");
        assert_eq!(p.total_units(), 0.0);
        assert_eq!(p.current_units(), 0.0);
        assert_eq!(p.elapsed(), 0.0);
        assert!(!p.timer_running());
    }
}
