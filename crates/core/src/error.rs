//! Errors raised by project record mutations.

/// Errors that can occur when mutating a project record.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ProjectError {
    /// Numeric input was negative or not a finite number.
    #[error("invalid value: {0}")]
    InvalidValue(f64),

    /// Timer is already running.
    #[error("timer is already running")]
    AlreadyRunning,

    /// Project is already complete; the timer cannot be started.
    #[error("project is already complete")]
    Completed,
}
