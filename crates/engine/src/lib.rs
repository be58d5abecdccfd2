//! Progress/ETC engine.
//!
//! Owns the ordered project collection for the lifetime of the process
//! and exposes every operation over it: timer transitions, validated
//! edits, ETC queries and snapshot (de)serialization.

#![warn(missing_docs)]

mod engine;
mod error;

pub use engine::ProgressEngine;
pub use error::EngineError;
