//! Storage abstraction and implementations for unitrack.
//!
//! This crate provides a trait-based persistence interface with a
//! single-document JSON reference implementation.

#![warn(missing_docs)]

pub mod json_store;
pub mod trait_;

pub use json_store::JsonStore;
pub use trait_::{Result, StorageError, Store};
