//! Tunedex — in-memory music catalog and playlist index.
//!
//! This library is the domain core consumed by an external presentation layer
//! (HTTP controller, CLI, or test harness). It owns the canonical entity
//! collections, the derived relationship index kept consistent with them, the
//! like-propagation cascade and the popularity queries.

pub mod config;
pub mod index;

// Re-export commonly used types for convenience
pub use config::{DuplicatePolicy, IndexConfig};
pub use index::{IndexError, IntegrityProblem, MusicIndex, SharedMusicIndex};
