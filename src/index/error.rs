//! Error taxonomy for index operations.

use thiserror::Error;

/// Errors surfaced by index operations.
///
/// The `*NotFound` variants carry the lookup key that failed to resolve.
/// `ConsistencyViolation` indicates a broken internal invariant (an entity
/// whose owner reference does not resolve) and is not a recoverable caller
/// error.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("artist not found: {0}")]
    ArtistNotFound(String),

    #[error("album not found: {0}")]
    AlbumNotFound(String),

    #[error("song not found: {0}")]
    SongNotFound(String),

    #[error("playlist not found: {0}")]
    PlaylistNotFound(String),

    #[error("duplicate {field}: {value}")]
    DuplicateKey { field: &'static str, value: String },

    #[error("invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },

    #[error("consistency violation: {0}")]
    ConsistencyViolation(String),
}
