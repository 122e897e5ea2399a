//! Entity models for the in-memory index.
//!
//! Every entity carries an opaque random id distinct from its display
//! attributes. The human-readable fields (name, title, mobile) double as the
//! lookup keys used by callers; they are not required to be unique unless the
//! index is configured with `DuplicatePolicy::Reject`.

use rand::{rng, Rng};
use rand_distr::Alphanumeric;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Length of generated entity ids.
const ENTITY_ID_LEN: usize = 16;

/// Generate a random A-z0-9 entity id.
pub(crate) fn new_entity_id() -> String {
    let bytes = rng()
        .sample_iter(&Alphanumeric)
        .take(ENTITY_ID_LEN)
        .collect::<Vec<u8>>();
    String::from_utf8_lossy(&bytes).to_string()
}

// =============================================================================
// Core Entities
// =============================================================================

/// A registered user, looked up by mobile number.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub mobile: String,
}

/// Artist entity. The like counter is an aggregate over all songs under all
/// of the artist's albums, maintained incrementally by the like cascade.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub likes: u64,
}

/// Album entity. Belongs to exactly one artist, fixed at creation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub title: String,
    pub artist_id: String,
}

/// Song entity. Belongs to exactly one album, fixed at creation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub title: String,
    pub album_id: String,
    pub length_secs: u32,
    pub likes: u64,
}

/// Playlist entity. The creator is registered as the first listener.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub title: String,
    pub creator_id: String,
    pub created: SystemTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_shape() {
        let id = new_entity_id();
        assert_eq!(id.len(), 16);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_entity_ids_are_distinct() {
        assert_ne!(new_entity_id(), new_entity_id());
    }

    #[test]
    fn test_song_json_serialization() {
        let song = Song {
            id: "s1".to_string(),
            title: "Test Song".to_string(),
            album_id: "a1".to_string(),
            length_secs: 180,
            likes: 2,
        };
        let json = serde_json::to_string(&song).unwrap();
        let parsed: Song = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.title, song.title);
        assert_eq!(parsed.length_secs, 180);
        assert_eq!(parsed.likes, 2);
    }
}
