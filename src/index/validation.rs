//! Field validation and index integrity checks.
//!
//! Field validation runs on every creation operation and rejects input that
//! would poison the lookup indexes (empty keys, zero-length songs). The
//! integrity check walks the whole index and reports every invariant breach
//! it finds; on a consistent index it reports nothing.

use super::entity_store::EntityStore;
use super::error::IndexError;
use super::relations::RelationshipIndex;
use std::collections::HashSet;
use std::fmt;

// =============================================================================
// Field validation
// =============================================================================

pub(crate) fn require_nonempty(field: &'static str, value: &str) -> Result<(), IndexError> {
    if cfg!(feature = "no_checks") {
        return Ok(());
    }
    if value.trim().is_empty() {
        return Err(IndexError::InvalidField {
            field,
            reason: "must not be empty",
        });
    }
    Ok(())
}

pub(crate) fn require_song_length(length_secs: u32) -> Result<(), IndexError> {
    if cfg!(feature = "no_checks") {
        return Ok(());
    }
    if length_secs == 0 {
        return Err(IndexError::InvalidField {
            field: "length_secs",
            reason: "must be positive",
        });
    }
    Ok(())
}

// =============================================================================
// Integrity check
// =============================================================================

/// A single invariant breach found by `check`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityProblem {
    /// An album's `artist_id` does not resolve.
    MissingAlbumOwner { album_id: String, artist_id: String },
    /// A song's `album_id` does not resolve.
    MissingSongOwner { song_id: String, album_id: String },
    /// An album is missing from its owning artist's album list.
    AlbumNotInOwnerList { album_id: String, artist_id: String },
    /// A song is missing from its owning album's song list.
    SongNotInOwnerList { song_id: String, album_id: String },
    /// A song's like counter disagrees with its liker list.
    SongLikeCountMismatch {
        song_id: String,
        likes: u64,
        likers: usize,
    },
    /// An artist's aggregate counter disagrees with the per-song sum.
    ArtistLikeCountMismatch {
        artist_id: String,
        likes: u64,
        expected: u64,
    },
    /// The same user appears twice in a song's liker list.
    DuplicateLiker { song_id: String, user_id: String },
    /// A relationship list references an id that does not resolve.
    DanglingReference {
        relation: &'static str,
        from: String,
        to: String,
    },
}

impl fmt::Display for IntegrityProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityProblem::MissingAlbumOwner { album_id, artist_id } => {
                write!(f, "album {} references missing artist {}", album_id, artist_id)
            }
            IntegrityProblem::MissingSongOwner { song_id, album_id } => {
                write!(f, "song {} references missing album {}", song_id, album_id)
            }
            IntegrityProblem::AlbumNotInOwnerList { album_id, artist_id } => {
                write!(f, "album {} not listed under artist {}", album_id, artist_id)
            }
            IntegrityProblem::SongNotInOwnerList { song_id, album_id } => {
                write!(f, "song {} not listed under album {}", song_id, album_id)
            }
            IntegrityProblem::SongLikeCountMismatch { song_id, likes, likers } => {
                write!(
                    f,
                    "song {} has {} likes but {} listed likers",
                    song_id, likes, likers
                )
            }
            IntegrityProblem::ArtistLikeCountMismatch { artist_id, likes, expected } => {
                write!(
                    f,
                    "artist {} has {} likes, expected {} from song sums",
                    artist_id, likes, expected
                )
            }
            IntegrityProblem::DuplicateLiker { song_id, user_id } => {
                write!(f, "user {} listed twice as liker of song {}", user_id, song_id)
            }
            IntegrityProblem::DanglingReference { relation, from, to } => {
                write!(f, "{} entry {} references unknown id {}", relation, from, to)
            }
        }
    }
}

/// Walk the whole index and collect every invariant breach.
pub(crate) fn check(
    entities: &EntityStore,
    relations: &RelationshipIndex,
) -> Vec<IntegrityProblem> {
    let mut problems = Vec::new();

    for album in entities.albums() {
        match entities.artist(&album.artist_id) {
            Some(_) => {
                if !relations.albums_of(&album.artist_id).contains(&album.id) {
                    problems.push(IntegrityProblem::AlbumNotInOwnerList {
                        album_id: album.id.clone(),
                        artist_id: album.artist_id.clone(),
                    });
                }
            }
            None => problems.push(IntegrityProblem::MissingAlbumOwner {
                album_id: album.id.clone(),
                artist_id: album.artist_id.clone(),
            }),
        }
    }

    for song in entities.songs() {
        match entities.album(&song.album_id) {
            Some(_) => {
                if !relations.songs_of(&song.album_id).contains(&song.id) {
                    problems.push(IntegrityProblem::SongNotInOwnerList {
                        song_id: song.id.clone(),
                        album_id: song.album_id.clone(),
                    });
                }
            }
            None => problems.push(IntegrityProblem::MissingSongOwner {
                song_id: song.id.clone(),
                album_id: song.album_id.clone(),
            }),
        }

        let likers = relations.likers_of(&song.id);
        if song.likes as usize != likers.len() {
            problems.push(IntegrityProblem::SongLikeCountMismatch {
                song_id: song.id.clone(),
                likes: song.likes,
                likers: likers.len(),
            });
        }
        let mut seen = HashSet::new();
        for user_id in likers {
            if !seen.insert(user_id) {
                problems.push(IntegrityProblem::DuplicateLiker {
                    song_id: song.id.clone(),
                    user_id: user_id.clone(),
                });
            }
            if entities.user(user_id).is_none() {
                problems.push(IntegrityProblem::DanglingReference {
                    relation: "song_likers",
                    from: song.id.clone(),
                    to: user_id.clone(),
                });
            }
        }
    }

    for artist in entities.artists() {
        let mut expected = 0u64;
        for album_id in relations.albums_of(&artist.id) {
            if entities.album(album_id).is_none() {
                problems.push(IntegrityProblem::DanglingReference {
                    relation: "artist_albums",
                    from: artist.id.clone(),
                    to: album_id.clone(),
                });
                continue;
            }
            for song_id in relations.songs_of(album_id) {
                match entities.song(song_id) {
                    Some(song) => expected += song.likes,
                    None => problems.push(IntegrityProblem::DanglingReference {
                        relation: "album_songs",
                        from: album_id.clone(),
                        to: song_id.clone(),
                    }),
                }
            }
        }
        if artist.likes != expected {
            problems.push(IntegrityProblem::ArtistLikeCountMismatch {
                artist_id: artist.id.clone(),
                likes: artist.likes,
                expected,
            });
        }
    }

    for playlist in entities.playlists() {
        if entities.user(&playlist.creator_id).is_none() {
            problems.push(IntegrityProblem::DanglingReference {
                relation: "playlist_creator",
                from: playlist.id.clone(),
                to: playlist.creator_id.clone(),
            });
        }
        for song_id in relations.playlist_song_ids(&playlist.id) {
            if entities.song(song_id).is_none() {
                problems.push(IntegrityProblem::DanglingReference {
                    relation: "playlist_songs",
                    from: playlist.id.clone(),
                    to: song_id.clone(),
                });
            }
        }
        for user_id in relations.listeners_of(&playlist.id) {
            if entities.user(user_id).is_none() {
                problems.push(IntegrityProblem::DanglingReference {
                    relation: "playlist_listeners",
                    from: playlist.id.clone(),
                    to: user_id.clone(),
                });
            }
        }
    }

    for user in entities.users() {
        for playlist_id in relations.playlists_of_user(&user.id) {
            if entities.playlist(playlist_id).is_none() {
                problems.push(IntegrityProblem::DanglingReference {
                    relation: "user_playlists",
                    from: user.id.clone(),
                    to: playlist_id.clone(),
                });
            }
        }
        for playlist_id in relations.playlists_created_by(&user.id) {
            if entities.playlist(playlist_id).is_none() {
                problems.push(IntegrityProblem::DanglingReference {
                    relation: "creator_playlists",
                    from: user.id.clone(),
                    to: playlist_id.clone(),
                });
            }
        }
    }

    problems
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexError;

    #[test]
    fn test_require_nonempty_accepts_regular_values() {
        assert!(require_nonempty("name", "Nina").is_ok());
    }

    #[test]
    fn test_require_nonempty_rejects_whitespace_only() {
        let err = require_nonempty("name", "   ").unwrap_err();
        assert!(matches!(err, IndexError::InvalidField { field: "name", .. }));
    }

    #[test]
    fn test_require_song_length_rejects_zero() {
        assert!(require_song_length(180).is_ok());
        let err = require_song_length(0).unwrap_err();
        assert!(matches!(
            err,
            IndexError::InvalidField {
                field: "length_secs",
                ..
            }
        ));
    }

    #[test]
    fn test_check_reports_broken_ownership_chain() {
        let mut entities = EntityStore::new();
        let relations = RelationshipIndex::new();
        // Album pointing at an artist id that was never created.
        entities.add_album("Orphan", "no-such-artist");

        let problems = check(&entities, &relations);
        assert_eq!(problems.len(), 1);
        assert!(matches!(
            problems[0],
            IntegrityProblem::MissingAlbumOwner { .. }
        ));
    }

    #[test]
    fn test_check_reports_like_counter_mismatch() {
        let mut entities = EntityStore::new();
        let mut relations = RelationshipIndex::new();
        let artist_id = entities.add_artist("Nina").id.clone();
        let album_id = entities.add_album("Baltimore", &artist_id).id.clone();
        relations.link_album(&artist_id, &album_id);
        let song_id = entities.add_song("Feelings", &album_id, 240).id.clone();
        relations.link_song(&album_id, &song_id);
        let user_id = entities.add_user("Ada", "111").id.clone();

        // Liker recorded without bumping either counter.
        relations.add_like(&song_id, &user_id);

        let problems = check(&entities, &relations);
        assert!(problems
            .iter()
            .any(|p| matches!(p, IntegrityProblem::SongLikeCountMismatch { .. })));
        // Artist aggregate still matches: song counter was never bumped.
        assert!(!problems
            .iter()
            .any(|p| matches!(p, IntegrityProblem::ArtistLikeCountMismatch { .. })));
    }

    #[test]
    fn test_check_is_quiet_on_empty_index() {
        let entities = EntityStore::new();
        let relations = RelationshipIndex::new();
        assert!(check(&entities, &relations).is_empty());
    }
}
