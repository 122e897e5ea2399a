//! The music index: mutation operations and queries.
//!
//! `MusicIndex` owns the entity store and the relationship index and is the
//! only place that mutates them, so every multi-step update (album creation,
//! playlist registration, the like cascade) runs to completion without
//! interleaving. All checks and lookups happen before the first write; an
//! operation that fails leaves the index untouched.

use super::entity_store::EntityStore;
use super::error::IndexError;
use super::models::{Album, Artist, Playlist, Song, User};
use super::relations::RelationshipIndex;
use super::validation::{self, IntegrityProblem};
use crate::config::{DuplicatePolicy, IndexConfig};
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
pub struct MusicIndex {
    config: IndexConfig,
    entities: EntityStore,
    relations: RelationshipIndex,
}

impl MusicIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: IndexConfig) -> Self {
        Self {
            config,
            entities: EntityStore::new(),
            relations: RelationshipIndex::new(),
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    // =========================================================================
    // Entity creation
    // =========================================================================

    pub fn create_user(&mut self, name: &str, mobile: &str) -> Result<User, IndexError> {
        validation::require_nonempty("name", name)?;
        validation::require_nonempty("mobile", mobile)?;
        if self.rejects_duplicates() && self.entities.user_by_mobile(mobile).is_some() {
            return Err(IndexError::DuplicateKey {
                field: "mobile",
                value: mobile.to_string(),
            });
        }
        Ok(self.entities.add_user(name, mobile).clone())
    }

    pub fn create_artist(&mut self, name: &str) -> Result<Artist, IndexError> {
        validation::require_nonempty("name", name)?;
        if self.rejects_duplicates() && self.entities.artist_by_name(name).is_some() {
            return Err(IndexError::DuplicateKey {
                field: "artist name",
                value: name.to_string(),
            });
        }
        Ok(self.entities.add_artist(name).clone())
    }

    /// Create an album under the named artist, creating the artist first if
    /// no artist with that exact name exists yet.
    pub fn create_album(&mut self, title: &str, artist_name: &str) -> Result<Album, IndexError> {
        validation::require_nonempty("title", title)?;
        validation::require_nonempty("artist name", artist_name)?;
        if self.rejects_duplicates() && self.entities.album_by_title(title).is_some() {
            return Err(IndexError::DuplicateKey {
                field: "album title",
                value: title.to_string(),
            });
        }

        let artist_id = match self.entities.artist_by_name(artist_name) {
            Some(artist) => artist.id.clone(),
            None => {
                info!(artist = artist_name, "creating artist implicitly for new album");
                self.entities.add_artist(artist_name).id.clone()
            }
        };

        let album = self.entities.add_album(title, &artist_id).clone();
        self.relations.link_album(&artist_id, &album.id);
        Ok(album)
    }

    /// Create a song under the album with the given title. Fails with
    /// `AlbumNotFound` if the album does not resolve.
    pub fn create_song(
        &mut self,
        title: &str,
        album_title: &str,
        length_secs: u32,
    ) -> Result<Song, IndexError> {
        validation::require_nonempty("title", title)?;
        validation::require_song_length(length_secs)?;
        if self.rejects_duplicates() && self.entities.song_by_title(title).is_some() {
            return Err(IndexError::DuplicateKey {
                field: "song title",
                value: title.to_string(),
            });
        }

        let album_id = self
            .entities
            .album_by_title(album_title)
            .map(|album| album.id.clone())
            .ok_or_else(|| IndexError::AlbumNotFound(album_title.to_string()))?;

        let song = self.entities.add_song(title, &album_id, length_secs).clone();
        self.relations.link_song(&album_id, &song.id);
        Ok(song)
    }

    // =========================================================================
    // Playlist creation
    // =========================================================================

    /// Create a playlist holding every song whose length matches exactly, in
    /// global song creation order.
    pub fn create_playlist_by_length(
        &mut self,
        mobile: &str,
        title: &str,
        length_secs: u32,
    ) -> Result<Playlist, IndexError> {
        validation::require_nonempty("title", title)?;
        let user_id = self.resolve_user(mobile)?;
        self.check_new_playlist_title(title)?;

        let playlist = self.entities.add_playlist(title, &user_id).clone();
        let matching: Vec<String> = self
            .entities
            .songs()
            .iter()
            .filter(|song| song.length_secs == length_secs)
            .map(|song| song.id.clone())
            .collect();
        for song_id in &matching {
            self.relations.playlist_add_song(&playlist.id, song_id);
        }
        self.register_creator(&playlist.id, &user_id);
        info!(
            playlist = %playlist.title,
            songs = matching.len(),
            "created playlist by song length"
        );
        Ok(playlist)
    }

    /// Create a playlist from the given song titles. Titles that do not
    /// resolve are skipped; the playlist is still created.
    pub fn create_playlist_by_titles(
        &mut self,
        mobile: &str,
        title: &str,
        song_titles: &[&str],
    ) -> Result<Playlist, IndexError> {
        validation::require_nonempty("title", title)?;
        let user_id = self.resolve_user(mobile)?;
        self.check_new_playlist_title(title)?;

        let playlist = self.entities.add_playlist(title, &user_id).clone();
        for song_title in song_titles {
            match self.entities.song_by_title(song_title) {
                Some(song) => {
                    let song_id = song.id.clone();
                    self.relations.playlist_add_song(&playlist.id, &song_id);
                }
                None => debug!(song = song_title, "skipping unresolved song title"),
            }
        }
        self.register_creator(&playlist.id, &user_id);
        Ok(playlist)
    }

    /// Resolve a playlist by title for the given user. The creator and
    /// existing listeners get the playlist back without side effects; anyone
    /// else is registered as a new listener first.
    pub fn find_playlist(
        &mut self,
        mobile: &str,
        playlist_title: &str,
    ) -> Result<Playlist, IndexError> {
        let user_id = self.resolve_user(mobile)?;
        let playlist = self
            .entities
            .playlist_by_title(playlist_title)
            .ok_or_else(|| IndexError::PlaylistNotFound(playlist_title.to_string()))?
            .clone();

        if playlist.creator_id == user_id || self.relations.is_listener(&playlist.id, &user_id) {
            return Ok(playlist);
        }

        info!(playlist = %playlist.title, "registering new playlist listener");
        self.relations.playlist_add_listener(&playlist.id, &user_id);
        self.relations.user_add_playlist(&user_id, &playlist.id);
        Ok(playlist)
    }

    // =========================================================================
    // Like propagation
    // =========================================================================

    /// Like a song on behalf of a user and cascade the like to the owning
    /// artist. A repeat like by the same user is an idempotent no-op.
    pub fn like_song(&mut self, mobile: &str, song_title: &str) -> Result<Song, IndexError> {
        let user_id = self.resolve_user(mobile)?;
        let song = self
            .entities
            .song_by_title(song_title)
            .ok_or_else(|| IndexError::SongNotFound(song_title.to_string()))?
            .clone();

        if self.relations.has_liked(&song.id, &user_id) {
            debug!(song = %song.title, "duplicate like ignored");
            return Ok(song);
        }

        // Resolve the full ownership chain before touching any counter, so a
        // broken chain fails the operation without a partial update.
        let artist_id = self
            .entities
            .album(&song.album_id)
            .map(|album| album.artist_id.clone())
            .ok_or_else(|| {
                IndexError::ConsistencyViolation(format!(
                    "song {} references missing album {}",
                    song.id, song.album_id
                ))
            })?;
        if self.entities.artist(&artist_id).is_none() {
            return Err(IndexError::ConsistencyViolation(format!(
                "album {} references missing artist {}",
                song.album_id, artist_id
            )));
        }

        self.relations.add_like(&song.id, &user_id);
        let updated = {
            let song = self.entities.song_mut(&song.id).ok_or_else(|| {
                IndexError::ConsistencyViolation(format!("song {} vanished mid-update", song.id))
            })?;
            song.likes += 1;
            song.clone()
        };
        if let Some(artist) = self.entities.artist_mut(&artist_id) {
            artist.likes += 1;
        }
        Ok(updated)
    }

    // =========================================================================
    // Lookup service
    // =========================================================================

    pub fn find_user_by_mobile(&self, mobile: &str) -> Option<User> {
        self.entities.user_by_mobile(mobile).cloned()
    }

    pub fn find_artist_by_name(&self, name: &str) -> Option<Artist> {
        self.entities.artist_by_name(name).cloned()
    }

    pub fn find_album_by_title(&self, title: &str) -> Option<Album> {
        self.entities.album_by_title(title).cloned()
    }

    pub fn find_song_by_title(&self, title: &str) -> Option<Song> {
        self.entities.song_by_title(title).cloned()
    }

    pub fn find_playlist_by_title(&self, title: &str) -> Option<Playlist> {
        self.entities.playlist_by_title(title).cloned()
    }

    // =========================================================================
    // Relationship views
    // =========================================================================

    pub fn albums_of_artist(&self, artist_id: &str) -> Vec<Album> {
        self.relations
            .albums_of(artist_id)
            .iter()
            .filter_map(|id| self.entities.album(id))
            .cloned()
            .collect()
    }

    pub fn songs_in_album(&self, album_id: &str) -> Vec<Song> {
        self.relations
            .songs_of(album_id)
            .iter()
            .filter_map(|id| self.entities.song(id))
            .cloned()
            .collect()
    }

    pub fn songs_in_playlist(&self, playlist_id: &str) -> Vec<Song> {
        self.relations
            .playlist_song_ids(playlist_id)
            .iter()
            .filter_map(|id| self.entities.song(id))
            .cloned()
            .collect()
    }

    pub fn listeners_of_playlist(&self, playlist_id: &str) -> Vec<User> {
        self.relations
            .listeners_of(playlist_id)
            .iter()
            .filter_map(|id| self.entities.user(id))
            .cloned()
            .collect()
    }

    pub fn playlists_created_by(&self, user_id: &str) -> Vec<Playlist> {
        self.relations
            .playlists_created_by(user_id)
            .iter()
            .filter_map(|id| self.entities.playlist(id))
            .cloned()
            .collect()
    }

    pub fn playlists_of_user(&self, user_id: &str) -> Vec<Playlist> {
        self.relations
            .playlists_of_user(user_id)
            .iter()
            .filter_map(|id| self.entities.playlist(id))
            .cloned()
            .collect()
    }

    pub fn likers_of_song(&self, song_id: &str) -> Vec<User> {
        self.relations
            .likers_of(song_id)
            .iter()
            .filter_map(|id| self.entities.user(id))
            .cloned()
            .collect()
    }

    // =========================================================================
    // Aggregation queries
    // =========================================================================

    /// Most liked artist, recomputed by full scan. Ties go to the artist
    /// created last among those at the maximum; `None` when no artists exist.
    pub fn most_popular_artist(&self) -> Option<String> {
        let mut max = 0u64;
        let mut leader: Option<&Artist> = None;
        for artist in self.entities.artists() {
            if artist.likes >= max {
                leader = Some(artist);
                max = artist.likes;
            }
        }
        leader.map(|artist| artist.name.clone())
    }

    /// Most liked song among songs with at least one like, recomputed by
    /// full scan. `None` when nothing has ever been liked.
    pub fn most_popular_song(&self) -> Option<String> {
        let mut max = 0u64;
        let mut leader: Option<&Song> = None;
        for song in self.entities.songs() {
            if self.relations.likers_of(&song.id).is_empty() {
                continue;
            }
            if song.likes >= max {
                leader = Some(song);
                max = song.likes;
            }
        }
        leader.map(|song| song.title.clone())
    }

    // =========================================================================
    // Counts (for metrics)
    // =========================================================================

    pub fn users_count(&self) -> usize {
        self.entities.users().len()
    }

    pub fn artists_count(&self) -> usize {
        self.entities.artists().len()
    }

    pub fn albums_count(&self) -> usize {
        self.entities.albums().len()
    }

    pub fn songs_count(&self) -> usize {
        self.entities.songs().len()
    }

    pub fn playlists_count(&self) -> usize {
        self.entities.playlists().len()
    }

    // =========================================================================
    // Integrity
    // =========================================================================

    /// Verify every index invariant: owner references resolve, relationship
    /// targets exist, like counters match liker lists, artist aggregates
    /// match per-song sums. Empty on a consistent index.
    pub fn check_integrity(&self) -> Vec<IntegrityProblem> {
        let problems = validation::check(&self.entities, &self.relations);
        for problem in &problems {
            warn!(%problem, "index integrity problem");
        }
        problems
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn rejects_duplicates(&self) -> bool {
        self.config.duplicate_policy == DuplicatePolicy::Reject
    }

    fn resolve_user(&self, mobile: &str) -> Result<String, IndexError> {
        self.entities
            .user_by_mobile(mobile)
            .map(|user| user.id.clone())
            .ok_or_else(|| IndexError::UserNotFound(mobile.to_string()))
    }

    fn check_new_playlist_title(&self, title: &str) -> Result<(), IndexError> {
        if self.rejects_duplicates() && self.entities.playlist_by_title(title).is_some() {
            return Err(IndexError::DuplicateKey {
                field: "playlist title",
                value: title.to_string(),
            });
        }
        Ok(())
    }

    /// Register the creator of a freshly created playlist: first listener,
    /// entry in the creator map and in the user's playlist list.
    fn register_creator(&mut self, playlist_id: &str, user_id: &str) {
        self.relations.playlist_add_listener(playlist_id, user_id);
        self.relations.record_created_playlist(user_id, playlist_id);
        self.relations.user_add_playlist(user_id, playlist_id);
    }
}
