//! Thread-safe wrapper around the index.
//!
//! The index's multi-step mutations are not individually atomic, so a
//! multi-threaded host must serialize whole operations. `SharedMusicIndex`
//! does that with one coarse lock held for the full duration of each call.
//! Lock poisoning is absorbed: no index invariant can be left broken by an
//! unwinding reader, since mutations validate before writing.

use super::error::IndexError;
use super::models::{Album, Artist, Playlist, Song, User};
use super::store::MusicIndex;
use super::validation::IntegrityProblem;
use crate::config::IndexConfig;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Clone, Debug, Default)]
pub struct SharedMusicIndex {
    inner: Arc<Mutex<MusicIndex>>,
}

impl SharedMusicIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: IndexConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MusicIndex::with_config(config))),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MusicIndex> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub fn create_user(&self, name: &str, mobile: &str) -> Result<User, IndexError> {
        self.lock().create_user(name, mobile)
    }

    pub fn create_artist(&self, name: &str) -> Result<Artist, IndexError> {
        self.lock().create_artist(name)
    }

    pub fn create_album(&self, title: &str, artist_name: &str) -> Result<Album, IndexError> {
        self.lock().create_album(title, artist_name)
    }

    pub fn create_song(
        &self,
        title: &str,
        album_title: &str,
        length_secs: u32,
    ) -> Result<Song, IndexError> {
        self.lock().create_song(title, album_title, length_secs)
    }

    pub fn create_playlist_by_length(
        &self,
        mobile: &str,
        title: &str,
        length_secs: u32,
    ) -> Result<Playlist, IndexError> {
        self.lock().create_playlist_by_length(mobile, title, length_secs)
    }

    pub fn create_playlist_by_titles(
        &self,
        mobile: &str,
        title: &str,
        song_titles: &[&str],
    ) -> Result<Playlist, IndexError> {
        self.lock().create_playlist_by_titles(mobile, title, song_titles)
    }

    pub fn find_playlist(&self, mobile: &str, playlist_title: &str) -> Result<Playlist, IndexError> {
        self.lock().find_playlist(mobile, playlist_title)
    }

    pub fn like_song(&self, mobile: &str, song_title: &str) -> Result<Song, IndexError> {
        self.lock().like_song(mobile, song_title)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn find_user_by_mobile(&self, mobile: &str) -> Option<User> {
        self.lock().find_user_by_mobile(mobile)
    }

    pub fn find_artist_by_name(&self, name: &str) -> Option<Artist> {
        self.lock().find_artist_by_name(name)
    }

    pub fn find_album_by_title(&self, title: &str) -> Option<Album> {
        self.lock().find_album_by_title(title)
    }

    pub fn find_song_by_title(&self, title: &str) -> Option<Song> {
        self.lock().find_song_by_title(title)
    }

    pub fn find_playlist_by_title(&self, title: &str) -> Option<Playlist> {
        self.lock().find_playlist_by_title(title)
    }

    pub fn albums_of_artist(&self, artist_id: &str) -> Vec<Album> {
        self.lock().albums_of_artist(artist_id)
    }

    pub fn songs_in_album(&self, album_id: &str) -> Vec<Song> {
        self.lock().songs_in_album(album_id)
    }

    pub fn songs_in_playlist(&self, playlist_id: &str) -> Vec<Song> {
        self.lock().songs_in_playlist(playlist_id)
    }

    pub fn listeners_of_playlist(&self, playlist_id: &str) -> Vec<User> {
        self.lock().listeners_of_playlist(playlist_id)
    }

    pub fn playlists_created_by(&self, user_id: &str) -> Vec<Playlist> {
        self.lock().playlists_created_by(user_id)
    }

    pub fn playlists_of_user(&self, user_id: &str) -> Vec<Playlist> {
        self.lock().playlists_of_user(user_id)
    }

    pub fn likers_of_song(&self, song_id: &str) -> Vec<User> {
        self.lock().likers_of_song(song_id)
    }

    pub fn most_popular_artist(&self) -> Option<String> {
        self.lock().most_popular_artist()
    }

    pub fn most_popular_song(&self) -> Option<String> {
        self.lock().most_popular_song()
    }

    pub fn users_count(&self) -> usize {
        self.lock().users_count()
    }

    pub fn artists_count(&self) -> usize {
        self.lock().artists_count()
    }

    pub fn albums_count(&self) -> usize {
        self.lock().albums_count()
    }

    pub fn songs_count(&self) -> usize {
        self.lock().songs_count()
    }

    pub fn playlists_count(&self) -> usize {
        self.lock().playlists_count()
    }

    pub fn check_integrity(&self) -> Vec<IntegrityProblem> {
        self.lock().check_integrity()
    }
}
