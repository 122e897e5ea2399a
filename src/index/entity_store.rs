//! Canonical entity collections and attribute lookup.
//!
//! The store owns the insertion-ordered lists of users, artists, albums,
//! songs and playlists, an id index for O(1) resolution, and one lookup-key
//! index per entity type. Key indexes are populated insert-if-absent, so for
//! duplicate keys the first-created entity always wins — the tie-break
//! policy callers rely on.

use super::models::{new_entity_id, Album, Artist, Playlist, Song, User};
use std::collections::HashMap;
use std::time::SystemTime;

#[derive(Debug, Default)]
pub struct EntityStore {
    users: Vec<User>,
    artists: Vec<Artist>,
    albums: Vec<Album>,
    songs: Vec<Song>,
    playlists: Vec<Playlist>,

    // id -> position in the corresponding list
    user_pos: HashMap<String, usize>,
    artist_pos: HashMap<String, usize>,
    album_pos: HashMap<String, usize>,
    song_pos: HashMap<String, usize>,
    playlist_pos: HashMap<String, usize>,

    // lookup key -> id of the first entity created with that key
    user_by_mobile: HashMap<String, String>,
    artist_by_name: HashMap<String, String>,
    album_by_title: HashMap<String, String>,
    song_by_title: HashMap<String, String>,
    playlist_by_title: HashMap<String, String>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Creation (unconditional append)
    // =========================================================================

    pub fn add_user(&mut self, name: &str, mobile: &str) -> &User {
        let user = User {
            id: new_entity_id(),
            name: name.to_string(),
            mobile: mobile.to_string(),
        };
        let pos = self.users.len();
        self.user_pos.insert(user.id.clone(), pos);
        self.user_by_mobile
            .entry(mobile.to_string())
            .or_insert_with(|| user.id.clone());
        self.users.push(user);
        &self.users[pos]
    }

    pub fn add_artist(&mut self, name: &str) -> &Artist {
        let artist = Artist {
            id: new_entity_id(),
            name: name.to_string(),
            likes: 0,
        };
        let pos = self.artists.len();
        self.artist_pos.insert(artist.id.clone(), pos);
        self.artist_by_name
            .entry(name.to_string())
            .or_insert_with(|| artist.id.clone());
        self.artists.push(artist);
        &self.artists[pos]
    }

    pub fn add_album(&mut self, title: &str, artist_id: &str) -> &Album {
        let album = Album {
            id: new_entity_id(),
            title: title.to_string(),
            artist_id: artist_id.to_string(),
        };
        let pos = self.albums.len();
        self.album_pos.insert(album.id.clone(), pos);
        self.album_by_title
            .entry(title.to_string())
            .or_insert_with(|| album.id.clone());
        self.albums.push(album);
        &self.albums[pos]
    }

    pub fn add_song(&mut self, title: &str, album_id: &str, length_secs: u32) -> &Song {
        let song = Song {
            id: new_entity_id(),
            title: title.to_string(),
            album_id: album_id.to_string(),
            length_secs,
            likes: 0,
        };
        let pos = self.songs.len();
        self.song_pos.insert(song.id.clone(), pos);
        self.song_by_title
            .entry(title.to_string())
            .or_insert_with(|| song.id.clone());
        self.songs.push(song);
        &self.songs[pos]
    }

    pub fn add_playlist(&mut self, title: &str, creator_id: &str) -> &Playlist {
        let playlist = Playlist {
            id: new_entity_id(),
            title: title.to_string(),
            creator_id: creator_id.to_string(),
            created: SystemTime::now(),
        };
        let pos = self.playlists.len();
        self.playlist_pos.insert(playlist.id.clone(), pos);
        self.playlist_by_title
            .entry(title.to_string())
            .or_insert_with(|| playlist.id.clone());
        self.playlists.push(playlist);
        &self.playlists[pos]
    }

    // =========================================================================
    // Lookup by key (first-created wins)
    // =========================================================================

    pub fn user_by_mobile(&self, mobile: &str) -> Option<&User> {
        self.user_by_mobile.get(mobile).and_then(|id| self.user(id))
    }

    pub fn artist_by_name(&self, name: &str) -> Option<&Artist> {
        self.artist_by_name.get(name).and_then(|id| self.artist(id))
    }

    pub fn album_by_title(&self, title: &str) -> Option<&Album> {
        self.album_by_title.get(title).and_then(|id| self.album(id))
    }

    pub fn song_by_title(&self, title: &str) -> Option<&Song> {
        self.song_by_title.get(title).and_then(|id| self.song(id))
    }

    pub fn playlist_by_title(&self, title: &str) -> Option<&Playlist> {
        self.playlist_by_title
            .get(title)
            .and_then(|id| self.playlist(id))
    }

    // =========================================================================
    // Lookup by id
    // =========================================================================

    pub fn user(&self, id: &str) -> Option<&User> {
        self.user_pos.get(id).map(|&pos| &self.users[pos])
    }

    pub fn artist(&self, id: &str) -> Option<&Artist> {
        self.artist_pos.get(id).map(|&pos| &self.artists[pos])
    }

    pub fn album(&self, id: &str) -> Option<&Album> {
        self.album_pos.get(id).map(|&pos| &self.albums[pos])
    }

    pub fn song(&self, id: &str) -> Option<&Song> {
        self.song_pos.get(id).map(|&pos| &self.songs[pos])
    }

    pub fn playlist(&self, id: &str) -> Option<&Playlist> {
        self.playlist_pos.get(id).map(|&pos| &self.playlists[pos])
    }

    pub fn artist_mut(&mut self, id: &str) -> Option<&mut Artist> {
        match self.artist_pos.get(id) {
            Some(&pos) => self.artists.get_mut(pos),
            None => None,
        }
    }

    pub fn song_mut(&mut self, id: &str) -> Option<&mut Song> {
        match self.song_pos.get(id) {
            Some(&pos) => self.songs.get_mut(pos),
            None => None,
        }
    }

    // =========================================================================
    // Iteration (insertion order)
    // =========================================================================

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_resolves_first_created_on_duplicate_key() {
        let mut store = EntityStore::new();
        let first_id = store.add_song("Echoes", "album-1", 100).id.clone();
        store.add_song("Echoes", "album-2", 200);

        let found = store.song_by_title("Echoes").unwrap();
        assert_eq!(found.id, first_id);
        assert_eq!(found.length_secs, 100);
        assert_eq!(store.songs().len(), 2);
    }

    #[test]
    fn test_lookup_by_id_after_duplicates() {
        let mut store = EntityStore::new();
        store.add_artist("Nina");
        let second_id = store.add_artist("Nina").id.clone();

        let by_id = store.artist(&second_id).unwrap();
        assert_eq!(by_id.id, second_id);
        // by-name lookup still points at the first one
        assert_ne!(store.artist_by_name("Nina").unwrap().id, second_id);
    }

    #[test]
    fn test_unknown_keys_resolve_to_none() {
        let store = EntityStore::new();
        assert!(store.user_by_mobile("000").is_none());
        assert!(store.artist_by_name("nobody").is_none());
        assert!(store.album_by_title("nothing").is_none());
        assert!(store.song_by_title("nothing").is_none());
        assert!(store.playlist_by_title("nothing").is_none());
    }

    #[test]
    fn test_iteration_preserves_creation_order() {
        let mut store = EntityStore::new();
        store.add_user("A", "1");
        store.add_user("B", "2");
        store.add_user("C", "3");
        let names: Vec<&str> = store.users().iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }
}
