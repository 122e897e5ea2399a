//! Derived relationship mappings.
//!
//! Seven append-only mappings kept consistent with the entity store:
//! artist→albums, album→songs, playlist→songs, playlist→listeners,
//! creator→playlists, user→playlists and song→likers. All lists preserve
//! insertion order; nothing is ever removed.
//!
//! The creator→playlists mapping is list-valued: a creator keeps every
//! playlist they ever created, not just the most recent one.

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct RelationshipIndex {
    artist_albums: HashMap<String, Vec<String>>,
    album_songs: HashMap<String, Vec<String>>,
    playlist_songs: HashMap<String, Vec<String>>,
    playlist_listeners: HashMap<String, Vec<String>>,
    creator_playlists: HashMap<String, Vec<String>>,
    user_playlists: HashMap<String, Vec<String>>,
    song_likers: HashMap<String, Vec<String>>,
}

fn ids_of<'a>(map: &'a HashMap<String, Vec<String>>, key: &str) -> &'a [String] {
    map.get(key).map(Vec::as_slice).unwrap_or(&[])
}

impl RelationshipIndex {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Catalog ownership
    // =========================================================================

    pub fn link_album(&mut self, artist_id: &str, album_id: &str) {
        self.artist_albums
            .entry(artist_id.to_string())
            .or_default()
            .push(album_id.to_string());
    }

    pub fn link_song(&mut self, album_id: &str, song_id: &str) {
        self.album_songs
            .entry(album_id.to_string())
            .or_default()
            .push(song_id.to_string());
    }

    pub fn albums_of(&self, artist_id: &str) -> &[String] {
        ids_of(&self.artist_albums, artist_id)
    }

    pub fn songs_of(&self, album_id: &str) -> &[String] {
        ids_of(&self.album_songs, album_id)
    }

    // =========================================================================
    // Playlist membership
    // =========================================================================

    pub fn playlist_add_song(&mut self, playlist_id: &str, song_id: &str) {
        self.playlist_songs
            .entry(playlist_id.to_string())
            .or_default()
            .push(song_id.to_string());
    }

    pub fn playlist_add_listener(&mut self, playlist_id: &str, user_id: &str) {
        self.playlist_listeners
            .entry(playlist_id.to_string())
            .or_default()
            .push(user_id.to_string());
    }

    pub fn record_created_playlist(&mut self, creator_id: &str, playlist_id: &str) {
        self.creator_playlists
            .entry(creator_id.to_string())
            .or_default()
            .push(playlist_id.to_string());
    }

    pub fn user_add_playlist(&mut self, user_id: &str, playlist_id: &str) {
        self.user_playlists
            .entry(user_id.to_string())
            .or_default()
            .push(playlist_id.to_string());
    }

    pub fn is_listener(&self, playlist_id: &str, user_id: &str) -> bool {
        self.listeners_of(playlist_id).iter().any(|id| id == user_id)
    }

    pub fn playlist_song_ids(&self, playlist_id: &str) -> &[String] {
        ids_of(&self.playlist_songs, playlist_id)
    }

    pub fn listeners_of(&self, playlist_id: &str) -> &[String] {
        ids_of(&self.playlist_listeners, playlist_id)
    }

    pub fn playlists_created_by(&self, creator_id: &str) -> &[String] {
        ids_of(&self.creator_playlists, creator_id)
    }

    pub fn playlists_of_user(&self, user_id: &str) -> &[String] {
        ids_of(&self.user_playlists, user_id)
    }

    // =========================================================================
    // Likes
    // =========================================================================

    pub fn add_like(&mut self, song_id: &str, user_id: &str) {
        self.song_likers
            .entry(song_id.to_string())
            .or_default()
            .push(user_id.to_string());
    }

    pub fn has_liked(&self, song_id: &str, user_id: &str) -> bool {
        self.likers_of(song_id).iter().any(|id| id == user_id)
    }

    pub fn likers_of(&self, song_id: &str) -> &[String] {
        ids_of(&self.song_likers, song_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_keys_yield_empty_slices() {
        let relations = RelationshipIndex::new();
        assert!(relations.albums_of("a").is_empty());
        assert!(relations.songs_of("a").is_empty());
        assert!(relations.playlist_song_ids("p").is_empty());
        assert!(relations.listeners_of("p").is_empty());
        assert!(relations.playlists_created_by("u").is_empty());
        assert!(relations.playlists_of_user("u").is_empty());
        assert!(relations.likers_of("s").is_empty());
    }

    #[test]
    fn test_links_preserve_insertion_order() {
        let mut relations = RelationshipIndex::new();
        relations.link_album("artist", "alb-1");
        relations.link_album("artist", "alb-2");
        relations.link_song("alb-1", "s1");
        relations.link_song("alb-1", "s2");
        assert_eq!(relations.albums_of("artist"), ["alb-1", "alb-2"]);
        assert_eq!(relations.songs_of("alb-1"), ["s1", "s2"]);
    }

    #[test]
    fn test_creator_keeps_every_playlist() {
        let mut relations = RelationshipIndex::new();
        relations.record_created_playlist("user", "p1");
        relations.record_created_playlist("user", "p2");
        assert_eq!(relations.playlists_created_by("user"), ["p1", "p2"]);
    }

    #[test]
    fn test_listener_membership() {
        let mut relations = RelationshipIndex::new();
        relations.playlist_add_listener("p1", "u1");
        assert!(relations.is_listener("p1", "u1"));
        assert!(!relations.is_listener("p1", "u2"));
        assert!(!relations.is_listener("p2", "u1"));
    }

    #[test]
    fn test_like_membership() {
        let mut relations = RelationshipIndex::new();
        relations.add_like("s1", "u1");
        assert!(relations.has_liked("s1", "u1"));
        assert!(!relations.has_liked("s1", "u2"));
        assert_eq!(relations.likers_of("s1"), ["u1"]);
    }
}
