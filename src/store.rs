//! Song store: the authoritative in-memory collection and its JSON
//! file mirror.
//!
//! The collection is a `Vec` in insertion order behind a single
//! `RwLock`; every lookup is a linear scan and every mutation rewrites
//! the whole document. That is the intended scale of this service.

use chrono::Utc;
use parking_lot::RwLock;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::{NewSong, Song, SongPatch};

/// On-disk document format: `{"songs": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct SongsDocument {
    songs: Vec<Song>,
}

/// JSON file-backed song store.
#[derive(Debug)]
pub struct SongStore {
    file_path: PathBuf,
    songs: RwLock<Vec<Song>>,
}

impl SongStore {
    /// Open the store, loading the whole collection into memory.
    ///
    /// A missing, unreadable, or malformed document is logged and the
    /// store starts empty; the service keeps running either way.
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        let file_path = file_path.as_ref().to_path_buf();
        let songs = match Self::load(&file_path) {
            Ok(songs) => {
                tracing::info!(path = %file_path.display(), count = songs.len(), "Loaded songs from file");
                songs
            }
            Err(e) => {
                tracing::warn!(path = %file_path.display(), error = %e, "Error loading songs data, starting empty");
                Vec::new()
            }
        };

        Self {
            file_path,
            songs: RwLock::new(songs),
        }
    }

    fn load(path: &Path) -> Result<Vec<Song>, crate::error::AppError> {
        let content = std::fs::read_to_string(path)?;
        let document: SongsDocument = serde_json::from_str(&content)?;
        Ok(document.songs)
    }

    /// Rewrite the full document, pretty-printed.
    ///
    /// A write failure is logged and swallowed: the in-memory state has
    /// already changed and the caller still reports success.
    fn persist(&self, songs: &[Song]) {
        let document = SongsDocument {
            songs: songs.to_vec(),
        };

        let result = serde_json::to_string_pretty(&document)
            .map_err(crate::error::AppError::from)
            .and_then(|content| std::fs::write(&self.file_path, content).map_err(Into::into));

        match result {
            Ok(()) => {
                tracing::debug!(path = %self.file_path.display(), count = songs.len(), "Saved songs to file")
            }
            Err(e) => {
                tracing::error!(path = %self.file_path.display(), error = %e, "Error writing songs to file")
            }
        }
    }

    /// Generate a fresh song ID: current millisecond timestamp plus a
    /// random offset. Good enough to avoid collisions in practice, not
    /// guaranteed unique.
    fn generate_id() -> i64 {
        Utc::now().timestamp_millis() + rand::thread_rng().gen_range(0..1_000_000)
    }

    /// All songs, in insertion order.
    pub fn all(&self) -> Vec<Song> {
        self.songs.read().clone()
    }

    /// First song with the given ID.
    pub fn find_by_id(&self, id: i64) -> Option<Song> {
        self.songs.read().iter().find(|s| s.song_id == id).cloned()
    }

    /// First song with exactly the given title.
    pub fn find_by_title(&self, title: &str) -> Option<Song> {
        self.songs.read().iter().find(|s| s.title == title).cloned()
    }

    /// All songs by exactly the given artist.
    pub fn find_by_artist(&self, artist: &str) -> Vec<Song> {
        self.songs
            .read()
            .iter()
            .filter(|s| s.artist == artist)
            .cloned()
            .collect()
    }

    /// All songs on exactly the given album.
    pub fn find_by_album(&self, album: &str) -> Vec<Song> {
        self.songs
            .read()
            .iter()
            .filter(|s| s.album == album)
            .cloned()
            .collect()
    }

    /// All songs of exactly the given genre.
    pub fn find_by_genre(&self, genre: &str) -> Vec<Song> {
        self.songs
            .read()
            .iter()
            .filter(|s| s.genre == genre)
            .cloned()
            .collect()
    }

    /// All songs released in the given year.
    pub fn find_by_year(&self, year: i32) -> Vec<Song> {
        self.songs
            .read()
            .iter()
            .filter(|s| s.release_date == year)
            .cloned()
            .collect()
    }

    /// Create a new song, append it, and persist the collection.
    pub fn create(&self, fields: NewSong) -> Song {
        let song = fields.into_song(Self::generate_id());

        let mut songs = self.songs.write();
        songs.push(song.clone());
        self.persist(&songs);
        drop(songs);

        tracing::debug!(song_id = song.song_id, "New song created");
        song
    }

    /// Shallow-merge the patch over the song with the given ID.
    ///
    /// Returns the merged record, or `None` if no song has that ID.
    pub fn update(&self, id: i64, patch: SongPatch) -> Option<Song> {
        let mut songs = self.songs.write();
        let index = songs.iter().position(|s| s.song_id == id)?;

        patch.apply(&mut songs[index]);
        let updated = songs[index].clone();
        self.persist(&songs);
        drop(songs);

        tracing::debug!(song_id = id, "Song updated");
        Some(updated)
    }

    /// Remove the song with the given ID and persist the collection.
    ///
    /// Returns the removed record, or `None` if no song has that ID.
    pub fn delete(&self, id: i64) -> Option<Song> {
        let mut songs = self.songs.write();
        let index = songs.iter().position(|s| s.song_id == id)?;

        let removed = songs.remove(index);
        self.persist(&songs);
        drop(songs);

        tracing::debug!(song_id = id, "Song deleted");
        Some(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn create_test_store() -> (tempfile::TempDir, SongStore) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("songs.json");
        let store = SongStore::new(&path);
        (dir, store)
    }

    fn sample_song() -> NewSong {
        NewSong {
            title: Some("One Dance".to_string()),
            artist: Some("Drake".to_string()),
            album: Some("Views".to_string()),
            genre: Some("pop".to_string()),
            release_date: Some(2016),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let (_dir, store) = create_test_store();
        assert!(store.all().is_empty());
    }

    #[test]
    fn test_malformed_file_starts_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("songs.json");
        std::fs::write(&path, "not json at all {").unwrap();

        let store = SongStore::new(&path);
        assert!(store.all().is_empty());
    }

    #[test]
    fn test_create_appends_with_fresh_id() {
        let (_dir, store) = create_test_store();

        let before = store.all().len();
        let song = store.create(sample_song());

        let songs = store.all();
        assert_eq!(songs.len(), before + 1);
        assert_eq!(songs.last().unwrap(), &song);
        assert_eq!(
            songs.iter().filter(|s| s.song_id == song.song_id).count(),
            1
        );
    }

    #[test]
    fn test_create_fills_defaults() {
        let (_dir, store) = create_test_store();

        let song = store.create(NewSong {
            title: Some("testing".to_string()),
            artist: Some("testing".to_string()),
            release_date: Some(2000),
            ..Default::default()
        });

        assert_eq!(song.title, "testing");
        assert_eq!(song.artist, "testing");
        assert_eq!(song.release_date, 2000);
        assert_eq!(song.album, "Unknown Album");
        assert_eq!(song.genre, "Unknown Genre");
        assert_eq!(song.song_review, "Not reviewed yet.");
        assert_eq!(song.lyrics, "No lyrics available.");
    }

    #[test]
    fn test_find_by_id_after_create() {
        let (_dir, store) = create_test_store();
        let song = store.create(sample_song());

        assert_eq!(store.find_by_id(song.song_id), Some(song));
        assert_eq!(store.find_by_id(999_999_999_999), None);
    }

    #[test]
    fn test_exact_match_filters() {
        let (_dir, store) = create_test_store();
        store.create(sample_song());
        store.create(NewSong {
            title: Some("Hotline Bling".to_string()),
            artist: Some("Drake".to_string()),
            release_date: Some(2015),
            ..Default::default()
        });

        assert_eq!(store.find_by_title("One Dance").unwrap().artist, "Drake");
        assert!(store.find_by_title("one dance").is_none()); // exact match only
        assert_eq!(store.find_by_artist("Drake").len(), 2);
        assert_eq!(store.find_by_album("Views").len(), 1);
        assert_eq!(store.find_by_genre("pop").len(), 1);
        assert_eq!(store.find_by_year(2015).len(), 1);
        assert!(store.find_by_year(1950).is_empty());
    }

    #[test]
    fn test_update_is_partial_merge() {
        let (_dir, store) = create_test_store();
        let song = store.create(sample_song());

        let updated = store
            .update(
                song.song_id,
                SongPatch {
                    album: Some("update working".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.album, "update working");
        assert_eq!(updated.title, song.title);
        assert_eq!(updated.artist, song.artist);
        assert_eq!(updated.song_id, song.song_id);
        assert_eq!(store.find_by_id(song.song_id), Some(updated));
    }

    #[test]
    fn test_update_missing_id() {
        let (_dir, store) = create_test_store();
        assert!(store.update(12345, SongPatch::default()).is_none());
    }

    #[test]
    fn test_delete_twice() {
        let (_dir, store) = create_test_store();
        let song = store.create(sample_song());

        let removed = store.delete(song.song_id).unwrap();
        assert_eq!(removed.song_id, song.song_id);
        assert!(store.delete(song.song_id).is_none());
        assert!(store.all().is_empty());
    }

    #[test]
    fn test_delete_preserves_order_of_remaining() {
        let (_dir, store) = create_test_store();
        let a = store.create(sample_song());
        let b = store.create(sample_song());
        let c = store.create(sample_song());

        store.delete(b.song_id);

        let ids: Vec<i64> = store.all().iter().map(|s| s.song_id).collect();
        assert_eq!(ids, vec![a.song_id, c.song_id]);
    }

    #[test]
    fn test_reload_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("songs.json");

        let store = SongStore::new(&path);
        let song = store.create(sample_song());
        store.update(
            song.song_id,
            SongPatch {
                song_review: Some("Goated Song".to_string()),
                ..Default::default()
            },
        );
        let expected = store.all();
        drop(store);

        let reloaded = SongStore::new(&path);
        assert_eq!(reloaded.all(), expected);
    }

    #[test]
    fn test_document_layout_on_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("songs.json");

        let store = SongStore::new(&path);
        store.create(sample_song());

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(value["songs"].is_array());
        assert_eq!(value["songs"].as_array().unwrap().len(), 1);
        // pretty-printed
        assert!(content.contains('\n'));
    }
}
