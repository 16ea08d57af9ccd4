//! Song data model and request payload types.

use serde::{Deserialize, Serialize};

/// Track duration as stored on the wire: older documents carry a plain
/// number of seconds, newer writes carry a "m:ss" string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Duration {
    Seconds(i64),
    Text(String),
}

impl Default for Duration {
    fn default() -> Self {
        Duration::Seconds(0)
    }
}

/// A single song record.
///
/// Wire field names match the persisted JSON document. Missing fields
/// deserialize to the same defaults applied at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Unique identifier, generated at creation and never reassigned.
    #[serde(rename = "songID")]
    pub song_id: i64,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_artist")]
    pub artist: String,
    #[serde(default)]
    pub duration: Duration,
    #[serde(default = "default_genre")]
    pub genre: String,
    #[serde(default = "default_album")]
    pub album: String,
    #[serde(default)]
    pub release_date: i32,
    #[serde(default = "default_review")]
    pub song_review: String,
    #[serde(default = "default_lyrics")]
    pub lyrics: String,
}

fn default_title() -> String {
    "Unknown Title".to_string()
}

fn default_artist() -> String {
    "Unknown Artist".to_string()
}

fn default_genre() -> String {
    "Unknown Genre".to_string()
}

fn default_album() -> String {
    "Unknown Album".to_string()
}

fn default_review() -> String {
    "Not reviewed yet.".to_string()
}

fn default_lyrics() -> String {
    "No lyrics available.".to_string()
}

/// Fields accepted when creating a song. Anything left unset falls back
/// to the catalog defaults.
#[derive(Debug, Clone, Default)]
pub struct NewSong {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub duration: Option<String>,
    pub genre: Option<String>,
    pub album: Option<String>,
    pub release_date: Option<i32>,
    pub song_review: Option<String>,
    pub lyrics: Option<String>,
}

impl NewSong {
    /// Build a full record under the given ID, filling unset fields with
    /// the defaults.
    pub fn into_song(self, song_id: i64) -> Song {
        Song {
            song_id,
            title: self.title.unwrap_or_else(default_title),
            artist: self.artist.unwrap_or_else(default_artist),
            duration: self.duration.map(Duration::Text).unwrap_or_default(),
            genre: self.genre.unwrap_or_else(default_genre),
            album: self.album.unwrap_or_else(default_album),
            release_date: self.release_date.unwrap_or(0),
            song_review: self.song_review.unwrap_or_else(default_review),
            lyrics: self.lyrics.unwrap_or_else(default_lyrics),
        }
    }
}

/// Partial update: only fields that are present overwrite the stored
/// record. The ID is deliberately not part of this type.
#[derive(Debug, Clone, Default)]
pub struct SongPatch {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub duration: Option<String>,
    pub genre: Option<String>,
    pub album: Option<String>,
    pub release_date: Option<i32>,
    pub song_review: Option<String>,
    pub lyrics: Option<String>,
}

impl SongPatch {
    /// Shallow-merge the provided fields over an existing record.
    pub fn apply(self, song: &mut Song) {
        if let Some(title) = self.title {
            song.title = title;
        }
        if let Some(artist) = self.artist {
            song.artist = artist;
        }
        if let Some(duration) = self.duration {
            song.duration = Duration::Text(duration);
        }
        if let Some(genre) = self.genre {
            song.genre = genre;
        }
        if let Some(album) = self.album {
            song.album = album;
        }
        if let Some(release_date) = self.release_date {
            song.release_date = release_date;
        }
        if let Some(song_review) = self.song_review {
            song.song_review = song_review;
        }
        if let Some(lyrics) = self.lyrics {
            song.lyrics = lyrics;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_song_wire_field_names() {
        let song = NewSong::default().into_song(42);
        let json = serde_json::to_value(&song).unwrap();

        assert_eq!(json["songID"], 42);
        assert_eq!(json["title"], "Unknown Title");
        assert_eq!(json["artist"], "Unknown Artist");
        assert_eq!(json["duration"], 0);
        assert_eq!(json["genre"], "Unknown Genre");
        assert_eq!(json["album"], "Unknown Album");
        assert_eq!(json["releaseDate"], 0);
        assert_eq!(json["songReview"], "Not reviewed yet.");
        assert_eq!(json["lyrics"], "No lyrics available.");
    }

    #[test]
    fn test_missing_fields_deserialize_to_defaults() {
        let song: Song = serde_json::from_str(r#"{"songID": 7, "title": "Hey"}"#).unwrap();

        assert_eq!(song.song_id, 7);
        assert_eq!(song.title, "Hey");
        assert_eq!(song.artist, "Unknown Artist");
        assert_eq!(song.duration, Duration::Seconds(0));
    }

    #[test]
    fn test_duration_accepts_number_or_string() {
        let n: Duration = serde_json::from_str("185").unwrap();
        assert_eq!(n, Duration::Seconds(185));

        let s: Duration = serde_json::from_str(r#""3:05""#).unwrap();
        assert_eq!(s, Duration::Text("3:05".to_string()));
    }

    #[test]
    fn test_patch_applies_only_present_fields() {
        let mut song = NewSong {
            title: Some("Original".to_string()),
            artist: Some("Someone".to_string()),
            release_date: Some(1999),
            ..Default::default()
        }
        .into_song(1);

        SongPatch {
            album: Some("New Album".to_string()),
            ..Default::default()
        }
        .apply(&mut song);

        assert_eq!(song.album, "New Album");
        assert_eq!(song.title, "Original");
        assert_eq!(song.artist, "Someone");
        assert_eq!(song.release_date, 1999);
    }
}
