//! Field-level request validation.
//!
//! Each failed check contributes one entry to the 400 error list; the
//! messages are part of the API contract and are asserted by tests.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, FieldError};
use crate::models::{NewSong, SongPatch};

pub const ID_MSG: &str = "ID must be a valid number greater than 0";
const TITLE_MSG: &str = "Title must be a string";
const ARTIST_MSG: &str = "Artist must be a string";
const ALBUM_MSG: &str = "Album must be a string";
const GENRE_MSG: &str = "Genre must be a string";
const DURATION_MSG: &str = "Duration must be a string";
const LYRICS_MSG: &str = "Lyrics must be a string";
const REVIEW_MSG: &str = "Song review must be a string";
const QUERY_YEAR_MSG: &str = "Release date must be a valid year";
const BODY_YEAR_MSG: &str = "Year must be a valid year";

/// Year range accepted when filtering reads.
const QUERY_YEAR_RANGE: std::ops::RangeInclusive<i32> = 1900..=2100;
/// Year range accepted on writes.
const BODY_YEAR_RANGE: std::ops::RangeInclusive<i32> = 1900..=2023;

/// Recognized `GET /songs` query parameters. Anything else is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct SongQuery {
    pub id: Option<String>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    #[serde(rename = "releaseDate")]
    pub release_date: Option<String>,
}

/// The single filter honored by `GET /songs`.
///
/// When several recognized parameters are present, the highest-priority
/// one wins: id, then title, artist, album, genre, releaseDate.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryFilter {
    All,
    Id(i64),
    Title(String),
    Artist(String),
    Album(String),
    Genre(String),
    Year(i32),
}

/// Parse a positive integer ID, as used by the `id` query parameter and
/// the DELETE path segment.
pub fn parse_positive_id(raw: &str) -> Result<i64, FieldError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| FieldError::new("id", ID_MSG))
}

/// Validate every recognized parameter that is present, then pick the
/// filter to honor.
pub fn validate_query(query: SongQuery) -> Result<QueryFilter, AppError> {
    let mut errors = Vec::new();

    let id = match query.id.as_deref() {
        Some(raw) => match parse_positive_id(raw) {
            Ok(id) => Some(id),
            Err(e) => {
                errors.push(e);
                None
            }
        },
        None => None,
    };

    // title/artist/album/genre arrive as strings by construction.

    let year = match query.release_date.as_deref() {
        Some(raw) => match raw.trim().parse::<i32>() {
            Ok(y) if QUERY_YEAR_RANGE.contains(&y) => Some(y),
            _ => {
                errors.push(FieldError::new("releaseDate", QUERY_YEAR_MSG));
                None
            }
        },
        None => None,
    };

    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    Ok(if let Some(id) = id {
        QueryFilter::Id(id)
    } else if let Some(title) = query.title {
        QueryFilter::Title(title)
    } else if let Some(artist) = query.artist {
        QueryFilter::Artist(artist)
    } else if let Some(album) = query.album {
        QueryFilter::Album(album)
    } else if let Some(genre) = query.genre {
        QueryFilter::Genre(genre)
    } else if let Some(year) = year {
        QueryFilter::Year(year)
    } else {
        QueryFilter::All
    })
}

/// Pull a string field out of a JSON body.
///
/// Required fields must be present and a string; optional fields may be
/// absent or null, but must be a string when given.
fn string_field(
    body: &Value,
    field: &'static str,
    msg: &'static str,
    required: bool,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match body.get(field) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Null) | None => {
            if required {
                errors.push(FieldError::new(field, msg));
            }
            None
        }
        Some(_) => {
            errors.push(FieldError::new(field, msg));
            None
        }
    }
}

/// Pull the `releaseDate` field out of a JSON body: must be an integer
/// within the write range.
fn year_field(body: &Value, required: bool, errors: &mut Vec<FieldError>) -> Option<i32> {
    match body.get("releaseDate") {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(y) if y >= *BODY_YEAR_RANGE.start() as i64 && y <= *BODY_YEAR_RANGE.end() as i64 => {
                Some(y as i32)
            }
            _ => {
                errors.push(FieldError::new("releaseDate", BODY_YEAR_MSG));
                None
            }
        },
        Some(Value::Null) | None => {
            if required {
                errors.push(FieldError::new("releaseDate", BODY_YEAR_MSG));
            }
            None
        }
        Some(_) => {
            errors.push(FieldError::new("releaseDate", BODY_YEAR_MSG));
            None
        }
    }
}

/// Validate a POST body: `title`, `artist`, and `releaseDate` are
/// required; the rest are optional strings.
pub fn validate_create(body: &Value) -> Result<NewSong, AppError> {
    let mut errors = Vec::new();

    let title = string_field(body, "title", TITLE_MSG, true, &mut errors);
    let artist = string_field(body, "artist", ARTIST_MSG, true, &mut errors);
    let release_date = year_field(body, true, &mut errors);
    let album = string_field(body, "album", ALBUM_MSG, false, &mut errors);
    let genre = string_field(body, "genre", GENRE_MSG, false, &mut errors);
    let duration = string_field(body, "duration", DURATION_MSG, false, &mut errors);
    let lyrics = string_field(body, "lyrics", LYRICS_MSG, false, &mut errors);
    let song_review = string_field(body, "songReview", REVIEW_MSG, false, &mut errors);

    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    Ok(NewSong {
        title,
        artist,
        duration,
        genre,
        album,
        release_date,
        song_review,
        lyrics,
    })
}

/// Validate a PUT body: same fields as POST, all optional.
pub fn validate_patch(body: &Value) -> Result<SongPatch, AppError> {
    let mut errors = Vec::new();

    let title = string_field(body, "title", TITLE_MSG, false, &mut errors);
    let artist = string_field(body, "artist", ARTIST_MSG, false, &mut errors);
    let release_date = year_field(body, false, &mut errors);
    let album = string_field(body, "album", ALBUM_MSG, false, &mut errors);
    let genre = string_field(body, "genre", GENRE_MSG, false, &mut errors);
    let duration = string_field(body, "duration", DURATION_MSG, false, &mut errors);
    let lyrics = string_field(body, "lyrics", LYRICS_MSG, false, &mut errors);
    let song_review = string_field(body, "songReview", REVIEW_MSG, false, &mut errors);

    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    Ok(SongPatch {
        title,
        artist,
        duration,
        genre,
        album,
        release_date,
        song_review,
        lyrics,
    })
}
