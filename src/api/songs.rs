//! Song CRUD endpoints.
//!
//! Each handler validates its input, makes exactly one store call, and
//! maps the result to a status code and body. Reads are open; writes
//! require Basic Auth.

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::Value;

use crate::auth::Admin;
use crate::error::{AppError, AppResult};
use crate::models::Song;
use crate::store::SongStore;
use crate::validate::{self, QueryFilter, SongQuery};

/// A multi-match filter with an empty result responds exactly like a
/// single-match miss.
fn json_or_not_found(songs: Vec<Song>) -> AppResult<HttpResponse> {
    if songs.is_empty() {
        return Err(AppError::song_not_found());
    }
    Ok(HttpResponse::Ok().json(songs))
}

/// List songs, or look them up by one filter.
///
/// GET /songs
///
/// Query parameters (one honored at a time, in priority order):
/// - `id`: positive integer, returns a single song
/// - `title`: exact match, returns a single song
/// - `artist`, `album`, `genre`: exact match, return an array
/// - `releaseDate`: year between 1900 and 2100, returns an array
///
/// With no parameters, returns the whole collection.
#[get("/songs")]
pub async fn get_songs(
    store: web::Data<SongStore>,
    query: web::Query<SongQuery>,
) -> AppResult<HttpResponse> {
    match validate::validate_query(query.into_inner())? {
        QueryFilter::All => Ok(HttpResponse::Ok().json(store.all())),
        QueryFilter::Id(id) => {
            let song = store.find_by_id(id).ok_or_else(AppError::song_not_found)?;
            Ok(HttpResponse::Ok().json(song))
        }
        QueryFilter::Title(title) => {
            let song = store
                .find_by_title(&title)
                .ok_or_else(AppError::song_not_found)?;
            Ok(HttpResponse::Ok().json(song))
        }
        QueryFilter::Artist(artist) => json_or_not_found(store.find_by_artist(&artist)),
        QueryFilter::Album(album) => json_or_not_found(store.find_by_album(&album)),
        QueryFilter::Genre(genre) => json_or_not_found(store.find_by_genre(&genre)),
        QueryFilter::Year(year) => json_or_not_found(store.find_by_year(year)),
    }
}

/// Create a song.
///
/// POST /songs
///
/// Requires `title`, `artist`, and `releaseDate`; unset optional fields
/// get catalog defaults. Responds 200 with the created record.
#[post("/songs")]
pub async fn create_song(
    _admin: Admin,
    store: web::Data<SongStore>,
    body: web::Json<Value>,
) -> AppResult<HttpResponse> {
    let fields = validate::validate_create(&body)?;
    let song = store.create(fields);
    Ok(HttpResponse::Ok().json(song))
}

/// Partially update a song.
///
/// PUT /songs/{id}
///
/// All body fields optional; only the ones present change. A path id
/// that resolves to no song (including a non-numeric one) is a 404.
#[put("/songs/{id}")]
pub async fn update_song(
    _admin: Admin,
    store: web::Data<SongStore>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> AppResult<HttpResponse> {
    let patch = validate::validate_patch(&body)?;

    let updated = path
        .parse::<i64>()
        .ok()
        .and_then(|id| store.update(id, patch))
        .ok_or_else(|| AppError::NotFound("Song not found, cannot update.".to_string()))?;

    Ok(HttpResponse::Ok().json(updated))
}

/// Delete a song.
///
/// DELETE /songs/{id}
///
/// The path id must be a positive integer. Responds 200 with a plain
/// text confirmation naming the deleted song.
#[delete("/songs/{id}")]
pub async fn delete_song(
    _admin: Admin,
    store: web::Data<SongStore>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = validate::parse_positive_id(&path).map_err(|e| AppError::Validation(vec![e]))?;

    let removed = store
        .delete(id)
        .ok_or_else(|| AppError::NotFound("Song not found, cannot delete.".to_string()))?;

    Ok(HttpResponse::Ok().body(format!("Song {} with id {} deleted!", removed.title, id)))
}

/// Configure song routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_songs)
        .service(create_song)
        .service(update_song)
        .service(delete_song);
}
