//! Application error types and handling.
//!
//! Every failure path funnels through [`AppError`]'s `ResponseError`
//! impl, which is the single place errors become HTTP responses.

use actix_web::{http::header, http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;

/// One failed validation check on a request field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    /// Name of the offending query/body/path field.
    pub field: String,
    /// Human-readable message.
    pub msg: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            msg: msg.into(),
        }
    }
}

/// Body of a 400 validation response.
#[derive(Debug, Serialize)]
struct ValidationBody<'a> {
    errors: &'a [FieldError],
}

/// Application error types.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or out-of-range input.
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// Requested resource absent.
    #[error("{0}")]
    NotFound(String),

    /// Missing or incorrect credentials.
    #[error("Authorization Required")]
    Unauthorized,

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Single-field validation failure.
    pub fn invalid_field(field: &str, msg: &str) -> Self {
        Self::Validation(vec![FieldError::new(field, msg)])
    }

    /// Not-found for a song lookup.
    pub fn song_not_found() -> Self {
        Self::NotFound("Song not found".to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Internal(_) | Self::Io(_) | Self::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            // Client faults: never logged as server errors.
            Self::Validation(errors) => {
                tracing::debug!(?errors, "Request validation failed");
                HttpResponse::BadRequest().json(ValidationBody { errors })
            }
            Self::NotFound(msg) => HttpResponse::NotFound().body(msg.clone()),
            Self::Unauthorized => HttpResponse::Unauthorized()
                .insert_header((
                    header::WWW_AUTHENTICATE,
                    "Basic realm=Authorization Required",
                ))
                .body("Authorization Required"),
            // Everything else: full detail server-side, nothing to the client.
            other => {
                tracing::error!(error = %other, "Internal server error");
                HttpResponse::InternalServerError().body("Internal Server Error")
            }
        }
    }
}

/// Result type alias using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::invalid_field("id", "bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::song_not_found().status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::Internal("test".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_body_shape() {
        let errors = vec![FieldError::new(
            "id",
            "ID must be a valid number greater than 0",
        )];
        let json = serde_json::to_value(ValidationBody { errors: &errors }).unwrap();

        assert_eq!(json["errors"][0]["field"], "id");
        assert_eq!(
            json["errors"][0]["msg"],
            "ID must be a valid number greater than 0"
        );
    }

    #[test]
    fn test_unauthorized_challenge_header() {
        let resp = AppError::Unauthorized.error_response();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let challenge = resp
            .headers()
            .get(header::WWW_AUTHENTICATE)
            .and_then(|h| h.to_str().ok())
            .unwrap();
        assert_eq!(challenge, "Basic realm=Authorization Required");
    }
}
