//! HTTP Basic Auth extractor.
//!
//! Write routes are gated by a single fixed credential pair. Any
//! missing or mismatched credential yields a 401 with a
//! `WWW-Authenticate` challenge.

use actix_web::{dev::Payload, http::header, FromRequest, HttpRequest};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::future::{ready, Ready};

use crate::error::AppError;

const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "tim-the-goat";

/// Authenticated admin extractor.
///
/// Use this as a parameter in route handlers to require Basic Auth.
///
/// # Example
/// ```ignore
/// async fn protected_route(_admin: Admin) -> impl Responder {
///     "only for admins"
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Admin;

impl FromRequest for Admin {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(check_credentials(req))
    }
}

/// Validate the request's Basic Auth credentials.
fn check_credentials(req: &HttpRequest) -> Result<Admin, AppError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let encoded = auth_header
        .strip_prefix("Basic ")
        .or_else(|| auth_header.strip_prefix("basic "))
        .ok_or(AppError::Unauthorized)?;

    let decoded = STANDARD
        .decode(encoded.trim())
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .ok_or(AppError::Unauthorized)?;

    let (username, password) = decoded.split_once(':').ok_or(AppError::Unauthorized)?;

    if username != ADMIN_USERNAME || password != ADMIN_PASSWORD {
        tracing::debug!("Authentication failed");
        return Err(AppError::Unauthorized);
    }

    tracing::debug!("Authentication successful");
    Ok(Admin)
}
