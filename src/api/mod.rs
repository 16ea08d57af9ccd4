//! HTTP API endpoints.

pub mod health;
pub mod home;
pub mod songs;
