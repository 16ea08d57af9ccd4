//! Authentication module.

pub mod basic;

pub use basic::Admin;
