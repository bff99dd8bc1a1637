//! # Hearth Shared Library
//!
//! This crate contains the types, persistence layer, and authentication
//! primitives shared by the Hearth API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and data structures
//! - `auth`: Magic token, invite code, and session token utilities
//! - `db`: SQLite pool and migration runner

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Hearth shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
