// src/error.rs

//! Error types for apodary
//!
//! Every component returns failures as explicit `Result` values; nothing in
//! the library panics on a failed operation. Command handlers wrap these in
//! `anyhow` for user-facing reporting.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure reaching the remote service
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The remote service rejected the configured API key
    #[error("Authentication failed: {0}")]
    AuthError(String),

    /// The remote service answered with a status we have no handling for
    #[error("Unexpected response status: HTTP {0}")]
    UnexpectedStatus(u16),

    /// Fetching an image asset failed
    #[error("Download failed: {0}")]
    DownloadError(String),

    /// Decoding or re-encoding an image asset failed
    #[error("Image encoding failed: {0}")]
    EncodeError(String),

    /// No free identifier remains in the allocation space
    #[error("Identifier allocation failed: {0}")]
    AllocationError(String),

    /// An insert collided with an existing identifier
    #[error("Entry already exists: {0}")]
    AlreadyExists(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Initialization error: {0}")]
    InitError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),
}
