//! Common error types for GradeTrack

use thiserror::Error;

/// Common result type for GradeTrack operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the shared library layers.
///
/// Missing rows are not errors here: lookups return `Option`/`bool` and the
/// transport layer decides what a missing row means.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
