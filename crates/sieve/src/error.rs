//! Error types for the Sieve library.
//!
//! Validation itself never fails: a hopeless candidate list yields an empty
//! result. These errors cover the edges around the engine, such as decoding
//! generator output, loading request files, and snapshot persistence.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Sieve operations.
#[derive(Debug, Error)]
pub enum SieveError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generator output contained no decodable JSON.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Error saving or loading an insight snapshot.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Sieve operations.
pub type Result<T> = std::result::Result<T, SieveError>;
