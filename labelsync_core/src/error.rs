//! Error types for the labelsync core library
//!
//! A single error enum covers the library's failure surface: HTTP
//! transport, service-level status errors, JSON shape problems, local
//! file I/O, and malformed labeling documents.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the labelsync core library
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport errors (connect, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("service returned {status} for {endpoint}: {body}")]
    Api {
        endpoint: String,
        status: reqwest::StatusCode,
        body: String,
    },

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors carrying the path that failed
    #[error("IO error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Requested batch size outside the service's accepted bounds
    #[error("image count must be between 1 and {max}, got {requested}")]
    ImageLimit { requested: u32, max: u32 },

    /// Image URL without a usable file name component
    #[error("invalid image URL '{0}': no file name component")]
    InvalidImageUrl(String),

    /// Frame key that does not carry a numeric image id
    #[error("frame '{0}' has no numeric image id in its file name")]
    InvalidFrameName(String),
}

impl Error {
    /// Attach a path to a raw I/O error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
