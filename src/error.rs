//! Error types.
//!
//! The statistics, text, lookup and comparator helpers are total and never
//! fail. Errors come from argument validation in [`crate::random`] and from
//! the network downloader in `crate::download`.

use thiserror::Error;

#[cfg(feature = "download")]
use std::path::PathBuf;

/// Errors returned by the fallible utilities in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// `min` was greater than `max` in a random range request.
    #[error("min ({min}) must be less than or equal to max ({max})")]
    InvalidRange { min: i64, max: i64 },

    /// A probability outside `[0, 1]` (or NaN) was supplied.
    #[error("probability must be between 0 and 1, got {0}")]
    InvalidProbability(f64),

    /// The download URL could not be parsed.
    #[cfg(feature = "download")]
    #[error("invalid url `{url}`: {message}")]
    InvalidUrl { url: String, message: String },

    /// The download URL uses a scheme other than http or https.
    #[cfg(feature = "download")]
    #[error("unsupported url scheme `{0}`")]
    UnsupportedScheme(String),

    /// The destination file exists and overwriting was not requested.
    #[cfg(feature = "download")]
    #[error("destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),

    /// The server answered with a non-success status code.
    #[cfg(feature = "download")]
    #[error("server returned {status} for {url}")]
    Status { status: u16, url: String },

    /// Transport-level HTTP failure (connect, timeout, body read).
    #[cfg(feature = "download")]
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Filesystem failure while writing the downloaded file.
    #[cfg(feature = "download")]
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns true if this error is transient and the operation may succeed
    /// when retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            #[cfg(feature = "download")]
            Error::Http(e) => e.is_timeout() || e.is_connect() || e.is_request() || e.is_body(),
            #[cfg(feature = "download")]
            Error::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Result type for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;
