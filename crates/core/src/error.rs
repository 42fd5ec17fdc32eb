//! Error types for gutentext operations.
//!
//! This module defines the main error type [`GutentextError`] which represents
//! all possible errors that can occur while resolving, downloading, decoding
//! and caching a book.
//!
//! # Example
//!
//! ```rust
//! use gutentext_core::{GutentextError, Result};
//!
//! fn first_line(text: &[u8]) -> Result<&str> {
//!     let text = std::str::from_utf8(text).map_err(|_| GutentextError::Decode { encoding: "UTF-8".into() })?;
//!     Ok(text.lines().next().unwrap_or_default())
//! }
//! # assert_eq!(first_line(b"a\nb").unwrap(), "a");
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for text acquisition.
///
/// Every operation either succeeds completely or returns one of these;
/// no partial text is ever handed back.
///
/// # Example
///
/// ```rust,no_run
/// use gutentext_core::{GutentextError, TextConfig, get_text_by_id};
///
/// match get_text_by_id(1342, &TextConfig::default()) {
///     Ok(text) => println!("{} bytes", text.len()),
///     Err(GutentextError::UnknownLocation { path }) => eprintln!("nothing at {path}"),
///     Err(e) => eprintln!("Error: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum GutentextError {
    /// No candidate download address answered with a success status.
    #[error("location not found for text at path: {path}")]
    UnknownLocation { path: String },

    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and error statuses on the body download.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Failure reported by a non-HTTP [`Transport`](crate::Transport) implementation.
    #[error("Transport failed: {0}")]
    Transport(String),

    /// Invalid URL provided, typically a malformed archive root.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Book identifiers must be positive integers.
    #[error("Invalid book id: {0}")]
    InvalidId(String),

    /// The downloaded bytes cannot be decoded with the detected encoding.
    #[error("Failed to decode text as {encoding}")]
    Decode { encoding: String },

    /// A cached entry exists but cannot be decompressed or is not UTF-8.
    #[error("Cache entry {path} is corrupt: {reason}")]
    CacheCorrupt { path: PathBuf, reason: String },

    /// The cache directory could not be created.
    #[error("Failed to create cache directory {path}: {source}")]
    CacheDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Wraps standard I/O errors for cache file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for GutentextError.
///
/// This is a convenience alias for `std::result::Result<T, GutentextError>`.
pub type Result<T> = std::result::Result<T, GutentextError>;
