//! Error types for the navigator.
//!
//! Search misses (an element or attribute that isn't there) are not errors:
//! the navigator returns `Ok(None)` for those. Everything in [`NavError`]
//! either aborts a load or signals misuse of a handle.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::DocumentId;

/// Main error type for the navigator library.
#[derive(Debug, Error)]
pub enum NavError {
    /// The file path does not resolve.
    #[error("File not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// Reading the file failed for a reason other than a missing path.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is larger than the configured limit.
    #[error("{} is {size} bytes, larger than the {limit} byte limit", .path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    /// The content is not valid UTF-8.
    #[error("Invalid UTF-8 in {source_name}: {source}")]
    Encoding {
        source_name: String,
        #[source]
        source: std::str::Utf8Error,
    },

    /// The content is not well-formed XML.
    #[error("XML parsing failed for {source_name}: {source}")]
    Parse {
        source_name: String,
        #[source]
        source: roxmltree::Error,
    },

    /// A document or node handle was used after its document was unloaded.
    #[error("Invalid handle: document #{} is not loaded", .document.get())]
    InvalidHandle { document: DocumentId },

    /// Load options file could not be read or deserialized.
    #[error("Invalid options file {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },

    /// Writing command output failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl NavError {
    /// Whether this error is a parse failure (syntax or encoding).
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::Encoding { .. })
    }

    /// Whether this error reports use of a dead handle.
    #[must_use]
    pub fn is_invalid_handle(&self) -> bool {
        matches!(self, Self::InvalidHandle { .. })
    }
}

/// Result type alias for navigator operations.
pub type Result<T> = std::result::Result<T, NavError>;
