//! Error types for the zone, feed and report stages
//!
//! Only `ZoneLoadError::MalformedGeometry` and `FeedError` are recoverable:
//! the pipeline logs them and carries on with what it has. Everything else
//! aborts the run.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZoneLoadError {
    #[error("failed to read boundary document {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("boundary document is not valid XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("placemark #{index} has no name")]
    MissingName { index: usize },

    #[error("zone '{name}' has no usable polygon: {reason}")]
    MalformedGeometry { name: String, reason: String },
}

impl ZoneLoadError {
    /// Whether the loader may skip the offending region and keep going
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ZoneLoadError::MalformedGeometry { .. })
    }
}

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("feed returned status {status}")]
    Unavailable { status: u16 },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid feed response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for response bodies quoted in error messages
const MAX_ERROR_BODY_LENGTH: usize = 200;

impl FeedError {
    /// Build an `InvalidResponse` from a decode failure, quoting a bounded
    /// prefix of the offending body
    pub fn invalid_body(err: impl std::fmt::Display, body: &str) -> Self {
        let quoted = if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        };
        FeedError::InvalidResponse(format!("{err}; body: {quoted}"))
    }
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to write report {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode map data: {0}")]
    Encode(#[from] serde_json::Error),
}
