//! Error type shared by rendering, icon-set writing and packaging.

use std::path::PathBuf;

/// Errors produced by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested edge length cannot be rendered.
    #[error("invalid icon edge {edge}px (must be between {min} and {max})")]
    InvalidSize { edge: u32, min: u32, max: u32 },

    /// A filesystem operation failed.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Encoding or writing a PNG failed.
    #[error("failed to write image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The `Contents.json` manifest could not be serialized or parsed.
    #[error("invalid icon-set manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    /// A theme could not be parsed.
    #[error("invalid theme: {0}")]
    Theme(String),

    /// The packaging tool could not be started at all.
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
