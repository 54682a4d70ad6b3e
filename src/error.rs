/// Error types for the gallery
///
/// Nothing here is fatal: image failures end up as a placeholder tile,
/// batch failures are logged at the loader boundary, and config
/// failures fall back to defaults.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalleryError {
    /// The image file exists but could not be decoded
    #[error("failed to decode {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// The image file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The background decode task panicked or was cancelled
    #[error("decode task join error: {0}")]
    Join(String),

    #[error("invalid gallery config: {0}")]
    InvalidConfig(String),

    #[error("malformed gallery config: {0}")]
    Config(#[from] serde_json::Error),

    /// A batch slice fell outside the catalog
    #[error("batch {start}..{end} is outside a catalog of {len} images")]
    BatchOutOfRange { start: usize, end: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, GalleryError>;
