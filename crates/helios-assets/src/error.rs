use std::path::PathBuf;

use thiserror::Error;

/// Why a single load attempt failed. Never escapes the resolver: a failed
/// attempt moves the handle on to the next path or to its placeholder.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("asset not found: {0}")]
    NotFound(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("typeface parse error: {0}")]
    FontParse(#[from] serde_json::Error),

    #[error("invalid typeface: {0}")]
    InvalidFont(String),
}
