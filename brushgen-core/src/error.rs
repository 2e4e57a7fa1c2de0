//! Error types for brush generation

use thiserror::Error;

/// Main error type for brush generation and map I/O
#[derive(Debug, Error)]
pub enum Error {
    #[error("expected 6 face textures, got {count}")]
    InvalidTextureCount { count: usize },

    #[error("{field} component {value} is outside the coordinate range +/-{max}")]
    CoordinateOutOfRange {
        field: &'static str,
        value: f64,
        max: f64,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene error: {0}")]
    Scene(#[from] serde_json::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
