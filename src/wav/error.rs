use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WavError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid wav {path}: {source}")]
    Decode {
        path: PathBuf,
        source: hound::Error,
    },
    #[error(
        "Unsupported wav {path}: only 16-bit integer PCM is supported (got {bits_per_sample}-bit {format})"
    )]
    UnsupportedFormat {
        path: PathBuf,
        bits_per_sample: u16,
        format: &'static str,
    },
    #[error("Failed to create temporary file next to {path}: {source}")]
    CreateTemp {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write wav {path}: {source}")]
    Encode {
        path: PathBuf,
        source: hound::Error,
    },
    #[error("Failed to replace {path}: {source}")]
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },
}
