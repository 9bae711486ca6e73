use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("Inspection image size {width}x{height} is outside the drawable range")]
    Canvas { width: u32, height: u32 },
    #[error("Failed to save inspection image {path}: {source}")]
    Save {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Failed to open inspection image {path}: {source}")]
    Show {
        path: PathBuf,
        source: std::io::Error,
    },
}
