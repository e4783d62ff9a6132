//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O, image codec, directory walk and config errors, and
//! provides semantic variants for argument validation and missing directories.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Assets directory not found: {}", path.display())]
    RootNotFound { path: PathBuf },

    #[error("Not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },
}

impl Error {
    /// True for errors that stop a whole run. Everything else is confined to
    /// the file or folder it came from.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::RootNotFound { .. } | Error::InvalidArgument { .. } | Error::Config(_)
        )
    }
}
