use std::path::PathBuf;

use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Assets directory not found: {}", path.display())]
    MissingRoot { path: PathBuf },

    #[error("{failed} file(s) failed to process")]
    PartialFailure { failed: usize },

    #[error("Invalid config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: whiteout::Error,
    },

    #[error(transparent)]
    Library(#[from] whiteout::Error),
}
