use std::path::PathBuf;

use crate::mode::Mode;

/// Errors that can occur in byte store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failed to open the file in the requested mode.
    #[error("could not open {path} for {mode}: {source}")]
    Open {
        path: PathBuf,
        mode: Mode,
        source: std::io::Error,
    },

    /// An I/O error occurred on the open file.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
