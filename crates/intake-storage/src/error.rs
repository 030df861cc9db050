use std::io;

use intake_core::AppError;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Writing to the target directory failed.
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// The reader feeding a write failed; the partial file is left in place.
    #[error("Source read failed: {0}")]
    SourceRead(#[source] io::Error),

    /// The write was aborted because the next chunk would pass `limit` bytes.
    #[error("Size limit of {limit} bytes exceeded")]
    LimitExceeded { limit: u64 },

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid file name: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::LimitExceeded { limit } => AppError::FileTooLarge { max_bytes: limit },
            StorageError::NotFound(name) => AppError::NotFound(name),
            StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
            StorageError::SourceRead(e) => AppError::BodyInterrupted(e.to_string()),
            other => AppError::Filesystem(other.to_string()),
        }
    }
}
