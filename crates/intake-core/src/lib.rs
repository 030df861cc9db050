//! Intake Core Library
//!
//! Error types, configuration, the upload result model and the pure filename
//! helpers shared by the storage, processing and API crates.

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{Config, SingleFilePolicy, UploadConfig, DEFAULT_MAX_FILE_SIZE_BYTES};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::UploadedFile;
