//! Intake Storage Library
//!
//! Local-directory storage for uploaded files. Files are addressed by a flat
//! name relative to the storage directory; names with separators or `..` are
//! rejected so a write can never land outside it.

pub mod error;
pub mod local;

// Re-export commonly used types
pub use error::{StorageError, StorageResult};
pub use local::LocalStorage;
