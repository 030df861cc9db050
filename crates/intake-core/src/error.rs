//! Error types module
//!
//! All failures of an upload call are unified under [`AppError`]. Each kind is
//! distinguishable so the HTTP boundary can pick a status code through the
//! [`ErrorMetadata`] trait. None of them are retried internally: a retry means
//! re-submitting the whole request.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like resource limits
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "FILE_TOO_LARGE")
    fn error_code(&self) -> &'static str;

    /// Whether re-submitting the same request may succeed
    fn is_recoverable(&self) -> bool;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unsupported file type: {content_type}")]
    UnsupportedFileType { content_type: String },

    #[error("File too large: exceeds maximum of {max_bytes} bytes")]
    FileTooLarge { max_bytes: u64 },

    #[error("Malformed multipart body: {0}")]
    MalformedMultipartBody(String),

    #[error("Request body interrupted: {0}")]
    BodyInterrupted(String),

    #[error("Filesystem error: {0}")]
    Filesystem(String),

    #[error("No file provided")]
    NoFileProvided,

    #[error("Too many files: at most {max} allowed")]
    TooManyFiles { max: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Filesystem(err.to_string())
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, bool, LogLevel) {
    match err {
        AppError::UnsupportedFileType { .. } => {
            (415, "UNSUPPORTED_FILE_TYPE", false, LogLevel::Debug)
        }
        AppError::FileTooLarge { .. } => (413, "FILE_TOO_LARGE", false, LogLevel::Debug),
        AppError::MalformedMultipartBody(_) => {
            (400, "MALFORMED_MULTIPART_BODY", false, LogLevel::Debug)
        }
        AppError::BodyInterrupted(_) => (400, "BODY_INTERRUPTED", true, LogLevel::Warn),
        AppError::Filesystem(_) => (500, "FILESYSTEM_ERROR", true, LogLevel::Error),
        AppError::NoFileProvided => (400, "NO_FILE_PROVIDED", false, LogLevel::Debug),
        AppError::TooManyFiles { .. } => (400, "TOO_MANY_FILES", false, LogLevel::Debug),
        AppError::InvalidInput(_) => (400, "INVALID_INPUT", false, LogLevel::Debug),
        AppError::NotFound(_) => (404, "NOT_FOUND", false, LogLevel::Debug),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", true, LogLevel::Error),
    }
}

impl AppError {
    /// Get the error type name for structured logs
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::UnsupportedFileType { .. } => "UnsupportedFileType",
            AppError::FileTooLarge { .. } => "FileTooLarge",
            AppError::MalformedMultipartBody(_) => "MalformedMultipartBody",
            AppError::BodyInterrupted(_) => "BodyInterrupted",
            AppError::Filesystem(_) => "Filesystem",
            AppError::NoFileProvided => "NoFileProvided",
            AppError::TooManyFiles { .. } => "TooManyFiles",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::NotFound(_) => "NotFound",
            AppError::Internal(_) => "Internal",
        }
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            // Server-side paths stay out of responses.
            AppError::Filesystem(_) => "Failed to store uploaded file".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}
