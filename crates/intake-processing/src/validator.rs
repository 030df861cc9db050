use std::collections::HashSet;

use intake_core::{AppError, UploadConfig};

/// Validation errors raised before a part touches the disk
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid content type: {content_type} (allowed: {allowed:?})")]
    InvalidContentType {
        content_type: String,
        allowed: Vec<String>,
    },
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidContentType { content_type, .. } => {
                AppError::UnsupportedFileType { content_type }
            }
        }
    }
}

/// Allow-list check for sniffed content types.
///
/// Matching is exact and case-sensitive. An empty allow-list accepts every type.
pub struct ContentTypeValidator<'a> {
    allowed_content_types: &'a HashSet<String>,
}

impl<'a> ContentTypeValidator<'a> {
    pub fn new(allowed_content_types: &'a HashSet<String>) -> Self {
        Self {
            allowed_content_types,
        }
    }

    pub fn from_config(config: &'a UploadConfig) -> Self {
        Self::new(&config.allowed_content_types)
    }

    pub fn validate_content_type(&self, content_type: &str) -> Result<(), ValidationError> {
        if self.allowed_content_types.is_empty()
            || self.allowed_content_types.contains(content_type)
        {
            return Ok(());
        }

        let mut allowed: Vec<String> = self.allowed_content_types.iter().cloned().collect();
        allowed.sort();
        Err(ValidationError::InvalidContentType {
            content_type: content_type.to_string(),
            allowed,
        })
    }
}
