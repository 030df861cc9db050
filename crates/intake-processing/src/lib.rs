//! Intake Processing Library
//!
//! The upload processor and the collaborators it is built from: content
//! sniffing, the content-type allow-list and the randomizer used for
//! generated file names.

pub mod random;
pub mod sniff;
pub mod upload;
pub mod validator;

#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used types
pub use random::{FixedRandomizer, Randomizer, ThreadRandomizer, RANDOM_TOKEN_LENGTH};
pub use sniff::{sniff_content_type, SNIFF_WINDOW};
pub use upload::UploadProcessor;
pub use validator::{ContentTypeValidator, ValidationError};
