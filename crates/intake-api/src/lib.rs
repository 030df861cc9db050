//! Intake HTTP API
//!
//! Thin axum surface over [`intake_processing::UploadProcessor`]: multipart
//! uploads, single-file uploads, forced downloads and a health probe.

pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use setup::routes::API_PREFIX;
pub use state::AppState;
