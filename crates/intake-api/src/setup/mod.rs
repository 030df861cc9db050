//! Application setup and initialization

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use intake_core::Config;
use intake_processing::UploadProcessor;
use intake_storage::LocalStorage;
use std::sync::Arc;

/// Build state and router. Telemetry is installed by the caller.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    config.validate().context("Configuration validation failed")?;

    crate::error::set_production_mode(config.is_production());

    let storage = LocalStorage::new(config.upload_dir.clone())
        .await
        .with_context(|| format!("Failed to prepare upload directory {}", config.upload_dir.display()))?;

    tracing::info!(
        upload_dir = %config.upload_dir.display(),
        environment = %config.environment,
        "Configuration loaded and validated successfully"
    );

    let state = Arc::new(AppState::new(config, UploadProcessor::default(), storage));
    let router = routes::setup_routes(state.clone());

    Ok((state, router))
}
