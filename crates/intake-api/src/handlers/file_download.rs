use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::Response,
};
use intake_core::validation::sanitize_filename;
use intake_core::AppError;
use serde::Deserialize;

use crate::error::HttpAppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DownloadParams {
    /// Name offered to the browser; defaults to the stored name.
    pub display_name: Option<String>,
}

/// `GET /files/{name}`: stream a stored file as a forced download.
#[tracing::instrument(skip(state))]
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(params): Query<DownloadParams>,
) -> Result<Response, HttpAppError> {
    let (len, stream) = state.storage.download_stream(&name).await?;

    let display_name = sanitize_filename(params.display_name.as_deref().unwrap_or(&name));

    tracing::debug!(name = %name, display_name = %display_name, bytes = len, "Serving file download");

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(header::CONTENT_LENGTH, len)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", display_name),
        )
        .body(Body::from_stream(stream))
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build response");
            HttpAppError::from(AppError::Internal(e.to_string()))
        })?;

    Ok(response)
}
