//! Multipart upload handlers.
//!
//! The raw request body is streamed straight into the processor; nothing is
//! buffered beyond what multipart parsing needs.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use intake_core::AppError;

use crate::error::HttpAppError;
use crate::state::AppState;

fn request_content_type(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get(header::CONTENT_TYPE)
        .ok_or_else(|| AppError::MalformedMultipartBody("missing Content-Type header".to_string()))?
        .to_str()
        .map_err(|_| AppError::MalformedMultipartBody("Content-Type header is not ASCII".to_string()))
}

/// `POST /uploads`: store every file part and return their records.
#[tracing::instrument(skip(state, headers, body))]
pub async fn upload_files(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Body,
) -> Result<impl IntoResponse, HttpAppError> {
    let content_type = request_content_type(&headers)?;

    let files = state
        .processor
        .process_upload(
            content_type,
            body.into_data_stream(),
            state.storage.base_path(),
            &state.config.upload,
        )
        .await?;

    tracing::info!(file_count = files.len(), "Upload request completed");

    Ok((StatusCode::CREATED, Json(files)))
}

/// `POST /uploads/single`: store a body expected to carry one file.
#[tracing::instrument(skip(state, headers, body))]
pub async fn upload_single_file(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Body,
) -> Result<impl IntoResponse, HttpAppError> {
    let content_type = request_content_type(&headers)?;

    let file = state
        .processor
        .process_single_upload(
            content_type,
            body.into_data_stream(),
            state.storage.base_path(),
            &state.config.upload,
        )
        .await?;

    tracing::info!(
        new_file_name = %file.new_file_name,
        file_size_bytes = file.file_size_bytes,
        "Single upload request completed"
    );

    Ok((StatusCode::CREATED, Json(file)))
}
