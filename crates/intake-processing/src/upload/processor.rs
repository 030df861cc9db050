//! Upload processor: multipart body → sniff → validate → name → bounded write.
//!
//! Parts are handled strictly in arrival order and the first failure ends the
//! call. Files written for earlier parts are not rolled back; only the part
//! that trips the size limit has its partial file removed. A body that breaks
//! off mid-part leaves that part's partial file where it is.

use std::io;
use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use futures::{Stream, TryStreamExt};
use intake_core::validation::{file_extension, sanitize_filename};
use intake_core::{AppError, SingleFilePolicy, UploadConfig, UploadedFile};
use intake_storage::{LocalStorage, StorageError};
use tokio::io::AsyncReadExt;
use tokio_util::io::StreamReader;

use crate::random::{Randomizer, ThreadRandomizer, RANDOM_TOKEN_LENGTH};
use crate::sniff::{sniff_content_type, SNIFF_WINDOW};
use crate::validator::ContentTypeValidator;

/// Streams multipart file parts into a target directory.
///
/// Holds no per-call state, so one instance can serve concurrent requests.
/// Concurrent calls writing the same name into the same directory are not
/// coordinated: with renaming disabled the last writer wins.
#[derive(Clone)]
pub struct UploadProcessor {
    randomizer: Arc<dyn Randomizer>,
}

impl Default for UploadProcessor {
    fn default() -> Self {
        Self::new(Arc::new(ThreadRandomizer))
    }
}

impl UploadProcessor {
    pub fn new(randomizer: Arc<dyn Randomizer>) -> Self {
        Self { randomizer }
    }

    /// Store every file part of a multipart body under `target_dir`.
    ///
    /// `content_type` is the request's `Content-Type` header value, which
    /// carries the boundary. The directory is created when missing. A body
    /// without file parts yields an empty vector.
    pub async fn process_upload<S, O, E>(
        &self,
        content_type: &str,
        body: S,
        target_dir: &Path,
        config: &UploadConfig,
    ) -> Result<Vec<UploadedFile>, AppError>
    where
        S: Stream<Item = Result<O, E>> + Send + 'static,
        O: Into<Bytes> + 'static,
        E: Into<Box<dyn std::error::Error + Send + Sync>> + 'static,
    {
        self.process_parts(content_type, body, target_dir, config, None)
            .await
    }

    /// Store a body expected to carry one file and return its record.
    ///
    /// With [`SingleFilePolicy::TakeFirst`] extra parts are still stored and
    /// silently left out of the result. With [`SingleFilePolicy::RejectExtra`]
    /// a second file part fails the call before it is written.
    pub async fn process_single_upload<S, O, E>(
        &self,
        content_type: &str,
        body: S,
        target_dir: &Path,
        config: &UploadConfig,
    ) -> Result<UploadedFile, AppError>
    where
        S: Stream<Item = Result<O, E>> + Send + 'static,
        O: Into<Bytes> + 'static,
        E: Into<Box<dyn std::error::Error + Send + Sync>> + 'static,
    {
        let max_files = match config.single_file_policy {
            SingleFilePolicy::TakeFirst => None,
            SingleFilePolicy::RejectExtra => Some(1),
        };

        let files = self
            .process_parts(content_type, body, target_dir, config, max_files)
            .await?;

        if files.len() > 1 {
            tracing::debug!(
                file_count = files.len(),
                "Single upload received extra files, returning the first"
            );
        }

        files.into_iter().next().ok_or(AppError::NoFileProvided)
    }

    async fn process_parts<S, O, E>(
        &self,
        content_type: &str,
        body: S,
        target_dir: &Path,
        config: &UploadConfig,
        max_files: Option<usize>,
    ) -> Result<Vec<UploadedFile>, AppError>
    where
        S: Stream<Item = Result<O, E>> + Send + 'static,
        O: Into<Bytes> + 'static,
        E: Into<Box<dyn std::error::Error + Send + Sync>> + 'static,
    {
        let boundary = multer::parse_boundary(content_type).map_err(|e| {
            AppError::MalformedMultipartBody(format!("Invalid multipart content type: {}", e))
        })?;

        let storage = LocalStorage::new(target_dir).await?;
        let mut multipart = multer::Multipart::new(body, boundary);
        let mut uploaded = Vec::new();

        while let Some(mut field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(&e))?
        {
            let Some(original_file_name) = field.file_name().map(str::to_string) else {
                tracing::debug!(field = ?field.name(), "Skipping non-file form field");
                continue;
            };

            let prefix = read_prefix(&mut field).await?;

            // What browsers send for a file input left empty.
            if original_file_name.trim().is_empty() && prefix.is_empty() {
                tracing::debug!(field = ?field.name(), "Skipping empty file input");
                continue;
            }

            if let Some(max) = max_files {
                if uploaded.len() >= max {
                    tracing::warn!(
                        max,
                        original_file_name = %original_file_name,
                        "Rejected extra file part"
                    );
                    return Err(AppError::TooManyFiles { max });
                }
            }

            let file = self
                .store_part(&storage, field, prefix, original_file_name, config)
                .await?;
            uploaded.push(file);
        }

        Ok(uploaded)
    }

    async fn store_part(
        &self,
        storage: &LocalStorage,
        field: multer::Field<'static>,
        prefix: Vec<u8>,
        original_file_name: String,
        config: &UploadConfig,
    ) -> Result<UploadedFile, AppError> {
        // Logged for diagnostics only; the sniffed type is what gets checked.
        let declared_content_type = field.content_type().map(|m| m.to_string());

        let content_type = sniff_content_type(&prefix);

        if let Err(e) =
            ContentTypeValidator::from_config(config).validate_content_type(&content_type)
        {
            tracing::warn!(
                original_file_name = %original_file_name,
                content_type = %content_type,
                declared_content_type = ?declared_content_type,
                "Rejected file part with disallowed content type"
            );
            return Err(e.into());
        }

        let new_file_name = self.resolve_file_name(&original_file_name, config.rename_files);

        let rest = StreamReader::new(field.map_err(io::Error::other));
        let mut reader = Box::pin(io::Cursor::new(prefix).chain(rest));

        let file_size_bytes = storage
            .write_bounded(&new_file_name, &mut reader, config.max_file_size_bytes)
            .await
            .map_err(|e| match e {
                StorageError::SourceRead(source) => source_read_error(source),
                other => {
                    tracing::warn!(
                        new_file_name = %new_file_name,
                        error = %other,
                        "Failed to store file part"
                    );
                    AppError::from(other)
                }
            })?;

        tracing::info!(
            original_file_name = %original_file_name,
            new_file_name = %new_file_name,
            content_type = %content_type,
            declared_content_type = ?declared_content_type,
            size_bytes = file_size_bytes,
            "Stored uploaded file"
        );

        Ok(UploadedFile {
            original_file_name,
            new_file_name,
            file_size_bytes,
        })
    }

    /// Name used on disk: the sanitized declared name, or `<token>.<ext>` when renaming.
    pub fn resolve_file_name(&self, declared: &str, rename: bool) -> String {
        let safe = sanitize_filename(declared);
        if !rename {
            return safe;
        }

        let token = self.randomizer.token(RANDOM_TOKEN_LENGTH);
        match file_extension(&safe) {
            Some(ext) => format!("{}.{}", token, ext),
            None => token,
        }
    }
}

/// Read at least [`SNIFF_WINDOW`] bytes of the part, or all of it if shorter.
async fn read_prefix(field: &mut multer::Field<'static>) -> Result<Vec<u8>, AppError> {
    let mut prefix = Vec::with_capacity(SNIFF_WINDOW);
    while prefix.len() < SNIFF_WINDOW {
        match field.chunk().await.map_err(|e| multipart_error(&e))? {
            Some(chunk) => prefix.extend_from_slice(&chunk),
            None => break,
        }
    }
    Ok(prefix)
}

fn multipart_error(err: &multer::Error) -> AppError {
    match err {
        multer::Error::StreamReadFailed(source) => AppError::BodyInterrupted(source.to_string()),
        other => AppError::MalformedMultipartBody(other.to_string()),
    }
}

/// Errors from the part reader are either decoder errors or a failed body stream.
fn source_read_error(err: io::Error) -> AppError {
    let decoder_error = err
        .get_ref()
        .and_then(|inner| inner.downcast_ref::<multer::Error>());

    match decoder_error {
        Some(multer_err) => multipart_error(multer_err),
        None => AppError::BodyInterrupted(err.to_string()),
    }
}
