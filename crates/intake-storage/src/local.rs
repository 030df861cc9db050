use crate::error::{StorageError, StorageResult};
use bytes::Bytes;
use futures::Stream;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use tokio::fs;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Local directory that uploaded files are written into.
///
/// Files are addressed by a flat name; anything that could resolve outside
/// the directory is rejected before touching the filesystem.
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Open the storage directory, creating it (and any parents) when missing.
    ///
    /// Calling this for a directory that already exists is not an error.
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Convert a file name to its path inside the storage directory
    fn key_to_path(&self, name: &str) -> StorageResult<PathBuf> {
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains(['/', '\\', '\0'])
        {
            return Err(StorageError::InvalidKey(format!(
                "File name {:?} is not a plain file name",
                name
            )));
        }

        Ok(self.base_path.join(name))
    }

    /// Stream `reader` into `name`, failing once more than `limit` bytes would be written.
    ///
    /// An existing file with the same name is truncated. When the limit trips
    /// the partially written file is removed. When `reader` itself fails the
    /// partial file is kept and the error is reported as
    /// [`StorageError::SourceRead`].
    pub async fn write_bounded<R>(&self, name: &str, reader: &mut R, limit: u64) -> StorageResult<u64>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        let path = self.key_to_path(name)?;
        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        let mut buf = vec![0u8; COPY_BUFFER_SIZE];
        let mut written: u64 = 0;

        loop {
            let n = reader.read(&mut buf).await.map_err(StorageError::SourceRead)?;
            if n == 0 {
                break;
            }

            if written + n as u64 > limit {
                drop(file);
                self.remove_partial(&path).await;
                tracing::debug!(
                    path = %path.display(),
                    limit,
                    written,
                    "Size limit exceeded, partial file removed"
                );
                return Err(StorageError::LimitExceeded { limit });
            }

            file.write_all(&buf[..n]).await.map_err(|e| {
                StorageError::WriteFailed(format!("Failed to write file {}: {}", path.display(), e))
            })?;
            written += n as u64;
        }

        file.flush().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to flush file {}: {}", path.display(), e))
        })?;
        file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            size_bytes = written,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage write successful"
        );

        Ok(written)
    }

    async fn remove_partial(&self, path: &Path) {
        if let Err(e) = fs::remove_file(path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to remove partial file"
                );
            }
        }
    }

    /// Open a stored file as a byte stream, returning its length alongside.
    pub async fn download_stream(
        &self,
        name: &str,
    ) -> StorageResult<(
        u64,
        Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>,
    )> {
        let path = self.key_to_path(name)?;

        let file = match fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(name.to_string()));
            }
            Err(e) => return Err(StorageError::IoError(e)),
        };

        let metadata = file.metadata().await?;
        if !metadata.is_file() {
            return Err(StorageError::NotFound(name.to_string()));
        }

        let stream =
            tokio_util::io::ReaderStream::new(file).map(|result| result.map_err(StorageError::IoError));

        Ok((metadata.len(), Box::pin(stream)))
    }
}
