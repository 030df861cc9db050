//! Configuration module
//!
//! [`UploadConfig`] is the per-call upload policy handed to the upload
//! processor. [`Config`] is the service configuration loaded from the
//! environment by the HTTP binary.

use std::collections::HashSet;
use std::env;
use std::path::PathBuf;

/// Size limit used when the caller does not set one (1 GiB).
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 1024 * 1024 * 1024;

const SERVER_PORT: u16 = 4000;
const MAX_FILE_SIZE_MB: u64 = 1024;
const UPLOAD_DIR: &str = "./uploads";
const ALLOWED_CONTENT_TYPES: &str = "image/jpeg,image/png,image/gif,image/webp";

/// How the single-file adapter treats additional file parts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SingleFilePolicy {
    /// Every part is processed; only the first record is returned.
    #[default]
    TakeFirst,
    /// A second file part fails the call before anything is written for it.
    RejectExtra,
}

/// Upload policy for one call. Owned by the caller, borrowed by the processor.
#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub max_file_size_bytes: u64,
    /// Sniffed MIME types accepted verbatim. Empty allows everything.
    pub allowed_content_types: HashSet<String>,
    /// Store under `<random-token>.<ext>` instead of the client's name.
    pub rename_files: bool,
    pub single_file_policy: SingleFilePolicy,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
            allowed_content_types: HashSet::new(),
            rename_files: false,
            single_file_policy: SingleFilePolicy::default(),
        }
    }
}

impl UploadConfig {
    pub fn with_max_file_size_bytes(mut self, max: u64) -> Self {
        self.max_file_size_bytes = max;
        self
    }

    pub fn with_allowed_content_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_content_types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_rename_files(mut self, rename: bool) -> Self {
        self.rename_files = rename;
        self
    }

    pub fn with_single_file_policy(mut self, policy: SingleFilePolicy) -> Self {
        self.single_file_policy = policy;
        self
    }
}

/// Service configuration for the HTTP binary.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub upload_dir: PathBuf,
    pub upload: UploadConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let server_port = lookup("PORT")
            .unwrap_or_else(|| SERVER_PORT.to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?;

        let max_file_size_mb = lookup("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|| MAX_FILE_SIZE_MB.to_string())
            .parse::<u64>()
            .unwrap_or(MAX_FILE_SIZE_MB);

        // Matched case-sensitively against sniffed types, so no lowercasing here.
        let allowed_content_types = lookup("ALLOWED_CONTENT_TYPES")
            .unwrap_or_else(|| ALLOWED_CONTENT_TYPES.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let rename_files = lookup("RENAME_UPLOADS")
            .unwrap_or_else(|| "true".to_string())
            .to_lowercase()
            .parse()
            .unwrap_or(true);

        let reject_extra = lookup("SINGLE_UPLOAD_REJECT_EXTRA")
            .unwrap_or_else(|| "false".to_string())
            .to_lowercase()
            .parse()
            .unwrap_or(false);

        let upload = UploadConfig::default()
            .with_max_file_size_bytes(max_file_size_mb.saturating_mul(1024 * 1024))
            .with_allowed_content_types(allowed_content_types)
            .with_rename_files(rename_files)
            .with_single_file_policy(if reject_extra {
                SingleFilePolicy::RejectExtra
            } else {
                SingleFilePolicy::TakeFirst
            });

        let config = Config {
            server_port,
            environment,
            upload_dir: PathBuf::from(
                lookup("UPLOAD_DIR")
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| UPLOAD_DIR.to_string()),
            ),
            upload,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.upload.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than zero"));
        }

        if self.upload_dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("UPLOAD_DIR must not be empty"));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}
