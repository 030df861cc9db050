//! Shared handler state.

use intake_core::Config;
use intake_processing::UploadProcessor;
use intake_storage::LocalStorage;

pub struct AppState {
    pub config: Config,
    pub processor: UploadProcessor,
    /// Rooted at `config.upload_dir`; uploads land here and downloads read from here.
    pub storage: LocalStorage,
}

impl AppState {
    pub fn new(config: Config, processor: UploadProcessor, storage: LocalStorage) -> Self {
        Self {
            config,
            processor,
            storage,
        }
    }
}
