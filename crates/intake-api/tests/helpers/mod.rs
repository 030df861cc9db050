//! Test helpers: build AppState and router over a temporary upload directory.

#![allow(dead_code)]

use axum_test::TestServer;
use intake_api::setup::routes;
use intake_api::{AppState, API_PREFIX};
use intake_core::{Config, UploadConfig};
use intake_processing::{FixedRandomizer, UploadProcessor};
use intake_storage::LocalStorage;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Token every renamed upload receives in tests.
pub const TOKEN: &str = "Abcdefghijklmnopqrstuvwxy";

/// API path prefix for tests (e.g. `/api/v0`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", API_PREFIX, path)
}

/// Test application: server plus the upload directory it writes into.
pub struct TestApp {
    pub server: TestServer,
    pub temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn upload_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.upload_dir())
            .expect("Failed to read upload dir")
            .map(|entry| {
                entry
                    .expect("Failed to read dir entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }
}

/// PNG signature followed by zero padding up to `len` bytes.
pub fn png_bytes(len: usize) -> Vec<u8> {
    let mut png = vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52,
    ];
    png.resize(len.max(png.len()), 0);
    png
}

pub fn image_upload_config() -> UploadConfig {
    UploadConfig::default()
        .with_max_file_size_bytes(10 * 1024 * 1024)
        .with_allowed_content_types(["image/jpeg", "image/png", "image/gif"])
}

pub async fn setup_test_app(upload: UploadConfig) -> TestApp {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let config = Config {
        server_port: 0,
        environment: "test".to_string(),
        upload_dir: temp_dir.path().to_path_buf(),
        upload,
    };

    let storage = LocalStorage::new(temp_dir.path())
        .await
        .expect("Failed to create local storage");
    let processor = UploadProcessor::new(Arc::new(FixedRandomizer::new([TOKEN])));
    let state = Arc::new(AppState::new(config, processor, storage));

    let app = routes::setup_routes(state);
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp { server, temp_dir }
}
