use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub const API_PREFIX: &str = "/api/v0";

pub fn setup_routes(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/uploads", post(handlers::upload::upload_files))
        .route("/uploads/single", post(handlers::upload::upload_single_file))
        .route("/files/{name}", get(handlers::file_download::download_file));

    // Per-file limits are enforced while streaming, so the request-wide cap is off.
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest(API_PREFIX, api_routes)
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
