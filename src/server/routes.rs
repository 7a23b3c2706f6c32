//! Route definitions
//!
//! Maps the HTTP surface onto the storage engine operations. Delete routes
//! take wildcard paths with real `/` separators; the upload target path and
//! directory creation use the `_` separator convention (translated in the
//! handlers before reaching the core).

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{delete, get, post};
use std::sync::Arc;

use crate::middleware::logging::log_request;
use crate::server::handlers;
use crate::storage::StorageEngine;

pub fn build_router(storage: Arc<StorageEngine>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/api/files/upload", post(handlers::upload_file))
        .route("/api/files/list", get(handlers::list_files))
        .route("/api/files/download/{*path}", get(handlers::download_file))
        .route(
            "/api/files/directory/{*path}",
            post(handlers::create_directory).delete(handlers::delete_directory),
        )
        .route("/api/files/{*path}", delete(handlers::delete_file))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(middleware::from_fn(log_request))
        .with_state(storage)
}
