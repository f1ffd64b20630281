use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::files::handlers::{
    delete_file, get_public_url, list_files, upload_attachment, upload_avatar, upload_file,
    upload_portfolio,
};
use crate::features::files::models::StorageBucket;
use crate::features::files::services::FileService;

/// Create routes for the files feature
pub fn routes(file_service: Arc<FileService>) -> Router {
    // Largest bucket limit plus a buffer for multipart overhead
    let body_limit = StorageBucket::largest_max_size() as usize + 1024 * 1024;

    Router::new()
        .route(
            "/api/files/{bucket}",
            post(upload_file).get(list_files).delete(delete_file),
        )
        .route("/api/files/{bucket}/public-url", get(get_public_url))
        .route("/api/files/avatars/{owner_id}", post(upload_avatar))
        .route("/api/files/portfolio/{owner_id}", post(upload_portfolio))
        .route("/api/files/attachments/{owner_id}", post(upload_attachment))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(file_service)
}
