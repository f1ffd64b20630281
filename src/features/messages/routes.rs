use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::messages::handlers;
use crate::features::messages::services::MessageService;

/// Create routes for the messages feature
pub fn routes(service: Arc<MessageService>) -> Router {
    Router::new()
        .route(
            "/api/messages",
            get(handlers::list_messages).post(handlers::send_message),
        )
        .route(
            "/api/profiles/{id}/messages",
            get(handlers::conversation_with_profile).post(handlers::send_to_profile),
        )
        .with_state(service)
}
