use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::messages::dtos::{
    ConversationQuery, MessageResponseDto, ProfileConversationQuery, SendMessageDto,
    SendMessageResponseDto, SendProfileMessageDto,
};
use crate::features::messages::services::MessageService;
use crate::shared::constants::MESSAGES_TABLE;
use crate::shared::types::{ApiResponse, Meta};

fn validate_input<T: Validate>(operation: &'static str, input: &T) -> Result<()> {
    input.validate().map_err(|e| {
        warn!(operation, table = MESSAGES_TABLE, "Rejected request: {}", e);
        AppError::Validation(e.to_string())
    })
}

fn conversation_response(
    messages: Vec<MessageResponseDto>,
) -> Json<ApiResponse<Vec<MessageResponseDto>>> {
    let meta = Meta::total(messages.len());
    Json(ApiResponse::success(Some(messages), None, Some(meta)))
}

fn sent_response() -> (StatusCode, Json<ApiResponse<SendMessageResponseDto>>) {
    (
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(SendMessageResponseDto { sent: true }),
            Some("Message sent".to_string()),
            None,
        )),
    )
}

/// Conversation between two addresses, oldest first
#[utoipa::path(
    get,
    path = "/api/messages",
    params(ConversationQuery),
    responses(
        (status = 200, description = "Messages in both directions", body = ApiResponse<Vec<MessageResponseDto>>),
        (status = 400, description = "Invalid email")
    ),
    tag = "messages"
)]
pub async fn list_messages(
    State(service): State<Arc<MessageService>>,
    Query(query): Query<ConversationQuery>,
) -> Result<Json<ApiResponse<Vec<MessageResponseDto>>>> {
    validate_input("list_messages", &query)?;

    let messages = service
        .list_messages(&query.profile_email, &query.counterpart_email)
        .await?;
    Ok(conversation_response(messages))
}

/// Send a direct message
#[utoipa::path(
    post,
    path = "/api/messages",
    request_body = SendMessageDto,
    responses(
        (status = 201, description = "Message stored", body = ApiResponse<SendMessageResponseDto>),
        (status = 400, description = "Blank message or invalid email")
    ),
    tag = "messages"
)]
pub async fn send_message(
    State(service): State<Arc<MessageService>>,
    AppJson(dto): AppJson<SendMessageDto>,
) -> Result<(StatusCode, Json<ApiResponse<SendMessageResponseDto>>)> {
    validate_input("send_message", &dto)?;

    service
        .send_message(&dto.from_email, &dto.to_email, &dto.message)
        .await?;
    Ok(sent_response())
}

/// Conversation with the owner of a profile
///
/// `from` identifies the viewer; the visitor address is used when omitted.
#[utoipa::path(
    get,
    path = "/api/profiles/{id}/messages",
    params(
        ("id" = Uuid, Path, description = "Profile id"),
        ProfileConversationQuery
    ),
    responses(
        (status = 200, description = "Messages in both directions", body = ApiResponse<Vec<MessageResponseDto>>),
        (status = 400, description = "Invalid viewer email"),
        (status = 404, description = "Profile not found")
    ),
    tag = "messages"
)]
pub async fn conversation_with_profile(
    State(service): State<Arc<MessageService>>,
    Path(id): Path<Uuid>,
    Query(query): Query<ProfileConversationQuery>,
) -> Result<Json<ApiResponse<Vec<MessageResponseDto>>>> {
    validate_input("conversation_with_profile", &query)?;

    let messages = service
        .conversation_with_profile(id, query.from.as_deref())
        .await?;
    Ok(conversation_response(messages))
}

/// Message the owner of a profile
#[utoipa::path(
    post,
    path = "/api/profiles/{id}/messages",
    params(("id" = Uuid, Path, description = "Profile id")),
    request_body = SendProfileMessageDto,
    responses(
        (status = 201, description = "Message stored", body = ApiResponse<SendMessageResponseDto>),
        (status = 400, description = "Blank message or invalid sender email"),
        (status = 404, description = "Profile not found")
    ),
    tag = "messages"
)]
pub async fn send_to_profile(
    State(service): State<Arc<MessageService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<SendProfileMessageDto>,
) -> Result<(StatusCode, Json<ApiResponse<SendMessageResponseDto>>)> {
    validate_input("send_to_profile", &dto)?;

    service
        .send_to_profile(id, dto.from.as_deref(), &dto.message)
        .await?;
    Ok(sent_response())
}
