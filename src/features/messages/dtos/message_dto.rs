use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::shared::validation::blank_as_none;

/// Request DTO for sending a direct message between two addresses
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageDto {
    #[validate(email(message = "Invalid sender email format"))]
    #[schema(example = "bo@example.com")]
    pub from_email: String,

    #[validate(email(message = "Invalid recipient email format"))]
    #[schema(example = "ada@example.com")]
    pub to_email: String,

    /// Message text; surrounding whitespace is trimmed and blank text is rejected
    #[schema(example = "Hi Ada, want to build something together?")]
    pub message: String,
}

/// Request DTO for messaging the owner of a profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SendProfileMessageDto {
    /// Sender address; the visitor address is used when omitted or blank
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(email(message = "Invalid sender email format"))]
    pub from: Option<String>,

    pub message: String,
}

/// Query params for a conversation between two addresses
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ConversationQuery {
    #[validate(email(message = "Invalid profile email format"))]
    pub profile_email: String,
    #[validate(email(message = "Invalid counterpart email format"))]
    pub counterpart_email: String,
}

/// Query params for a conversation with a profile owner
#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
pub struct ProfileConversationQuery {
    /// Viewer address; the visitor address is used when omitted or blank
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(email(message = "Invalid viewer email format"))]
    pub from: Option<String>,
}

/// Response DTO for a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponseDto {
    pub id: Uuid,
    pub from_email: String,
    pub to_email: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Sending only acknowledges the write; re-fetch the conversation to see it
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendMessageResponseDto {
    pub sent: bool,
}
