use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::features::messages::dtos::MessageResponseDto;

/// Row of the `messages` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub from_email: String,
    pub to_email: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Insert payload; `id` and `timestamp` are set by the store
#[derive(Debug, Clone, Serialize)]
pub struct NewMessage<'a> {
    pub from_email: &'a str,
    pub to_email: &'a str,
    pub message: &'a str,
}

impl From<Message> for MessageResponseDto {
    fn from(m: Message) -> Self {
        Self {
            id: m.id,
            from_email: m.from_email,
            to_email: m.to_email,
            message: m.message,
            timestamp: m.timestamp,
        }
    }
}
