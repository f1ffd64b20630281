use futures::future::try_join;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::messages::dtos::MessageResponseDto;
use crate::features::messages::models::{Message, NewMessage};
use crate::features::profiles::ProfileService;
use crate::modules::store::{decode_row, decode_rows, EntityStore, RowQuery, SortOrder};
use crate::shared::constants::{DEFAULT_VISITOR_EMAIL, MESSAGES_TABLE};

/// Service for direct messages between profile emails
pub struct MessageService {
    store: Arc<dyn EntityStore>,
    profiles: Arc<ProfileService>,
}

impl MessageService {
    pub fn new(store: Arc<dyn EntityStore>, profiles: Arc<ProfileService>) -> Self {
        Self { store, profiles }
    }

    /// Both directions of the conversation, oldest first
    ///
    /// Ties on `timestamp` are broken by `id`, so the result does not depend
    /// on which side asks.
    pub async fn list_messages(
        &self,
        profile_email: &str,
        counterpart_email: &str,
    ) -> Result<Vec<MessageResponseDto>> {
        let outgoing = RowQuery::new()
            .eq("from_email", profile_email)
            .eq("to_email", counterpart_email)
            .order_by("timestamp", SortOrder::Ascending);
        let incoming = RowQuery::new()
            .eq("from_email", counterpart_email)
            .eq("to_email", profile_email)
            .order_by("timestamp", SortOrder::Ascending);

        let (sent, received) = try_join(
            self.store.select(MESSAGES_TABLE, &outgoing),
            self.store.select(MESSAGES_TABLE, &incoming),
        )
        .await?;

        let mut messages: Vec<Message> = decode_rows(MESSAGES_TABLE, sent)?;
        messages.extend(decode_rows::<Message>(MESSAGES_TABLE, received)?);

        messages.sort_by(|a, b| (a.timestamp, a.id).cmp(&(b.timestamp, b.id)));
        // A conversation with oneself is returned by both queries
        messages.dedup_by_key(|m| m.id);

        Ok(messages.into_iter().map(MessageResponseDto::from).collect())
    }

    /// Store one message; blank text is rejected without touching the store
    pub async fn send_message(&self, from_email: &str, to_email: &str, text: &str) -> Result<()> {
        let text = Self::message_text(text)?;

        let row = serde_json::to_value(NewMessage {
            from_email,
            to_email,
            message: text,
        })
        .map_err(|e| AppError::Unknown(format!("Failed to encode message: {}", e)))?;

        let stored = self.store.insert(MESSAGES_TABLE, row).await?;
        let message: Message = decode_row(MESSAGES_TABLE, stored)?;

        info!(
            "Message sent: id={}, from={}, to={}",
            message.id, message.from_email, message.to_email
        );

        Ok(())
    }

    /// Conversation between the viewer and the owner of `profile_id`
    pub async fn conversation_with_profile(
        &self,
        profile_id: Uuid,
        viewer_email: Option<&str>,
    ) -> Result<Vec<MessageResponseDto>> {
        let profile = self.profiles.find_profile(profile_id).await?;
        self.list_messages(Self::viewer(viewer_email), &profile.email)
            .await
    }

    /// Send from the viewer to the owner of `profile_id`
    pub async fn send_to_profile(
        &self,
        profile_id: Uuid,
        viewer_email: Option<&str>,
        text: &str,
    ) -> Result<()> {
        Self::message_text(text)?;

        let profile = self.profiles.find_profile(profile_id).await?;
        self.send_message(Self::viewer(viewer_email), &profile.email, text)
            .await
    }

    fn viewer(viewer_email: Option<&str>) -> &str {
        viewer_email
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .unwrap_or(DEFAULT_VISITOR_EMAIL)
    }

    fn message_text(text: &str) -> Result<&str> {
        let text = text.trim();
        if text.is_empty() {
            warn!(operation = "send_message", "Rejected empty message");
            return Err(AppError::Validation("Message must not be empty".to_string()));
        }
        Ok(text)
    }
}
