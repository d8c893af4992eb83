//! Message types for conversations.

use chrono::{DateTime, Utc};
use parley_core::{ConversationId, MessageId, UserId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier, unique across all conversations.
    pub id: MessageId,
    /// The conversation this message belongs to.
    pub conversation_id: ConversationId,
    /// The participant who sent the message.
    pub sender_id: UserId,
    /// Message content, already trimmed.
    pub content: String,
    /// When the message was created.
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Creates a message.
    #[must_use]
    pub fn new(
        id: MessageId,
        conversation_id: ConversationId,
        sender_id: UserId,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            conversation_id,
            sender_id,
            content: content.into(),
            created_at,
        }
    }

    /// Chronological ordering: by timestamp, then by id.
    ///
    /// Timestamps alone are not a total order since several messages can
    /// share a clock tick; ids break the tie in insertion order.
    #[must_use]
    pub fn chronological(&self, other: &Self) -> Ordering {
        self.created_at
            .cmp(&other.created_at)
            .then_with(|| self.id.cmp(&other.id))
    }
}
