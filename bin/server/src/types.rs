//! Response bodies of the HTTP API.
//!
//! Each operation has exactly one response shape. Field names are
//! camelCase and timestamps are RFC 3339 UTC with millisecond precision.

use chrono::{DateTime, SecondsFormat, Utc};
use parley_conversation::{Conversation, ConversationSummary, Message, User};
use parley_core::{ConversationId, MessageId, UserId};
use serde::{Deserialize, Deserializer, Serialize, de};

/// Formats a timestamp the way every response carries it.
#[must_use]
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A user as shown to clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub id: UserId,
    pub name: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            name: user.name().to_string(),
        }
    }
}

/// Body of the create/find conversation response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationView {
    pub id: ConversationId,
    pub participant_ids: [UserId; 2],
}

impl From<&Conversation> for ConversationView {
    fn from(conversation: &Conversation) -> Self {
        Self {
            id: conversation.id,
            participant_ids: conversation.participant_ids,
        }
    }
}

/// Preview of the last message in a conversation list row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMessageView {
    pub content: String,
    pub timestamp: String,
}

/// One row of the conversation list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummaryView {
    pub id: ConversationId,
    pub other_participant: UserView,
    pub last_message: Option<LastMessageView>,
}

impl From<&ConversationSummary> for ConversationSummaryView {
    fn from(summary: &ConversationSummary) -> Self {
        Self {
            id: summary.conversation_id,
            other_participant: UserView::from(&summary.other_participant),
            last_message: summary.last_message.as_ref().map(|m| LastMessageView {
                content: m.content.clone(),
                timestamp: format_timestamp(m.created_at),
            }),
        }
    }
}

/// A message with its sender resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub id: MessageId,
    pub content: String,
    pub created_at: String,
    pub sender: UserView,
}

impl MessageView {
    /// Builds the view of `message` sent by `sender`.
    #[must_use]
    pub fn new(message: &Message, sender: &User) -> Self {
        Self {
            id: message.id,
            content: message.content.clone(),
            created_at: format_timestamp(message.created_at),
            sender: UserView::from(sender),
        }
    }
}

/// Body of `POST /api/conversations`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConversationRequest {
    #[serde(default, deserialize_with = "lenient_user_id")]
    pub participant_id: Option<UserId>,
}

/// Accepts a user id given either as a JSON number or as a numeric string.
fn lenient_user_id<'de, D>(deserializer: D) -> Result<Option<UserId>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(value)) => Ok(Some(UserId::new(value))),
        Some(Raw::Text(text)) => text.parse().map(Some).map_err(de::Error::custom),
    }
}

/// Body of `POST /api/conversations/{id}/messages`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SendMessageRequest {
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn timestamps_use_millisecond_precision() {
        let timestamp = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(format_timestamp(timestamp), "2024-05-01T12:00:00.000Z");
    }

    #[test]
    fn summary_without_messages_serializes_null_last_message() {
        let view = ConversationSummaryView {
            id: ConversationId::new(101),
            other_participant: UserView {
                id: UserId::new(2),
                name: "Bee".to_string(),
            },
            last_message: None,
        };
        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            json!({
                "id": 101,
                "otherParticipant": {"id": 2, "name": "Bee"},
                "lastMessage": null
            })
        );
    }

    #[test]
    fn message_view_shape() {
        let sender = User::new(UserId::new(1), "Ant");
        let message = Message::new(
            MessageId::new(7),
            ConversationId::new(101),
            sender.id(),
            "hello",
            Utc.timestamp_millis_opt(1_714_564_800_123).unwrap(),
        );
        assert_eq!(
            serde_json::to_value(MessageView::new(&message, &sender)).unwrap(),
            json!({
                "id": 7,
                "content": "hello",
                "createdAt": "2024-05-01T12:00:00.123Z",
                "sender": {"id": 1, "name": "Ant"}
            })
        );
    }

    #[test]
    fn create_request_accepts_missing_participant() {
        let request: CreateConversationRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.participant_id, None);
        let request: CreateConversationRequest =
            serde_json::from_str(r#"{"participantId": 3}"#).unwrap();
        assert_eq!(request.participant_id, Some(UserId::new(3)));
        let request: CreateConversationRequest =
            serde_json::from_str(r#"{"participantId": null}"#).unwrap();
        assert_eq!(request.participant_id, None);
    }

    #[test]
    fn create_request_accepts_numeric_string() {
        let request: CreateConversationRequest =
            serde_json::from_str(r#"{"participantId": "3"}"#).unwrap();
        assert_eq!(request.participant_id, Some(UserId::new(3)));
        assert!(serde_json::from_str::<CreateConversationRequest>(r#"{"participantId": "x"}"#).is_err());
        assert!(serde_json::from_str::<CreateConversationRequest>(r#"{"participantId": true}"#).is_err());
    }
}
