//! Per-user conversation overview, most recent activity first.

use crate::ledger::MessageLedger;
use crate::message::Message;
use crate::store::EntityStore;
use crate::user::User;
use chrono::{DateTime, Utc};
use parley_core::{ConversationId, UserId};
use serde::Serialize;
use tracing::warn;

/// One row of a user's conversation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationSummary {
    /// The conversation.
    pub conversation_id: ConversationId,
    /// The participant who is not the requesting user.
    pub other_participant: User,
    /// The chronologically last message, if any.
    pub last_message: Option<Message>,
}

impl ConversationSummary {
    /// Timestamp used to rank the conversation; `None` ranks lowest.
    #[must_use]
    pub fn recency(&self) -> Option<DateTime<Utc>> {
        self.last_message.as_ref().map(|m| m.created_at)
    }
}

/// Projects the conversations of a user into display summaries.
#[derive(Debug, Clone, Copy)]
pub struct SummaryBuilder<'a> {
    store: &'a EntityStore,
    ledger: MessageLedger<'a>,
}

impl<'a> SummaryBuilder<'a> {
    /// Creates a builder over `store`.
    #[must_use]
    pub fn new(store: &'a EntityStore) -> Self {
        Self {
            store,
            ledger: MessageLedger::new(store),
        }
    }

    /// Lists the summaries of every conversation containing `user_id`.
    ///
    /// Sorted by last-message timestamp, newest first. Conversations
    /// without messages come last. Equal recency keeps ascending
    /// conversation id order.
    #[must_use]
    pub fn list_for_user(&self, user_id: UserId) -> Vec<ConversationSummary> {
        let mut summaries: Vec<ConversationSummary> = self
            .store
            .conversations_for_user(user_id)
            .into_iter()
            .filter_map(|conversation| {
                let other_id = conversation.other_participant(user_id)?;
                let Some(other) = self.store.user(other_id) else {
                    warn!(conversation_id = %conversation.id, %other_id, "participant missing from store");
                    return None;
                };
                let last_message = match self.ledger.last(conversation.id, user_id) {
                    Ok(last) => last,
                    Err(e) => {
                        warn!(conversation_id = %conversation.id, error = %e, "cannot read conversation");
                        return None;
                    }
                };
                Some(ConversationSummary {
                    conversation_id: conversation.id,
                    other_participant: other.clone(),
                    last_message,
                })
            })
            .collect();

        // Stable sort: ties stay in ascending conversation id order.
        summaries.sort_by(|a, b| b.recency().cmp(&a.recency()));
        summaries
    }
}
