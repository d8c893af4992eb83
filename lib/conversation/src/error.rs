//! Error types for the conversation crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `ResolveError`: Failures finding or creating a conversation for a pair
//! - `LedgerError`: Failures appending or listing messages
//! - `SeedError`: Inconsistent seed data handed to the entity store
//!
//! Request-path errors expose an [`ErrorKind`] so the boundary can map them
//! to a client-visible status without matching on every variant.

use parley_core::{ConversationId, ErrorKind, MessageId, UserId};
use std::fmt;

/// Errors from the conversation resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Both sides of the requested pair are the same user.
    SelfConversation { user_id: UserId },
    /// One side of the requested pair does not name an existing user.
    UserNotFound { user_id: UserId },
}

impl ResolveError {
    /// Returns the client-visible classification of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SelfConversation { .. } => ErrorKind::InvalidArgument,
            Self::UserNotFound { .. } => ErrorKind::NotFound,
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfConversation { user_id } => {
                write!(f, "user {user_id} cannot start a conversation with themselves")
            }
            Self::UserNotFound { user_id } => write!(f, "user not found: {user_id}"),
        }
    }
}

impl std::error::Error for ResolveError {}

/// Errors from the message ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The user is not a participant of the conversation, or the
    /// conversation does not exist.
    Forbidden {
        user_id: UserId,
        conversation_id: ConversationId,
    },
    /// Message content is empty after trimming whitespace.
    EmptyContent { conversation_id: ConversationId },
}

impl LedgerError {
    /// Returns the client-visible classification of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Forbidden { .. } => ErrorKind::Forbidden,
            Self::EmptyContent { .. } => ErrorKind::InvalidArgument,
        }
    }
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forbidden {
                user_id,
                conversation_id,
            } => {
                write!(
                    f,
                    "user {user_id} is not a participant of conversation {conversation_id}"
                )
            }
            Self::EmptyContent { conversation_id } => {
                write!(f, "empty message content for conversation {conversation_id}")
            }
        }
    }
}

impl std::error::Error for LedgerError {}

/// Errors from loading seed data into the entity store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedError {
    /// Two seeded users share an id.
    DuplicateUser { user_id: UserId },
    /// Two seeded conversations share an id.
    DuplicateConversation { conversation_id: ConversationId },
    /// Two seeded conversations cover the same participant pair.
    DuplicatePair {
        conversation_id: ConversationId,
        existing: ConversationId,
    },
    /// A seeded conversation pairs a user with themselves.
    SelfConversation { conversation_id: ConversationId },
    /// A seeded conversation references a user that was not seeded.
    UnknownParticipant {
        conversation_id: ConversationId,
        user_id: UserId,
    },
    /// Two seeded messages share an id.
    DuplicateMessage { message_id: MessageId },
    /// A seeded message references a conversation that was not seeded.
    UnknownConversation {
        message_id: MessageId,
        conversation_id: ConversationId,
    },
    /// A seeded message was sent by someone outside its conversation.
    SenderNotParticipant {
        message_id: MessageId,
        sender_id: UserId,
    },
    /// A seeded conversation uses the last representable id.
    ConversationIdExhausted { conversation_id: ConversationId },
    /// A seeded message uses the last representable id.
    MessageIdExhausted { message_id: MessageId },
}

impl fmt::Display for SeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateUser { user_id } => write!(f, "duplicate seeded user: {user_id}"),
            Self::DuplicateConversation { conversation_id } => {
                write!(f, "duplicate seeded conversation: {conversation_id}")
            }
            Self::DuplicatePair {
                conversation_id,
                existing,
            } => {
                write!(
                    f,
                    "conversation {conversation_id} repeats the participant pair of {existing}"
                )
            }
            Self::SelfConversation { conversation_id } => {
                write!(f, "conversation {conversation_id} pairs a user with themselves")
            }
            Self::UnknownParticipant {
                conversation_id,
                user_id,
            } => {
                write!(
                    f,
                    "conversation {conversation_id} references unknown user {user_id}"
                )
            }
            Self::DuplicateMessage { message_id } => {
                write!(f, "duplicate seeded message: {message_id}")
            }
            Self::UnknownConversation {
                message_id,
                conversation_id,
            } => {
                write!(
                    f,
                    "message {message_id} references unknown conversation {conversation_id}"
                )
            }
            Self::SenderNotParticipant {
                message_id,
                sender_id,
            } => {
                write!(
                    f,
                    "message {message_id} sender {sender_id} is not a participant"
                )
            }
            Self::ConversationIdExhausted { conversation_id } => {
                write!(f, "seeded conversation id {conversation_id} leaves no room for new ids")
            }
            Self::MessageIdExhausted { message_id } => {
                write!(f, "seeded message id {message_id} leaves no room for new ids")
            }
        }
    }
}

impl std::error::Error for SeedError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_error_kinds() {
        let user_id = UserId::new(1);
        assert_eq!(
            ResolveError::SelfConversation { user_id }.kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            ResolveError::UserNotFound { user_id }.kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn ledger_error_display() {
        let err = LedgerError::Forbidden {
            user_id: UserId::new(3),
            conversation_id: ConversationId::new(101),
        };
        assert_eq!(err.kind(), ErrorKind::Forbidden);
        assert!(err.to_string().contains("usr_3"));
        assert!(err.to_string().contains("conv_101"));
    }

    #[test]
    fn seed_error_display() {
        let err = SeedError::UnknownParticipant {
            conversation_id: ConversationId::new(5),
            user_id: UserId::new(9),
        };
        assert!(err.to_string().contains("unknown user usr_9"));
    }
}
