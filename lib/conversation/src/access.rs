//! Conversation membership checks.

use crate::store::EntityStore;
use parley_core::{ConversationId, UserId};
use tracing::debug;

/// Decides whether a user may read or write a conversation.
///
/// A missing conversation and a conversation the user is not part of yield
/// the same answer. Callers that must tell them apart look the conversation
/// up first.
#[derive(Debug, Clone, Copy)]
pub struct AccessGuard<'a> {
    store: &'a EntityStore,
}

impl<'a> AccessGuard<'a> {
    /// Creates a guard over `store`.
    #[must_use]
    pub fn new(store: &'a EntityStore) -> Self {
        Self { store }
    }

    /// Returns true iff the conversation exists and `user_id` is one of its
    /// two participants.
    #[must_use]
    pub fn can_access(&self, user_id: UserId, conversation_id: ConversationId) -> bool {
        let allowed = self
            .store
            .conversation(conversation_id)
            .is_some_and(|c| c.has_participant(user_id));
        if !allowed {
            debug!(%user_id, %conversation_id, "conversation not accessible");
        }
        allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Seed;

    #[test]
    fn participants_have_access() {
        let store = EntityStore::with_seed(Seed::demo()).unwrap();
        let guard = AccessGuard::new(&store);
        assert!(guard.can_access(UserId::new(1), ConversationId::new(101)));
        assert!(guard.can_access(UserId::new(2), ConversationId::new(101)));
        assert!(guard.can_access(UserId::new(3), ConversationId::new(102)));
    }

    #[test]
    fn outsiders_are_refused() {
        let store = EntityStore::with_seed(Seed::demo()).unwrap();
        let guard = AccessGuard::new(&store);
        assert!(!guard.can_access(UserId::new(3), ConversationId::new(101)));
        assert!(!guard.can_access(UserId::new(2), ConversationId::new(102)));
    }

    #[test]
    fn missing_conversation_is_not_accessible() {
        let store = EntityStore::with_seed(Seed::demo()).unwrap();
        let guard = AccessGuard::new(&store);
        assert!(!guard.can_access(UserId::new(1), ConversationId::new(999)));
    }
}
