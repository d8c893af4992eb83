//! Two-party conversations.
//!
//! A conversation is identified by its id, but the unordered pair of its
//! participants is a natural key as well: the store keeps at most one
//! conversation per [`ParticipantPair`].

use parley_core::{ConversationId, UserId};
use serde::{Deserialize, Serialize};

/// Order-independent key for a pair of users.
///
/// `ParticipantPair::new(a, b) == ParticipantPair::new(b, a)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticipantPair {
    low: UserId,
    high: UserId,
}

impl ParticipantPair {
    /// Creates the key for the pair `{a, b}`.
    #[must_use]
    pub fn new(a: UserId, b: UserId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Returns true if both sides name the same user.
    #[must_use]
    pub fn is_self_pair(&self) -> bool {
        self.low == self.high
    }

    /// Returns both users, lowest id first.
    #[must_use]
    pub fn users(&self) -> [UserId; 2] {
        [self.low, self.high]
    }
}

/// A conversation between exactly two users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    /// Unique conversation identifier.
    pub id: ConversationId,
    /// Both participants, in the order they were given at creation.
    pub participant_ids: [UserId; 2],
}

impl Conversation {
    /// Creates a conversation between `a` and `b`.
    #[must_use]
    pub fn new(id: ConversationId, a: UserId, b: UserId) -> Self {
        Self {
            id,
            participant_ids: [a, b],
        }
    }

    /// Returns the natural key of this conversation.
    #[must_use]
    pub fn pair(&self) -> ParticipantPair {
        ParticipantPair::new(self.participant_ids[0], self.participant_ids[1])
    }

    /// Returns true if `user_id` is one of the two participants.
    #[must_use]
    pub fn has_participant(&self, user_id: UserId) -> bool {
        self.participant_ids.contains(&user_id)
    }

    /// Returns the participant that is not `user_id`.
    ///
    /// Returns `None` when `user_id` is not a participant.
    #[must_use]
    pub fn other_participant(&self, user_id: UserId) -> Option<UserId> {
        match self.participant_ids {
            [a, b] if a == user_id => Some(b),
            [a, b] if b == user_id => Some(a),
            _ => None,
        }
    }
}
