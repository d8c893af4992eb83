//! Find-or-create for two-party conversations.
//!
//! The lookup of an existing pair and the creation of a missing one run
//! under a single write lock on the conversation collection, so concurrent
//! requests for the same new pair end up sharing one conversation.

use crate::conversation::Conversation;
use crate::error::ResolveError;
use crate::store::EntityStore;
use parley_core::{Result, UserId};
use tracing::{debug, info, instrument};

/// Outcome of [`ConversationResolver::get_or_create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The pair already had a conversation; it is returned unchanged.
    Existing(Conversation),
    /// No conversation existed; this one was just created.
    Created(Conversation),
}

impl Resolution {
    /// Returns the resolved conversation.
    #[must_use]
    pub fn conversation(&self) -> &Conversation {
        match self {
            Self::Existing(c) | Self::Created(c) => c,
        }
    }

    /// Consumes the resolution, returning the conversation.
    #[must_use]
    pub fn into_conversation(self) -> Conversation {
        match self {
            Self::Existing(c) | Self::Created(c) => c,
        }
    }

    /// Returns true if the conversation was created by this call.
    #[must_use]
    pub fn was_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Keeps at most one conversation per pair of users.
#[derive(Debug, Clone, Copy)]
pub struct ConversationResolver<'a> {
    store: &'a EntityStore,
}

impl<'a> ConversationResolver<'a> {
    /// Creates a resolver over `store`.
    #[must_use]
    pub fn new(store: &'a EntityStore) -> Self {
        Self { store }
    }

    /// Returns the conversation between `requester` and `partner`, creating
    /// it if the pair has none yet.
    ///
    /// Repeated calls, in either argument order, return the same
    /// conversation.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::SelfConversation`] if both ids are equal.
    /// - [`ResolveError::UserNotFound`] if either id names no user.
    #[instrument(skip_all, fields(%requester, %partner))]
    pub fn get_or_create(
        &self,
        requester: UserId,
        partner: UserId,
    ) -> Result<Resolution, ResolveError> {
        if requester == partner {
            debug!("rejected self conversation");
            return Err(ResolveError::SelfConversation { user_id: requester }.into());
        }
        for user_id in [partner, requester] {
            if self.store.user(user_id).is_none() {
                debug!(%user_id, "unknown user");
                return Err(ResolveError::UserNotFound { user_id }.into());
            }
        }

        let mut conversations = self.store.write_conversations();
        if let Some(existing) = conversations.find_by_pair(requester, partner) {
            debug!(conversation_id = %existing.id, "found existing conversation");
            return Ok(Resolution::Existing(existing.clone()));
        }

        let created = conversations.insert(requester, partner);
        info!(conversation_id = %created.id, "created conversation");
        Ok(Resolution::Created(created))
    }
}
