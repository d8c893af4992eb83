//! In-memory entity store for users, conversations and messages.
//!
//! The store exclusively owns all three collections. Users are fixed at
//! construction time and need no locking. Conversations and messages each
//! live behind their own lock; id allocation happens while that lock is held
//! for writing, so two concurrent inserts can never observe the same
//! "highest id" and hand out duplicates.

use crate::conversation::{Conversation, ParticipantPair};
use crate::error::SeedError;
use crate::message::Message;
use crate::user::User;
use chrono::{DateTime, Utc};
use parking_lot::{RwLock, RwLockWriteGuard};
use parley_core::{ConversationId, MessageId, UserId};
use rootcause::prelude::Report;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

/// Initial contents of an [`EntityStore`].
#[derive(Debug, Clone, Default)]
pub struct Seed {
    /// Users known to the system.
    pub users: Vec<User>,
    /// Pre-existing conversations.
    pub conversations: Vec<Conversation>,
    /// Pre-existing messages.
    pub messages: Vec<Message>,
}

impl Seed {
    /// The demo data set: three users and two conversations, no messages.
    #[must_use]
    pub fn demo() -> Self {
        let ant = UserId::new(1);
        let bee = UserId::new(2);
        let cat = UserId::new(3);
        Self {
            users: vec![
                User::new(ant, "Ant"),
                User::new(bee, "Bee"),
                User::new(cat, "Cat"),
            ],
            conversations: vec![
                Conversation::new(ConversationId::new(101), ant, bee),
                Conversation::new(ConversationId::new(102), ant, cat),
            ],
            messages: Vec::new(),
        }
    }
}

/// The conversation collection.
///
/// Obtained through [`EntityStore::write_conversations`] when a caller
/// needs to look up and insert under a single lock acquisition.
#[derive(Debug)]
pub struct ConversationTable {
    by_id: BTreeMap<ConversationId, Conversation>,
    by_pair: HashMap<ParticipantPair, ConversationId>,
    highest_id: ConversationId,
}

impl ConversationTable {
    fn new() -> Self {
        Self {
            by_id: BTreeMap::new(),
            by_pair: HashMap::new(),
            highest_id: ConversationId::new(0),
        }
    }

    fn store(&mut self, conversation: Conversation) {
        self.highest_id = self.highest_id.max(conversation.id);
        self.by_pair
            .entry(conversation.pair())
            .or_insert(conversation.id);
        self.by_id.insert(conversation.id, conversation);
    }

    /// Returns the conversation with the given id.
    #[must_use]
    pub fn get(&self, id: ConversationId) -> Option<&Conversation> {
        self.by_id.get(&id)
    }

    /// Returns the conversation whose participant set is exactly `{a, b}`.
    #[must_use]
    pub fn find_by_pair(&self, a: UserId, b: UserId) -> Option<&Conversation> {
        self.by_pair
            .get(&ParticipantPair::new(a, b))
            .and_then(|id| self.by_id.get(id))
    }

    /// Iterates the conversations containing `user_id`, by ascending id.
    pub fn for_user(&self, user_id: UserId) -> impl Iterator<Item = &Conversation> {
        self.by_id
            .values()
            .filter(move |c| c.has_participant(user_id))
    }

    /// Stores a new conversation under the next free id.
    ///
    /// The next id is the highest id ever stored plus one. No duplicate
    /// check is made here; keeping pairs unique is the resolver's job.
    pub fn insert(&mut self, a: UserId, b: UserId) -> Conversation {
        let conversation = Conversation::new(self.highest_id.next(), a, b);
        self.store(conversation.clone());
        debug!(conversation_id = %conversation.id, "stored conversation");
        conversation
    }

    /// Returns the number of stored conversations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Returns true if no conversation is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[derive(Debug)]
struct MessageTable {
    by_conversation: HashMap<ConversationId, Vec<Message>>,
    ids: HashSet<MessageId>,
    highest_id: MessageId,
}

impl MessageTable {
    fn new() -> Self {
        Self {
            by_conversation: HashMap::new(),
            ids: HashSet::new(),
            highest_id: MessageId::new(0),
        }
    }

    fn store(&mut self, message: Message) {
        self.highest_id = self.highest_id.max(message.id);
        self.ids.insert(message.id);
        self.by_conversation
            .entry(message.conversation_id)
            .or_default()
            .push(message);
    }

    fn insert(
        &mut self,
        conversation_id: ConversationId,
        sender_id: UserId,
        content: String,
        created_at: DateTime<Utc>,
    ) -> Message {
        let message = Message::new(
            self.highest_id.next(),
            conversation_id,
            sender_id,
            content,
            created_at,
        );
        self.store(message.clone());
        message
    }
}

/// Owner of all users, conversations and messages.
///
/// One instance is built at startup and shared by handle; every other
/// component borrows it.
#[derive(Debug)]
pub struct EntityStore {
    users: BTreeMap<UserId, User>,
    conversations: RwLock<ConversationTable>,
    messages: RwLock<MessageTable>,
}

impl EntityStore {
    /// Creates a store with the given users and no conversations.
    ///
    /// # Errors
    ///
    /// Returns an error if two users share an id.
    pub fn new(users: impl IntoIterator<Item = User>) -> Result<Self, Report<SeedError>> {
        Self::with_seed(Seed {
            users: users.into_iter().collect(),
            ..Seed::default()
        })
    }

    /// Creates a store pre-populated with `seed`.
    ///
    /// Id allocation continues after the highest seeded id of each
    /// collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed breaks referential integrity: duplicate
    /// ids, self-pairs, repeated pairs, unknown participants, unknown
    /// conversations or senders outside their conversation. Conversation
    /// and message ids equal to the id type's maximum are refused.
    pub fn with_seed(seed: Seed) -> Result<Self, Report<SeedError>> {
        let mut users = BTreeMap::new();
        for user in seed.users {
            let user_id = user.id();
            if users.insert(user_id, user).is_some() {
                return Err(SeedError::DuplicateUser { user_id }.into());
            }
        }

        let mut conversations = ConversationTable::new();
        for conversation in seed.conversations {
            let conversation_id = conversation.id;
            if conversation_id == ConversationId::MAX {
                return Err(SeedError::ConversationIdExhausted { conversation_id }.into());
            }
            if conversations.get(conversation_id).is_some() {
                return Err(SeedError::DuplicateConversation { conversation_id }.into());
            }
            if conversation.pair().is_self_pair() {
                return Err(SeedError::SelfConversation { conversation_id }.into());
            }
            if let Some(&user_id) = conversation
                .participant_ids
                .iter()
                .find(|id| !users.contains_key(*id))
            {
                return Err(SeedError::UnknownParticipant {
                    conversation_id,
                    user_id,
                }
                .into());
            }
            let [a, b] = conversation.participant_ids;
            if let Some(existing) = conversations.find_by_pair(a, b) {
                return Err(SeedError::DuplicatePair {
                    conversation_id,
                    existing: existing.id,
                }
                .into());
            }
            conversations.store(conversation);
        }

        let mut messages = MessageTable::new();
        for message in seed.messages {
            let message_id = message.id;
            if message_id == MessageId::MAX {
                return Err(SeedError::MessageIdExhausted { message_id }.into());
            }
            if messages.ids.contains(&message_id) {
                return Err(SeedError::DuplicateMessage { message_id }.into());
            }
            let Some(conversation) = conversations.get(message.conversation_id) else {
                return Err(SeedError::UnknownConversation {
                    message_id,
                    conversation_id: message.conversation_id,
                }
                .into());
            };
            if !conversation.has_participant(message.sender_id) {
                return Err(SeedError::SenderNotParticipant {
                    message_id,
                    sender_id: message.sender_id,
                }
                .into());
            }
            messages.store(message);
        }

        debug!(
            users = users.len(),
            conversations = conversations.len(),
            messages = messages.ids.len(),
            "entity store seeded"
        );

        Ok(Self {
            users,
            conversations: RwLock::new(conversations),
            messages: RwLock::new(messages),
        })
    }

    /// Returns the user with the given id.
    #[must_use]
    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    /// Iterates all users by ascending id.
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Returns the conversation with the given id.
    #[must_use]
    pub fn conversation(&self, id: ConversationId) -> Option<Conversation> {
        self.conversations.read().get(id).cloned()
    }

    /// Returns the conversations containing `user_id`, by ascending id.
    #[must_use]
    pub fn conversations_for_user(&self, user_id: UserId) -> Vec<Conversation> {
        self.conversations
            .read()
            .for_user(user_id)
            .cloned()
            .collect()
    }

    /// Returns the conversation whose participant set is exactly `{a, b}`.
    #[must_use]
    pub fn find_conversation_by_pair(&self, a: UserId, b: UserId) -> Option<Conversation> {
        self.conversations.read().find_by_pair(a, b).cloned()
    }

    /// Returns a snapshot of a conversation's messages in insertion order.
    #[must_use]
    pub fn messages_for_conversation(&self, conversation_id: ConversationId) -> Vec<Message> {
        self.messages
            .read()
            .by_conversation
            .get(&conversation_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Stores a new conversation between `a` and `b`.
    ///
    /// Trusts its caller: neither the pair nor the users are validated.
    /// [`ConversationResolver`](crate::ConversationResolver) performs those
    /// checks for request traffic.
    pub fn add_conversation(&self, a: UserId, b: UserId) -> Conversation {
        self.write_conversations().insert(a, b)
    }

    /// Stores a new message under the next id across all conversations.
    pub fn add_message(
        &self,
        conversation_id: ConversationId,
        sender_id: UserId,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Message {
        let message =
            self.messages
                .write()
                .insert(conversation_id, sender_id, content.into(), created_at);
        debug!(
            message_id = %message.id,
            conversation_id = %conversation_id,
            "stored message"
        );
        message
    }

    /// Locks the conversation collection for a read-then-insert sequence.
    ///
    /// Other writers and readers of conversations wait until the guard is
    /// dropped, which makes lookup and creation a single atomic step.
    pub fn write_conversations(&self) -> RwLockWriteGuard<'_, ConversationTable> {
        self.conversations.write()
    }
}
