//! Appending and reading the messages of a conversation.

use crate::access::AccessGuard;
use crate::error::LedgerError;
use crate::message::Message;
use crate::store::EntityStore;
use chrono::{DateTime, Utc};
use parley_core::{ConversationId, Result, UserId};
use tracing::{debug, instrument};

/// Message operations on a conversation, gated by participant access.
#[derive(Debug, Clone, Copy)]
pub struct MessageLedger<'a> {
    store: &'a EntityStore,
    guard: AccessGuard<'a>,
}

impl<'a> MessageLedger<'a> {
    /// Creates a ledger over `store`.
    #[must_use]
    pub fn new(store: &'a EntityStore) -> Self {
        Self {
            store,
            guard: AccessGuard::new(store),
        }
    }

    /// Appends a message sent by `sender_id`, stamped with `now`.
    ///
    /// Surrounding whitespace is trimmed from `content` before storing.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Forbidden`] if the sender is not a participant.
    /// - [`LedgerError::EmptyContent`] if nothing is left after trimming.
    #[instrument(skip_all, fields(%conversation_id, %sender_id))]
    pub fn append(
        &self,
        conversation_id: ConversationId,
        sender_id: UserId,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<Message, LedgerError> {
        self.require_access(sender_id, conversation_id)?;

        let content = content.trim();
        if content.is_empty() {
            return Err(LedgerError::EmptyContent { conversation_id }.into());
        }

        let message = self
            .store
            .add_message(conversation_id, sender_id, content, now);
        debug!(message_id = %message.id, "appended message");
        Ok(message)
    }

    /// Returns the conversation's messages in chronological order.
    ///
    /// Messages sharing a timestamp are ordered by id. The result is a
    /// snapshot; messages appended afterwards are not reflected.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Forbidden`] if the requester is not a
    /// participant.
    #[instrument(skip_all, fields(%conversation_id, %requester_id))]
    pub fn list(
        &self,
        conversation_id: ConversationId,
        requester_id: UserId,
    ) -> Result<Vec<Message>, LedgerError> {
        self.require_access(requester_id, conversation_id)?;

        let mut messages = self.store.messages_for_conversation(conversation_id);
        messages.sort_by(Message::chronological);
        Ok(messages)
    }

    /// Returns the chronologically last message, if any.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Forbidden`] if the requester is not a
    /// participant.
    pub fn last(
        &self,
        conversation_id: ConversationId,
        requester_id: UserId,
    ) -> Result<Option<Message>, LedgerError> {
        Ok(self.list(conversation_id, requester_id)?.pop())
    }

    /// Checks that `user_id` may read or write the conversation.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Forbidden`] if the user is not a participant or
    /// the conversation does not exist.
    pub fn require_access(
        &self,
        user_id: UserId,
        conversation_id: ConversationId,
    ) -> Result<(), LedgerError> {
        if self.guard.can_access(user_id, conversation_id) {
            Ok(())
        } else {
            Err(LedgerError::Forbidden {
                user_id,
                conversation_id,
            }
            .into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Seed;
    use chrono::TimeZone;
    use parley_core::{ErrorKind, MessageId};

    const ANT: UserId = UserId::new(1);
    const BEE: UserId = UserId::new(2);
    const CAT: UserId = UserId::new(3);
    const ANT_BEE: ConversationId = ConversationId::new(101);

    fn store() -> EntityStore {
        EntityStore::with_seed(Seed::demo()).unwrap()
    }

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    #[test]
    fn append_then_list_returns_trimmed_message() {
        let store = store();
        let ledger = MessageLedger::new(&store);

        let sent = ledger.append(ANT_BEE, ANT, "  hello \n", at(1_000)).unwrap();
        assert_eq!(sent.content, "hello");

        let listed = ledger.list(ANT_BEE, ANT).unwrap();
        assert_eq!(listed, vec![sent.clone()]);
        assert_eq!(listed[0].id, sent.id);
        assert_eq!(listed[0].created_at, at(1_000));
    }

    #[test]
    fn both_participants_see_the_same_history() {
        let store = store();
        let ledger = MessageLedger::new(&store);
        ledger.append(ANT_BEE, ANT, "ping", at(1)).unwrap();
        ledger.append(ANT_BEE, BEE, "pong", at(2)).unwrap();

        assert_eq!(
            ledger.list(ANT_BEE, ANT).unwrap(),
            ledger.list(ANT_BEE, BEE).unwrap()
        );
    }

    #[test]
    fn empty_content_is_rejected() {
        let store = store();
        let ledger = MessageLedger::new(&store);
        for content in ["", "   ", "\t\n"] {
            let err = ledger.append(ANT_BEE, ANT, content, at(1)).unwrap_err();
            assert_eq!(err.current_context().kind(), ErrorKind::InvalidArgument);
        }
        assert!(ledger.list(ANT_BEE, ANT).unwrap().is_empty());
    }

    #[test]
    fn outsiders_cannot_append_or_list() {
        let store = store();
        let ledger = MessageLedger::new(&store);
        ledger.append(ANT_BEE, ANT, "private", at(1)).unwrap();

        let err = ledger.append(ANT_BEE, CAT, "let me in", at(2)).unwrap_err();
        assert_eq!(
            *err.current_context(),
            LedgerError::Forbidden {
                user_id: CAT,
                conversation_id: ANT_BEE,
            }
        );
        let err = ledger.list(ANT_BEE, CAT).unwrap_err();
        assert_eq!(err.current_context().kind(), ErrorKind::Forbidden);
        assert_eq!(ledger.list(ANT_BEE, ANT).unwrap().len(), 1);
    }

    #[test]
    fn access_is_checked_before_content() {
        let store = store();
        let err = MessageLedger::new(&store)
            .append(ANT_BEE, CAT, "   ", at(1))
            .unwrap_err();
        assert_eq!(err.current_context().kind(), ErrorKind::Forbidden);
    }

    #[test]
    fn missing_conversation_is_forbidden() {
        let store = store();
        let ledger = MessageLedger::new(&store);
        let missing = ConversationId::new(404);
        let err = ledger.list(missing, ANT).unwrap_err();
        assert_eq!(err.current_context().kind(), ErrorKind::Forbidden);
        let err = ledger.append(missing, ANT, "hi", at(1)).unwrap_err();
        assert_eq!(err.current_context().kind(), ErrorKind::Forbidden);
    }

    #[test]
    fn require_access_matches_membership() {
        let store = store();
        let ledger = MessageLedger::new(&store);
        assert!(ledger.require_access(BEE, ANT_BEE).is_ok());
        let err = ledger.require_access(CAT, ANT_BEE).unwrap_err();
        assert_eq!(
            *err.current_context(),
            LedgerError::Forbidden {
                user_id: CAT,
                conversation_id: ANT_BEE,
            }
        );
    }

    #[test]
    fn list_orders_by_timestamp_then_id() {
        let store = store();
        let ledger = MessageLedger::new(&store);

        // Inserted out of timestamp order, with ties.
        let late = ledger.append(ANT_BEE, ANT, "late", at(300)).unwrap();
        let tie_a = ledger.append(ANT_BEE, BEE, "tie a", at(200)).unwrap();
        let early = ledger.append(ANT_BEE, ANT, "early", at(100)).unwrap();
        let tie_b = ledger.append(ANT_BEE, ANT, "tie b", at(200)).unwrap();
        let tie_c = ledger.append(ANT_BEE, BEE, "tie c", at(200)).unwrap();

        let ids: Vec<MessageId> = ledger
            .list(ANT_BEE, BEE)
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, [early.id, tie_a.id, tie_b.id, tie_c.id, late.id]);
    }

    #[test]
    fn list_is_isolated_per_conversation() {
        let store = store();
        let ledger = MessageLedger::new(&store);
        ledger.append(ANT_BEE, BEE, "for ant", at(1)).unwrap();
        ledger
            .append(ConversationId::new(102), CAT, "also for ant", at(2))
            .unwrap();

        let contents: Vec<String> = ledger
            .list(ANT_BEE, ANT)
            .unwrap()
            .into_iter()
            .map(|m| m.content)
            .collect();
        assert_eq!(contents, ["for ant"]);
    }

    #[test]
    fn readers_see_consistent_snapshots_during_appends() {
        const WRITERS: usize = 4;
        const PER_WRITER: usize = 100;

        let store = store();
        let ledger = MessageLedger::new(&store);

        std::thread::scope(|scope| {
            for w in 0..WRITERS {
                scope.spawn(move || {
                    let sender = if w % 2 == 0 { ANT } else { BEE };
                    for i in 0..PER_WRITER {
                        ledger
                            .append(ANT_BEE, sender, &format!("{w}:{i}"), at(i as i64))
                            .unwrap();
                    }
                });
            }
            scope.spawn(move || {
                let mut seen = 0;
                while seen < WRITERS * PER_WRITER {
                    let snapshot = ledger.list(ANT_BEE, ANT).unwrap();
                    assert!(snapshot.len() >= seen);
                    assert!(snapshot.iter().all(|m| !m.content.is_empty()));
                    assert!(snapshot.windows(2).all(|w| w[0].chronological(&w[1]).is_lt()));
                    seen = snapshot.len();
                }
            });
        });

        assert_eq!(
            ledger.list(ANT_BEE, BEE).unwrap().len(),
            WRITERS * PER_WRITER
        );
    }

    #[test]
    fn last_returns_latest_or_none() {
        let store = store();
        let ledger = MessageLedger::new(&store);
        assert_eq!(ledger.last(ANT_BEE, ANT).unwrap(), None);

        ledger.append(ANT_BEE, ANT, "second", at(20)).unwrap();
        ledger.append(ANT_BEE, BEE, "first", at(10)).unwrap();
        let last = ledger.last(ANT_BEE, BEE).unwrap().unwrap();
        assert_eq!(last.content, "second");
    }
}
