//! Conversation and message store for the parley platform.
//!
//! This crate provides:
//!
//! - **Entity Store**: Users, conversations and messages with id allocation
//! - **Access Guard**: Conversation membership checks
//! - **Conversation Resolver**: At most one conversation per pair of users
//! - **Message Ledger**: Append and chronological listing of messages
//! - **Summary Builder**: A user's conversations, most recent first

pub mod access;
pub mod conversation;
pub mod error;
pub mod ledger;
pub mod message;
pub mod resolver;
pub mod store;
pub mod summary;
pub mod user;

pub use access::AccessGuard;
pub use conversation::{Conversation, ParticipantPair};
pub use error::{LedgerError, ResolveError, SeedError};
pub use ledger::MessageLedger;
pub use message::Message;
pub use resolver::{ConversationResolver, Resolution};
pub use store::{ConversationTable, EntityStore, Seed};
pub use summary::{ConversationSummary, SummaryBuilder};
pub use user::User;
