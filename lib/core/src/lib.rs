//! Core domain types and utilities for the parley messaging backend.
//!
//! This crate provides the identifier types and the error-handling
//! foundation shared by the conversation store and the HTTP server.

pub mod error;
pub mod id;

pub use error::{ErrorKind, Result};
pub use id::{ConversationId, MessageId, ParseIdError, UserId};
