//! User domain type.
//!
//! Users are seeded when the store is built and never change afterwards.
//! Identity is asserted by the caller; there is no authentication here.

use parley_core::UserId;
use serde::{Deserialize, Serialize};

/// A participant of the messaging system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID.
    id: UserId,
    /// Name shown to the other participant.
    name: String,
}

impl User {
    /// Creates a user.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Returns the user's ID.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Returns the user's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
