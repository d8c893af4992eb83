//! Shared application state.

use crate::config::StoreConfig;
use parley_conversation::{EntityStore, Seed, SeedError};
use rootcause::prelude::Report;

/// State shared by every request handler.
///
/// Created once at startup and handed to the router behind an `Arc`.
#[derive(Debug)]
pub struct AppState {
    /// The single entity store of the process.
    pub store: EntityStore,
}

impl AppState {
    /// Creates application state around an existing store.
    #[must_use]
    pub fn new(store: EntityStore) -> Self {
        Self { store }
    }

    /// Builds the store described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed data is inconsistent.
    pub fn from_config(config: &StoreConfig) -> Result<Self, Report<SeedError>> {
        let seed = if config.seed_demo_data {
            Seed::demo()
        } else {
            Seed::default()
        };
        Ok(Self::new(EntityStore::with_seed(seed)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::UserId;

    #[test]
    fn demo_seed_is_loaded_by_default() {
        let state = AppState::from_config(&StoreConfig::default()).unwrap();
        assert_eq!(state.store.users().count(), 3);
        assert_eq!(state.store.user(UserId::new(2)).unwrap().name(), "Bee");
    }

    #[test]
    fn seeding_can_be_disabled() {
        let state = AppState::from_config(&StoreConfig {
            seed_demo_data: false,
        })
        .unwrap();
        assert_eq!(state.store.users().count(), 0);
    }
}
