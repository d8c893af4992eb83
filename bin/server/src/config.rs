//! Centralized server configuration.
//!
//! This module provides strongly-typed configuration for the server,
//! loaded via the `config` crate from environment variables. Nested keys use
//! a double underscore, e.g. `STORE__SEED_DEMO_DATA=false`.

use serde::Deserialize;

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Entity store configuration.
    #[serde(default)]
    pub store: StoreConfig,
}

/// Entity store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Whether to start with the demo users and conversations.
    /// Without it the store starts with no users at all.
    #[serde(default = "default_seed_demo_data")]
    pub seed_demo_data: bool,
}

fn default_bind_address() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_seed_demo_data() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_demo_data: default_seed_demo_data(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            store: StoreConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration values are present but invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_source(
            config::Environment::default()
                .separator("__")
                .try_parsing(true),
        )
    }

    fn from_source(
        source: impl config::Source + Send + Sync + 'static,
    ) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        config::Environment::default()
            .separator("__")
            .try_parsing(true)
            .source(Some(source))
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = ServerConfig::from_source(env(&[])).unwrap();
        assert_eq!(config.bind_address, "127.0.0.1:3000");
        assert!(config.store.seed_demo_data);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = ServerConfig::from_source(env(&[
            ("BIND_ADDRESS", "0.0.0.0:8080"),
            ("STORE__SEED_DEMO_DATA", "false"),
        ]))
        .unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:8080");
        assert!(!config.store.seed_demo_data);
    }

    #[test]
    fn store_config_has_correct_defaults() {
        assert!(StoreConfig::default().seed_demo_data);
    }
}
