//! parley web server.
//!
//! This crate exposes the conversation store over a small JSON API that a
//! polling client consumes.

pub mod api;
pub mod config;
pub mod error;
pub mod state;
pub mod types;

pub use api::router;
pub use config::ServerConfig;
pub use error::ApiError;
pub use state::AppState;
