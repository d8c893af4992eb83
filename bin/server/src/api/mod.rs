//! HTTP API routes.
//!
//! The client polls these endpoints; nothing is pushed. The requester is
//! whoever the `userId` query parameter names.

pub mod conversations;
pub mod messages;
pub mod params;
pub mod users;

use crate::state::AppState;
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Builds the API router over `state`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/conversations",
            get(conversations::list_conversations).post(conversations::create_conversation),
        )
        .route(
            "/api/conversations/{id}/messages",
            get(messages::list_messages).post(messages::send_message),
        )
        .route("/api/users/me", get(users::current_user))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
