//! Conversation list and create/find handlers.

use super::params::{self, RequesterQuery, json_body};
use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{ConversationSummaryView, ConversationView, CreateConversationRequest};
use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use parley_conversation::{ConversationResolver, SummaryBuilder};
use std::sync::Arc;

/// `GET /api/conversations?userId=`
///
/// Lists the requester's conversations, most recent activity first.
pub async fn list_conversations(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RequesterQuery>, QueryRejection>,
) -> Result<Json<Vec<ConversationSummaryView>>, ApiError> {
    let requester = params::requester(query)?;

    let summaries = SummaryBuilder::new(&state.store)
        .list_for_user(requester)
        .iter()
        .map(ConversationSummaryView::from)
        .collect();

    Ok(Json(summaries))
}

/// `POST /api/conversations?userId=` with body `{"participantId": n}`
///
/// Returns the existing conversation with the partner (200) or creates one
/// (201).
pub async fn create_conversation(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RequesterQuery>, QueryRejection>,
    body: Result<Json<CreateConversationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ConversationView>), ApiError> {
    let requester = params::requester(query)?;
    let partner = json_body(body)?
        .participant_id
        .filter(|id| id.get() != 0)
        .ok_or(ApiError::MissingParameter {
            name: "participantId",
        })?;

    let resolution = ConversationResolver::new(&state.store).get_or_create(requester, partner)?;
    let status = if resolution.was_created() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(ConversationView::from(resolution.conversation()))))
}
