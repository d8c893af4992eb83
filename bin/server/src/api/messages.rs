//! Message list and send handlers.

use super::params::{self, RequesterQuery, conversation_id, json_body};
use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{MessageView, SendMessageRequest};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use chrono::Utc;
use parley_conversation::{EntityStore, Message, MessageLedger};
use std::sync::Arc;

/// `GET /api/conversations/{id}/messages?userId=`
///
/// Lists the conversation's messages in chronological order.
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    query: Result<Query<RequesterQuery>, QueryRejection>,
) -> Result<Json<Vec<MessageView>>, ApiError> {
    let requester = params::requester(query)?;
    let conversation_id = conversation_id(&raw_id)?;

    let messages = MessageLedger::new(&state.store).list(conversation_id, requester)?;
    let views: Vec<MessageView> = messages
        .iter()
        .map(|m| message_view(&state.store, m))
        .collect::<Result<_, _>>()?;

    Ok(Json(views))
}

/// `POST /api/conversations/{id}/messages?userId=` with body
/// `{"content": "..."}`
///
/// Membership is checked before the body is looked at.
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    query: Result<Query<RequesterQuery>, QueryRejection>,
    body: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageView>), ApiError> {
    let requester = params::requester(query)?;
    let conversation_id = conversation_id(&raw_id)?;
    let ledger = MessageLedger::new(&state.store);
    ledger.require_access(requester, conversation_id)?;
    let content = json_body(body)?.content.unwrap_or_default();

    let message = ledger.append(
        conversation_id,
        requester,
        &content,
        Utc::now(),
    )?;

    Ok((
        StatusCode::CREATED,
        Json(message_view(&state.store, &message)?),
    ))
}

fn message_view(store: &EntityStore, message: &Message) -> Result<MessageView, ApiError> {
    let sender = store
        .user(message.sender_id)
        .ok_or_else(|| ApiError::Internal {
            details: format!(
                "sender {} of message {} is not a known user",
                message.sender_id, message.id
            ),
        })?;
    Ok(MessageView::new(message, sender))
}
