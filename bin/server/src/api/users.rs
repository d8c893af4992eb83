//! Current-user lookup for the client's user switcher.

use super::params::{self, RequesterQuery};
use crate::error::ApiError;
use crate::state::AppState;
use crate::types::UserView;
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use std::sync::Arc;

/// `GET /api/users/me?userId=`
pub async fn current_user(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RequesterQuery>, QueryRejection>,
) -> Result<Json<UserView>, ApiError> {
    let user_id = params::requester(query)?;
    let user = state
        .store
        .user(user_id)
        .ok_or_else(|| ApiError::NotFound {
            message: "User not found".to_string(),
        })?;
    Ok(Json(UserView::from(user)))
}
