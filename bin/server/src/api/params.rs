//! Request parameter parsing shared by the API handlers.

use crate::error::ApiError;
use axum::extract::{
    Query,
    rejection::{JsonRejection, QueryRejection},
};
use parley_core::{ConversationId, UserId};
use serde::Deserialize;
use std::str::FromStr;

/// The `?userId=` query parameter naming the asserted requester.
#[derive(Debug, Default, Deserialize)]
pub struct RequesterQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

impl RequesterQuery {
    /// Parses the requester id.
    ///
    /// # Errors
    ///
    /// Returns a bad-request error when the parameter is missing or empty,
    /// or not an unsigned integer.
    pub fn requester(&self) -> Result<UserId, ApiError> {
        let raw = self
            .user_id
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or(ApiError::MissingParameter { name: "userId" })?;
        parse_id(raw, "userId")
    }
}

/// Extracts the requester from the query string.
///
/// # Errors
///
/// Returns a bad-request error when the query string cannot be decoded or
/// the requester id is missing or malformed.
pub fn requester(
    query: Result<Query<RequesterQuery>, QueryRejection>,
) -> Result<UserId, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::InvalidQuery {
        details: rejection.body_text(),
    })?;
    query.requester()
}

/// Parses a conversation id taken from the request path.
///
/// # Errors
///
/// Returns a bad-request error when the segment is not an unsigned integer.
pub fn conversation_id(raw: &str) -> Result<ConversationId, ApiError> {
    parse_id(raw, "conversation id")
}

/// Unwraps a JSON body, turning extractor rejections into bad requests.
///
/// # Errors
///
/// Returns [`ApiError::InvalidBody`] for malformed or mistyped bodies.
pub fn json_body<T>(body: Result<axum::Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|axum::Json(value)| value)
        .map_err(|rejection| ApiError::InvalidBody {
            details: rejection.body_text(),
        })
}

fn parse_id<T: FromStr>(raw: &str, name: &'static str) -> Result<T, ApiError> {
    raw.parse().map_err(|_| ApiError::InvalidParameter {
        name,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(user_id: Option<&str>) -> RequesterQuery {
        RequesterQuery {
            user_id: user_id.map(str::to_string),
        }
    }

    #[test]
    fn requester_parses_integer() {
        assert_eq!(query(Some("2")).requester(), Ok(UserId::new(2)));
    }

    #[test]
    fn requester_missing_or_blank() {
        let missing = ApiError::MissingParameter { name: "userId" };
        assert_eq!(query(None).requester(), Err(missing.clone()));
        assert_eq!(query(Some("  ")).requester(), Err(missing));
    }

    #[test]
    fn requester_unparseable() {
        assert_eq!(
            query(Some("ant")).requester(),
            Err(ApiError::InvalidParameter {
                name: "userId",
                value: "ant".to_string(),
            })
        );
    }

    #[test]
    fn conversation_id_from_path() {
        assert_eq!(conversation_id("101"), Ok(ConversationId::new(101)));
        assert!(conversation_id("abc").is_err());
    }
}
