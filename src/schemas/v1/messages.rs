//! Wire types for the `/v1` chat-message endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::MessageRecord;

/// One message as served to clients.
///
/// `chat_id` is not echoed; callers already know which chat they asked for.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageItem {
    /// ISO-8601 timestamp with explicit UTC offset.
    pub ts: String,
    pub user_id: String,
    pub text: String,
}

/// Response body for `GET /v1/chats/{chat_id}/messages`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListMessagesResponse {
    /// Mirrors the HTTP status code (`200`).
    pub status: u16,
    /// The chat's full log, `ts` ascending.  No pagination.
    pub messages: Vec<MessageItem>,
}

/// Request body for `POST /v1/chats/{chat_id}/messages`.
///
/// Both fields are required.  They deserialize as optional only so a missing
/// field surfaces as a structured validation error instead of a bare
/// deserialization rejection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SendMessageRequest {
    pub user_id: Option<String>,
    pub text: Option<String>,
}

/// Status envelope used for every non-list response (201, 400, 404, 500).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    /// Mirrors the HTTP status code.
    pub status: u16,
    pub title: String,
    pub detail: String,
}

impl MessageRecord {
    pub fn to_response(&self) -> MessageItem {
        MessageItem {
            ts: self.ts_rfc3339(),
            user_id: self.user_id.clone(),
            text: self.text.clone(),
        }
    }
}
