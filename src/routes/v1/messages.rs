//! Chat-message endpoints: list a chat's log and append to it.
//!
//! Both handlers are thin pass-throughs to the [`MessageStore`]: one store
//! query or one store write, then an envelope.  Messages are immutable,
//! there is no update or delete surface, and a chat exists exactly as long
//! as it has messages.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use utoipa::OpenApi;

use crate::entities::{MessageRecord, MessageStore};
use crate::error::ServerError;
use crate::schemas::v1::messages::{
    ListMessagesResponse, MessageItem, SendMessageRequest, StatusResponse,
};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(list_messages, send_message),
    components(schemas(
        ListMessagesResponse,
        MessageItem,
        SendMessageRequest,
        StatusResponse
    ))
)]
pub struct MessagesApi;

/// Register chat-message routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/chats/{chat_id}/messages",
        get(list_messages).post(send_message),
    )
}

// ── Message handlers ──────────────────────────────────────────────────────────

/// List every message in a chat (`GET /v1/chats/{chat_id}/messages`).
///
/// Returns the full log sorted by `ts` ascending; no time-range filter, no
/// limit, no pagination cursor.  An empty result maps to 404 — a chat with
/// no messages is indistinguishable from one that never existed.
#[utoipa::path(
    get,
    path = "/v1/chats/{chat_id}/messages",
    tag = "messages",
    responses(
        (status = 200, description = "Messages in the chat", body = ListMessagesResponse),
        (status = 404, description = "Chat not found", body = StatusResponse),
        (status = 500, description = "Store error", body = StatusResponse),
    )
)]
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<String>,
) -> Result<Json<ListMessagesResponse>, ServerError> {
    // The id is opaque and deliberately unvalidated; an unknown or malformed
    // value simply matches no rows.
    let records = state.store.list_messages(&chat_id).await?;
    if records.is_empty() {
        return Err(ServerError::ChatNotFound(chat_id));
    }
    Ok(Json(ListMessagesResponse {
        status: StatusCode::OK.as_u16(),
        messages: records.iter().map(MessageRecord::to_response).collect(),
    }))
}

/// Post a new message into a chat (`POST /v1/chats/{chat_id}/messages`).
///
/// Writes unconditionally: no existence check, no deduplication, no
/// idempotency key.  The timestamp is assigned here, at write time.  The
/// created message is not echoed back.
#[utoipa::path(
    post,
    path = "/v1/chats/{chat_id}/messages",
    tag = "messages",
    request_body = SendMessageRequest,
    responses(
        (status = 201, description = "Message posted", body = StatusResponse),
        (status = 400, description = "Missing required field", body = StatusResponse),
        (status = 500, description = "Store error", body = StatusResponse),
    )
)]
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<String>,
    Json(req): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<StatusResponse>), ServerError> {
    let user_id = req
        .user_id
        .ok_or_else(|| ServerError::BadRequest("missing required field: user_id".into()))?;
    let text = req
        .text
        .ok_or_else(|| ServerError::BadRequest("missing required field: text".into()))?;

    state
        .store
        .append_message(MessageRecord {
            chat_id: chat_id.clone(),
            ts: Utc::now(),
            user_id,
            text,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(StatusResponse {
            status: StatusCode::CREATED.as_u16(),
            title: "OK".into(),
            detail: format!("New message posted into chat {chat_id}"),
        }),
    ))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
