//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors are automatically converted
//! to the JSON `{"status", "title", "detail"}` envelope with an appropriate
//! status code.
//!
//! **Security note:** Internal errors (Database, Internal) are logged with
//! full detail but only a generic message is returned to the caller so that
//! file paths, SQL, or other implementation details never leak to clients.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// All errors that can occur in the chatlog-server request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The caller referenced a chat that has no messages. A chat with no
    /// messages is indistinguishable from one that never existed.
    #[error("chat not found: {0}")]
    ChatNotFound(String),

    /// The caller sent an invalid or incomplete request.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Propagated from the SQLite (or other) store.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An unclassified internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, title, detail) = match &self {
            // Client-facing errors: expose the detail directly.
            ServerError::ChatNotFound(chat_id) => (
                StatusCode::NOT_FOUND,
                "Chat not found",
                format!("Chat {chat_id} not found in database"),
            ),
            ServerError::BadRequest(m) => {
                (StatusCode::BAD_REQUEST, "Validation error", m.clone())
            }

            // Internal errors: log the full detail, return a generic message.
            ServerError::Database(e) => {
                error!(error = %e, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    "internal server error".to_owned(),
                )
            }
            ServerError::Internal(m) => {
                error!(message = %m, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    "internal server error".to_owned(),
                )
            }
        };
        (
            status,
            Json(json!({
                "status": status.as_u16(),
                "title":  title,
                "detail": detail,
            })),
        )
            .into_response()
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(e: anyhow::Error) -> Self {
        // Log the full error chain before discarding it so that diagnostic
        // detail is preserved in the server logs even though clients only
        // see a generic message.
        error!(error = ?e, "converting anyhow error to ServerError::Internal");
        ServerError::Internal(e.to_string())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn chat_not_found_envelope_names_the_chat() {
        let response = ServerError::ChatNotFound("room42".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["status"], 404);
        assert_eq!(body["title"], "Chat not found");
        assert_eq!(body["detail"], "Chat room42 not found in database");
    }

    #[tokio::test]
    async fn bad_request_envelope_carries_detail() {
        let response = ServerError::BadRequest("missing required field: text".into())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["status"], 400);
        assert_eq!(body["title"], "Validation error");
        assert_eq!(body["detail"], "missing required field: text");
    }

    #[tokio::test]
    async fn internal_errors_do_not_leak_detail() {
        let err: ServerError = anyhow::anyhow!("pool exhausted at /var/db").into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["status"], 500);
        assert_eq!(body["detail"], "internal server error");
    }
}
