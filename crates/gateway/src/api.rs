//! The chat endpoint: request decoding and the streaming relay.
//!
//! Fragments are relayed one-to-one into the chunked response body in
//! arrival order, no batching. When the client disconnects mid-stream the
//! body stream is dropped, the receiver closes, and the provider task's
//! next send fails, which stops the upstream pull.

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use trampcoach_chat::{grounded_reply, ChatReply};
use trampcoach_core::message::{HistoryContent, Turn};

use crate::SharedState;

/// `POST /api/chat` request body.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<HistoryContent>,
}

/// JSON error body for pre-stream failures.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

const TEXT_PLAIN: (header::HeaderName, &str) =
    (header::CONTENT_TYPE, "text/plain; charset=utf-8");

/// `POST /api/chat` — run the grounding pipeline, relay the reply.
///
/// A refusal is a complete single-chunk body. A provider failure before any
/// chunk is sent maps to 500 JSON; a mid-stream failure terminates the body
/// (partial output stands, the client sees a transport error).
pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let request_id = Uuid::new_v4();
    info!(
        %request_id,
        message_len = payload.message.len(),
        history_turns = payload.history.len(),
        "Chat request received"
    );

    let history: Vec<Turn> = payload.history.iter().map(HistoryContent::flatten).collect();

    let reply = grounded_reply(
        state.provider.clone(),
        &state.store,
        &state.model,
        state.temperature,
        history,
        &payload.message,
    )
    .await
    .map_err(|e| {
        error!(%request_id, error = %e, "Provider request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;

    match reply {
        ChatReply::Refusal(text) => Ok(([TEXT_PLAIN], text).into_response()),
        ChatReply::Stream(rx) => {
            let stream = ReceiverStream::new(rx).filter_map(move |item| match item {
                Ok(chunk) => {
                    if chunk.done {
                        if let Some(usage) = &chunk.usage {
                            debug!(
                                %request_id,
                                prompt_tokens = usage.prompt_tokens,
                                completion_tokens = usage.completion_tokens,
                                "Stream complete"
                            );
                        }
                    }
                    chunk.text.map(|t| Ok(Bytes::from(t)))
                }
                Err(e) => {
                    warn!(%request_id, error = %e, "Stream aborted mid-response");
                    Some(Err(e))
                }
            });
            Ok(([TEXT_PLAIN], Body::from_stream(stream)).into_response())
        }
    }
}
