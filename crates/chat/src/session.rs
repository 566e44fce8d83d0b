//! One-shot chat session.
//!
//! A session is opened per request with the client's transcript and consumed
//! by `send`. Nothing is retained server-side between requests; the browser
//! owns the conversation state.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;
use trampcoach_core::error::ProviderError;
use trampcoach_core::message::Turn;
use trampcoach_core::provider::{ProviderRequest, StreamChunk};
use trampcoach_core::Provider;

use crate::instruction::SYSTEM_INSTRUCTION;

/// A single-use bridge from a transcript to a provider stream.
pub struct ChatSession {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
    history: Vec<Turn>,
}

impl ChatSession {
    /// Open a session over the given provider with the client's prior turns.
    pub fn open(
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        temperature: f32,
        history: Vec<Turn>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
            history,
        }
    }

    /// Send the current message and return the provider's chunk stream.
    ///
    /// Consumes the session: one request per session, matching the
    /// stateless request model of the HTTP surface.
    pub async fn send(
        self,
        message: impl Into<String>,
    ) -> Result<mpsc::Receiver<Result<StreamChunk, ProviderError>>, ProviderError> {
        let message = message.into();
        debug!(
            provider = self.provider.name(),
            model = %self.model,
            history_turns = self.history.len(),
            "Opening provider stream"
        );

        let request = ProviderRequest {
            model: self.model,
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            history: self.history,
            message,
            temperature: self.temperature,
        };
        self.provider.stream(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::SequentialMockProvider;

    #[tokio::test]
    async fn send_builds_request_with_persona_and_history() {
        let provider = Arc::new(SequentialMockProvider::single_stream(&["ok"]));
        let history = vec![Turn::user("hi"), Turn::model("hello")];
        let session = ChatSession::open(provider.clone(), "gemini-2.5-flash", 0.7, history);

        let _rx = session.send("What is a Barani?").await.unwrap();

        let request = provider.last_request().unwrap();
        assert_eq!(request.model, "gemini-2.5-flash");
        assert_eq!(request.system_instruction, SYSTEM_INSTRUCTION);
        assert_eq!(request.history.len(), 2);
        assert_eq!(request.message, "What is a Barani?");
        assert!((request.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn send_relays_all_scripted_chunks() {
        let provider = Arc::new(SequentialMockProvider::single_stream(&["A Barani ", "is 0.6."]));
        let session = ChatSession::open(provider, "gemini-2.5-flash", 0.7, vec![]);

        let mut rx = session.send("q").await.unwrap();
        let mut text = String::new();
        let mut saw_done = false;
        while let Some(item) = rx.recv().await {
            let chunk = item.unwrap();
            if let Some(t) = &chunk.text {
                text.push_str(t);
            }
            if chunk.done {
                saw_done = true;
            }
        }
        assert_eq!(text, "A Barani is 0.6.");
        assert!(saw_done);
    }

    #[tokio::test]
    async fn open_error_propagates() {
        let provider = Arc::new(SequentialMockProvider::open_failure(
            ProviderError::AuthenticationFailed("bad key".into()),
        ));
        let session = ChatSession::open(provider, "gemini-2.5-flash", 0.7, vec![]);

        let err = session.send("q").await.unwrap_err();
        assert!(matches!(err, ProviderError::AuthenticationFailed(_)));
    }
}
