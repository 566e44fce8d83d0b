//! Provider trait — the abstraction over LLM backends.
//!
//! A Provider knows how to send a grounded conversation to an LLM and get the
//! response back as a stream of text chunks over a tokio mpsc channel.
//!
//! Implementations: Gemini (production), scripted mocks (tests).

use crate::error::ProviderError;
use crate::message::Turn;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Configuration for a provider request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRequest {
    /// The model to use (e.g., "gemini-2.5-flash")
    pub model: String,

    /// System instruction sent out-of-band from the conversation
    pub system_instruction: String,

    /// Prior conversation turns, literal text only
    pub history: Vec<Turn>,

    /// The (possibly grounding-composed) message for this request
    pub message: String,

    /// Temperature (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_temperature() -> f32 {
    0.7
}

/// Token usage information, reported by the backend on the final chunk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// A single chunk in a streaming response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamChunk {
    /// Partial text delta
    #[serde(default)]
    pub text: Option<String>,

    /// Whether this is the final chunk
    #[serde(default)]
    pub done: bool,

    /// Usage info (typically only in the final chunk)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl StreamChunk {
    /// A text-bearing chunk.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            done: false,
            usage: None,
        }
    }

    /// The terminal chunk.
    pub fn done(usage: Option<Usage>) -> Self {
        Self {
            text: None,
            done: true,
            usage,
        }
    }
}

/// The core Provider trait.
///
/// The chat pipeline calls `stream()` without knowing which backend is being
/// used. A request either fails entirely at open time or yields a receiver of
/// chunk results; mid-stream failures arrive as `Err` items on the receiver.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "gemini").
    fn name(&self) -> &str;

    /// Send a request and get a stream of response chunks.
    async fn stream(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<
        tokio::sync::mpsc::Receiver<std::result::Result<StreamChunk, ProviderError>>,
        ProviderError,
    >;

    /// Health check — can we reach the provider?
    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        Ok(true)
    }
}
