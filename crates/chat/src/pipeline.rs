//! The grounded reply pipeline.
//!
//! Every question runs match -> gate -> compose -> send. The gate can refuse
//! before the provider is ever touched; a refusal costs nothing and leaks
//! nothing.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};
use trampcoach_core::error::ProviderError;
use trampcoach_core::message::Turn;
use trampcoach_core::provider::StreamChunk;
use trampcoach_core::Provider;
use trampcoach_skills::{find_relevant, gate_and_compose, Grounded, SkillStore};

use crate::session::ChatSession;

/// Outcome of the pipeline for one question.
#[derive(Debug)]
pub enum ChatReply {
    /// The gate refused; serve this fixed text without invoking the model.
    Refusal(&'static str),
    /// The provider accepted the request; chunks arrive on this receiver.
    Stream(mpsc::Receiver<Result<StreamChunk, ProviderError>>),
}

/// Run the full pipeline for one user question.
///
/// The stored transcript (`history`) passes through literally; only the
/// current message is replaced by the composed grounded form.
pub async fn grounded_reply(
    provider: Arc<dyn Provider>,
    store: &SkillStore,
    model: &str,
    temperature: f32,
    history: Vec<Turn>,
    message: &str,
) -> Result<ChatReply, ProviderError> {
    let outcome = find_relevant(store, message);
    debug!(
        matched = outcome.skills.len(),
        broad = outcome.broad,
        "Skill match complete"
    );

    match gate_and_compose(&outcome, message) {
        Grounded::Refusal(text) => {
            info!("Question matched no skills; refusing without model call");
            Ok(ChatReply::Refusal(text))
        }
        Grounded::Message(composed) => {
            let session = ChatSession::open(provider, model, temperature, history);
            let rx = session.send(composed).await?;
            Ok(ChatReply::Stream(rx))
        }
    }
}
