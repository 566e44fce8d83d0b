//! Shared scripted providers for chat and gateway tests.

use std::sync::Mutex;

use tokio::sync::mpsc;
use trampcoach_core::error::ProviderError;
use trampcoach_core::provider::{ProviderRequest, StreamChunk};
use trampcoach_core::Provider;

/// One scripted `stream()` call.
pub enum ScriptedCall {
    /// Open succeeds; these items arrive on the receiver in order.
    Stream(Vec<Result<StreamChunk, ProviderError>>),
    /// Open itself fails.
    OpenError(ProviderError),
}

/// A mock provider that plays back a sequence of scripted calls.
///
/// Each call to `stream` consumes the next entry in the script and records
/// the request it was given. Panics if more calls are made than entries
/// scripted.
pub struct SequentialMockProvider {
    script: Mutex<Vec<ScriptedCall>>,
    call_count: Mutex<usize>,
    last_request: Mutex<Option<ProviderRequest>>,
}

impl SequentialMockProvider {
    pub fn new(script: Vec<ScriptedCall>) -> Self {
        Self {
            script: Mutex::new(script),
            call_count: Mutex::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// One successful stream: the given text chunks, then a terminal chunk.
    pub fn single_stream(chunks: &[&str]) -> Self {
        let mut items: Vec<Result<StreamChunk, ProviderError>> =
            chunks.iter().map(|c| Ok(StreamChunk::text(*c))).collect();
        items.push(Ok(StreamChunk::done(None)));
        Self::new(vec![ScriptedCall::Stream(items)])
    }

    /// One stream that delivers the given chunks, then fails mid-stream.
    pub fn failing_mid_stream(chunks: &[&str], error: ProviderError) -> Self {
        let mut items: Vec<Result<StreamChunk, ProviderError>> =
            chunks.iter().map(|c| Ok(StreamChunk::text(*c))).collect();
        items.push(Err(error));
        Self::new(vec![ScriptedCall::Stream(items)])
    }

    /// One call that fails at open time.
    pub fn open_failure(error: ProviderError) -> Self {
        Self::new(vec![ScriptedCall::OpenError(error)])
    }

    /// How many times `stream` was called.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// The most recent request passed to `stream`, if any.
    pub fn last_request(&self) -> Option<ProviderRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Provider for SequentialMockProvider {
    fn name(&self) -> &str {
        "sequential_mock"
    }

    async fn stream(
        &self,
        request: ProviderRequest,
    ) -> Result<mpsc::Receiver<Result<StreamChunk, ProviderError>>, ProviderError> {
        *self.last_request.lock().unwrap() = Some(request);
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        let mut script = self.script.lock().unwrap();
        if script.is_empty() {
            panic!("SequentialMockProvider: no more scripted calls (call #{})", *count);
        }

        match script.remove(0) {
            ScriptedCall::OpenError(e) => Err(e),
            ScriptedCall::Stream(items) => {
                // Pre-fill a channel sized to hold the whole script so the
                // caller can drain at its own pace.
                let (tx, rx) = mpsc::channel(items.len().max(1));
                for item in items {
                    let _ = tx.try_send(item);
                }
                Ok(rx)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ProviderRequest {
        ProviderRequest {
            model: "mock-model".into(),
            system_instruction: "sys".into(),
            history: vec![],
            message: "q".into(),
            temperature: 0.7,
        }
    }

    #[tokio::test]
    async fn plays_back_chunks_in_order() {
        let provider = SequentialMockProvider::single_stream(&["a", "b"]);
        let mut rx = provider.stream(request()).await.unwrap();

        assert_eq!(rx.recv().await.unwrap().unwrap().text.as_deref(), Some("a"));
        assert_eq!(rx.recv().await.unwrap().unwrap().text.as_deref(), Some("b"));
        assert!(rx.recv().await.unwrap().unwrap().done);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn mid_stream_failure_arrives_as_err_item() {
        let provider = SequentialMockProvider::failing_mid_stream(
            &["partial"],
            ProviderError::StreamInterrupted("cut".into()),
        );
        let mut rx = provider.stream(request()).await.unwrap();

        assert!(rx.recv().await.unwrap().is_ok());
        assert!(matches!(
            rx.recv().await.unwrap(),
            Err(ProviderError::StreamInterrupted(_))
        ));
    }

    #[tokio::test]
    async fn records_calls_and_requests() {
        let provider = SequentialMockProvider::single_stream(&["ok"]);
        assert_eq!(provider.call_count(), 0);
        assert!(provider.last_request().is_none());

        let _rx = provider.stream(request()).await.unwrap();
        assert_eq!(provider.call_count(), 1);
        assert_eq!(provider.last_request().unwrap().message, "q");
    }

    #[tokio::test]
    #[should_panic(expected = "no more scripted calls")]
    async fn panics_when_script_is_exhausted() {
        let provider = SequentialMockProvider::single_stream(&["only one"]);
        let _ = provider.stream(request()).await;
        let _ = provider.stream(request()).await;
    }
}
