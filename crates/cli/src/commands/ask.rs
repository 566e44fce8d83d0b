//! `trampcoach ask` — One-shot grounded question, streamed to stdout.

use std::io::Write;
use std::sync::Arc;

use trampcoach_chat::{grounded_reply, ChatReply};
use trampcoach_config::AppConfig;
use trampcoach_core::Provider;
use trampcoach_providers::GeminiProvider;
use trampcoach_skills::SkillStore;

pub async fn run(question: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let api_key = config.require_api_key()?;
    let provider: Arc<dyn Provider> = Arc::new(GeminiProvider::new(api_key));
    let store = SkillStore::load(&config.dataset.path)?;

    let reply = grounded_reply(
        provider,
        &store,
        &config.model,
        config.temperature,
        vec![],
        question,
    )
    .await?;

    match reply {
        ChatReply::Refusal(text) => println!("{text}"),
        ChatReply::Stream(mut rx) => {
            let mut stdout = std::io::stdout();
            while let Some(item) = rx.recv().await {
                let chunk = item?;
                if let Some(text) = chunk.text {
                    print!("{text}");
                    stdout.flush()?;
                }
            }
            println!();
        }
    }

    Ok(())
}
