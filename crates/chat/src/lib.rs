//! Chat session bridge and grounded reply pipeline for trampcoach.
//!
//! This crate sits between the HTTP surface and the provider layer. It owns
//! the coaching persona (the system instruction), the one-shot session that
//! carries a single request to a provider, and the grounding pipeline that
//! decides whether the model is invoked at all.

pub mod instruction;
pub mod pipeline;
pub mod session;
pub mod test_helpers;

pub use instruction::SYSTEM_INSTRUCTION;
pub use pipeline::{grounded_reply, ChatReply};
pub use session::ChatSession;
