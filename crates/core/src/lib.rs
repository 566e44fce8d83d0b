//! # Trampcoach Core
//!
//! Domain types, traits, and error definitions for the trampoline coach chat
//! assistant. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The LLM backend is defined as a trait here (`Provider`). Implementations
//! live in their respective crates. This enables:
//! - Swapping backends via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod message;
pub mod provider;
pub mod skill;

// Re-export key types at crate root for ergonomics
pub use error::{Error, ProviderError, Result, SkillError};
pub use message::{HistoryContent, Part, Role, Turn};
pub use provider::{Provider, ProviderRequest, StreamChunk, Usage};
pub use skill::Skill;
