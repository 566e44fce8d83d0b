//! # Trampcoach Skills
//!
//! The grounding layer: loads the skill dataset, decides which skills are
//! relevant to a free-text question, and composes the grounded message that
//! goes to the model.
//!
//! The store is loaded once at process start and shared read-only behind an
//! `Arc`; matching and composing are pure functions over it.

pub mod matcher;
pub mod prompt;
pub mod store;

pub use matcher::{MatchOutcome, find_relevant, normalize};
pub use prompt::{Grounded, REFUSAL_TEXT, compose, gate_and_compose};
pub use store::SkillStore;
