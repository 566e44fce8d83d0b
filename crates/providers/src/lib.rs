//! LLM Provider implementations for trampcoach.
//!
//! All providers implement the `trampcoach_core::Provider` trait.
//! Production traffic goes to Gemini; tests use scripted mocks from the
//! chat crate.

pub mod gemini;

pub use gemini::GeminiProvider;
