//! Conversation domain types.
//!
//! These are the value objects that flow through the system:
//! the browser sends a message plus prior turns → the chat pipeline grounds
//! it → the provider generates a streamed response.

use serde::{Deserialize, Serialize};

/// The role of a turn in a conversation.
///
/// Matches the Gemini content roles on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// The model's reply
    Model,
}

/// A single turn of conversation: who spoke and the literal text.
///
/// History carries only literal text; composed grounding prompts never
/// appear here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    /// Create a user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    /// Create a model turn.
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// A text part within a wire-format history entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// One history entry as the browser sends it (Gemini content format).
///
/// A turn may arrive split across several parts; `flatten` joins them back
/// into a single `Turn`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryContent {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl HistoryContent {
    /// Collapse the parts into a single turn by concatenating their text.
    pub fn flatten(&self) -> Turn {
        let text: String = self.parts.iter().map(|p| p.text.as_str()).collect();
        Turn {
            role: self.role,
            text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Role::Model).unwrap(), "\"model\"");
    }

    #[test]
    fn turn_constructors() {
        let t = Turn::user("How hard is a Barani?");
        assert_eq!(t.role, Role::User);
        assert_eq!(t.text, "How hard is a Barani?");

        let t = Turn::model("A Barani is rated 0.6.");
        assert_eq!(t.role, Role::Model);
    }

    #[test]
    fn history_content_flattens_multiple_parts() {
        let content = HistoryContent {
            role: Role::Model,
            parts: vec![
                Part {
                    text: "A Barani ".into(),
                },
                Part {
                    text: "is a front flip".into(),
                },
                Part {
                    text: " with a half twist.".into(),
                },
            ],
        };
        let turn = content.flatten();
        assert_eq!(turn.role, Role::Model);
        assert_eq!(turn.text, "A Barani is a front flip with a half twist.");
    }

    #[test]
    fn history_content_flattens_empty_parts() {
        let content = HistoryContent {
            role: Role::User,
            parts: vec![],
        };
        assert_eq!(content.flatten().text, "");
    }

    #[test]
    fn history_content_deserializes_wire_format() {
        let json = r#"{"role":"user","parts":[{"text":"hello"}]}"#;
        let content: HistoryContent = serde_json::from_str(json).unwrap();
        assert_eq!(content.role, Role::User);
        assert_eq!(content.flatten().text, "hello");
    }
}
