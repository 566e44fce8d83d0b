//! The skill record — one row of the coaching dataset.

use serde::{Deserialize, Serialize};

/// A single trampoline skill as loaded from the dataset.
///
/// Invariants held by the loader: `name` is never empty, `difficulty` is a
/// finite non-negative number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    /// Common name, possibly with `/`-separated alternates
    /// (e.g., "Rudolph / Rudy")
    pub name: String,

    /// FIG-style notation for the skill (e.g., "41o")
    pub notation: String,

    /// Tariff / difficulty rating
    pub difficulty: f64,

    /// Free-text coaching description
    pub description: String,
}

impl Skill {
    /// Difficulty rendered without a trailing `.0` (`"6"` rather than `"6.0"`),
    /// matching how tariffs are written in practice.
    pub fn difficulty_display(&self) -> String {
        if self.difficulty.fract() == 0.0 {
            format!("{}", self.difficulty as i64)
        } else {
            format!("{}", self.difficulty)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(difficulty: f64) -> Skill {
        Skill {
            name: "Barani".into(),
            notation: "41<".into(),
            difficulty,
            description: "Front somersault with a half twist".into(),
        }
    }

    #[test]
    fn difficulty_display_drops_trailing_zero() {
        assert_eq!(skill(6.0).difficulty_display(), "6");
        assert_eq!(skill(0.0).difficulty_display(), "0");
    }

    #[test]
    fn difficulty_display_keeps_fraction() {
        assert_eq!(skill(0.6).difficulty_display(), "0.6");
        assert_eq!(skill(1.2).difficulty_display(), "1.2");
    }

    #[test]
    fn skill_serialization_roundtrip() {
        let s = skill(0.6);
        let json = serde_json::to_string(&s).unwrap();
        let back: Skill = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
