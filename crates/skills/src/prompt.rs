//! Grounding gate and prompt composition.
//!
//! The gate rejects questions that matched nothing (and were not broad):
//! without authoritative rows to ground on, the model is never invoked.
//! The composer builds the single message actually sent to the model; it
//! never enters the stored transcript.

use crate::matcher::MatchOutcome;
use trampcoach_core::Skill;

/// Fixed refusal returned when the gate rejects a question.
pub const REFUSAL_TEXT: &str = "I don't have that skill in my dataset, so I can't answer \
reliably. Ask me about a skill I have on file, or try a comparison question like \
\"which skill is the hardest?\".";

/// What the grounding layer decided to do with a question.
#[derive(Debug, PartialEq)]
pub enum Grounded {
    /// Gate rejection: fixed refusal, model not invoked.
    Refusal(&'static str),
    /// The composed message to send as the current turn.
    Message(String),
}

/// Apply the safety gate, then compose.
///
/// Broad-analysis outcomes always proceed: they carry the whole dataset by
/// construction, so the empty-match rejection can only fire on the narrow
/// path.
pub fn gate_and_compose(outcome: &MatchOutcome<'_>, question: &str) -> Grounded {
    if outcome.skills.is_empty() && !outcome.broad {
        return Grounded::Refusal(REFUSAL_TEXT);
    }
    Grounded::Message(compose(&outcome.skills, question))
}

/// Build the grounded message: an authoritative skill block followed by the
/// literal question.
pub fn compose(matched: &[&Skill], question: &str) -> String {
    let mut out = String::new();
    out.push_str("SKILL INFORMATION (authoritative):\n```\n");
    if matched.is_empty() {
        out.push_str("No relevant skill information found.\n");
    } else {
        for skill in matched {
            out.push_str(&format!(
                "{} | notation: {} | difficulty: {} | {}\n",
                skill.name,
                skill.notation,
                skill.difficulty_display(),
                skill.description
            ));
        }
    }
    out.push_str("```\n\nUSER QUESTION:\n");
    out.push_str(question);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(name: &str, difficulty: f64) -> Skill {
        Skill {
            name: name.into(),
            notation: "41<".into(),
            difficulty,
            description: "Front somersault with a half twist".into(),
        }
    }

    #[test]
    fn composed_message_has_both_sections() {
        let barani = skill("Barani", 0.6);
        let matched = vec![&barani];
        let msg = compose(&matched, "What is a Barani?");
        assert!(msg.contains("SKILL INFORMATION (authoritative)"));
        assert!(msg.contains("USER QUESTION:\nWhat is a Barani?"));
    }

    #[test]
    fn composed_message_lists_skills_in_matcher_order() {
        let a = skill("Triffis", 1.6);
        let b = skill("Barani", 0.6);
        let msg = compose(&[&a, &b], "compare them");
        let triffis_pos = msg.find("Triffis").unwrap();
        let barani_pos = msg.find("Barani").unwrap();
        assert!(triffis_pos < barani_pos);
    }

    #[test]
    fn composed_skill_line_carries_all_fields() {
        let barani = skill("Barani", 0.6);
        let msg = compose(&[&barani], "q");
        assert!(msg.contains("Barani | notation: 41< | difficulty: 0.6 | Front somersault"));
    }

    #[test]
    fn whole_difficulty_renders_without_decimal() {
        let s = skill("Miller", 6.0);
        let msg = compose(&[&s], "q");
        assert!(msg.contains("difficulty: 6 |"));
    }

    #[test]
    fn empty_match_substitutes_placeholder_sentence() {
        let msg = compose(&[], "anything");
        assert!(msg.contains("No relevant skill information found."));
    }

    #[test]
    fn question_text_is_preserved_verbatim() {
        let barani = skill("Barani", 0.6);
        let question = "Is a Barani (41<) harder than it looks?!";
        let msg = compose(&[&barani], question);
        assert!(msg.ends_with(question));
    }

    #[test]
    fn gate_refuses_empty_narrow_match() {
        let outcome = MatchOutcome {
            skills: vec![],
            broad: false,
        };
        assert_eq!(
            gate_and_compose(&outcome, "unknown skill"),
            Grounded::Refusal(REFUSAL_TEXT)
        );
    }

    #[test]
    fn gate_lets_broad_empty_through() {
        // Broad mode with an empty store still composes (placeholder block).
        let outcome = MatchOutcome {
            skills: vec![],
            broad: true,
        };
        match gate_and_compose(&outcome, "which skill is hardest") {
            Grounded::Message(msg) => {
                assert!(msg.contains("No relevant skill information found."))
            }
            Grounded::Refusal(_) => panic!("broad outcome must not be refused"),
        }
    }

    #[test]
    fn gate_composes_narrow_match() {
        let barani = skill("Barani", 0.6);
        let outcome = MatchOutcome {
            skills: vec![&barani],
            broad: false,
        };
        match gate_and_compose(&outcome, "what is a barani") {
            Grounded::Message(msg) => assert!(msg.contains("Barani")),
            Grounded::Refusal(_) => panic!("matched outcome must not be refused"),
        }
    }
}
