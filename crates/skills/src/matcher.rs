//! Relevance matching over the skill store.
//!
//! A skill matches when the normalized question contains one of the skill's
//! aliases as a substring. Comparative and superlative questions ("which
//! skill is hardest") bypass alias matching and get the whole dataset.
//! The trigger list is an enumerable heuristic, not a parser; it has known
//! precision limits.

use crate::store::SkillStore;
use trampcoach_core::Skill;

/// Trigger phrases for broad-analysis questions, checked case-insensitively
/// against the raw question.
const BROAD_TRIGGERS: &[&str] = &[
    "highest",
    "lowest",
    "most difficult",
    "least difficult",
    "hardest",
    "easiest",
    "compare",
    "difference",
    "which skill",
];

/// The matcher's answer: which skills are relevant, and whether the question
/// triggered broad-analysis mode.
#[derive(Debug)]
pub struct MatchOutcome<'a> {
    /// Relevant skills, in store order, no duplicates.
    pub skills: Vec<&'a Skill>,
    /// True when a broad-analysis trigger fired and the full list was returned.
    pub broad: bool,
}

/// Normalize text for matching: lowercase, strip parenthetical substrings,
/// keep only lowercase letters, digits, and whitespace, then trim.
pub fn normalize(input: &str) -> String {
    let stripped = strip_parentheticals(input);
    let mut out = String::with_capacity(stripped.len());
    for c in stripped.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
            out.push(c);
        }
    }
    out.trim().to_string()
}

/// Remove `(...)` spans, including nested ones.
fn strip_parentheticals(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut depth = 0usize;
    for c in input.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

/// Contents of every `(...)` span in the raw text, outermost level only.
fn parenthetical_contents(input: &str) -> Vec<String> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    for c in input.chars() {
        match c {
            '(' => {
                if depth > 0 {
                    current.push(c);
                }
                depth += 1;
            }
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    spans.push(std::mem::take(&mut current));
                } else {
                    current.push(c);
                }
            }
            _ if depth > 0 => current.push(c),
            _ => {}
        }
    }
    spans
}

/// Aliases a question may use for a skill: each `/`-separated name part,
/// plus any parenthetical alias from the raw name, all normalized.
/// Empty aliases are discarded so they can never match every question.
fn aliases(skill: &Skill) -> Vec<String> {
    let mut out = Vec::new();
    for part in skill.name.split('/') {
        let alias = normalize(part);
        if !alias.is_empty() && !out.contains(&alias) {
            out.push(alias);
        }
    }
    for span in parenthetical_contents(&skill.name) {
        let alias = normalize(&span);
        if !alias.is_empty() && !out.contains(&alias) {
            out.push(alias);
        }
    }
    out
}

/// Find the skills relevant to a question. Never fails; worst case the
/// outcome carries an empty list for the grounding gate to handle.
pub fn find_relevant<'a>(store: &'a SkillStore, question: &str) -> MatchOutcome<'a> {
    let raw = question.to_lowercase();
    if BROAD_TRIGGERS.iter().any(|t| raw.contains(t)) {
        tracing::debug!(question, "broad-analysis trigger fired, returning full dataset");
        return MatchOutcome {
            skills: store.skills().iter().collect(),
            broad: true,
        };
    }

    let normalized = normalize(question);
    let skills = store
        .skills()
        .iter()
        .filter(|skill| aliases(skill).iter().any(|a| normalized.contains(a.as_str())))
        .collect();

    MatchOutcome {
        skills,
        broad: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(name: &str) -> Skill {
        Skill {
            name: name.into(),
            notation: "41<".into(),
            difficulty: 0.6,
            description: "test skill".into(),
        }
    }

    fn store(names: &[&str]) -> SkillStore {
        SkillStore::from_skills(names.iter().map(|n| skill(n)).collect())
    }

    #[test]
    fn normalize_strips_parenthetical_and_punctuation() {
        assert_eq!(normalize("Triff (Triff Pike)"), "triff");
        assert_eq!(normalize("Rudolph / Rudy"), "rudolph  rudy");
        assert_eq!(normalize("  Half-Out!  "), "halfout");
    }

    #[test]
    fn normalize_keeps_digits() {
        assert_eq!(normalize("Barani 41<"), "barani 41");
    }

    #[test]
    fn parenthetical_alias_matches() {
        let store = store(&["Triffis / Rudolph (Rudy)"]);
        let outcome = find_relevant(&store, "how many points for a rudy");
        assert_eq!(outcome.skills.len(), 1);
        assert!(!outcome.broad);
    }

    #[test]
    fn slash_alternate_matches() {
        let store = store(&["Rudolph / Rudy"]);
        let outcome = find_relevant(&store, "teach me the rudolph please");
        assert_eq!(outcome.skills.len(), 1);
    }

    #[test]
    fn question_punctuation_does_not_block_match() {
        let store = store(&["Barani"]);
        let outcome = find_relevant(&store, "What is a Barani?");
        assert_eq!(outcome.skills.len(), 1);
    }

    #[test]
    fn no_match_returns_empty_not_broad() {
        let store = store(&["Barani", "Triffis"]);
        let outcome = find_relevant(&store, "tell me about a skill not in the dataset");
        assert!(outcome.skills.is_empty());
        assert!(!outcome.broad);
    }

    #[test]
    fn broad_trigger_returns_full_list() {
        let store = store(&["Barani", "Triffis", "Miller"]);
        let outcome = find_relevant(&store, "what is the highest difficulty skill");
        assert_eq!(outcome.skills.len(), 3);
        assert!(outcome.broad);
    }

    #[test]
    fn broad_trigger_is_case_insensitive() {
        let store = store(&["Barani"]);
        let outcome = find_relevant(&store, "COMPARE the barani and the triffis");
        assert!(outcome.broad);
        assert_eq!(outcome.skills.len(), 1);
    }

    #[test]
    fn every_listed_trigger_fires() {
        let store = store(&["Barani"]);
        for trigger in super::BROAD_TRIGGERS {
            let outcome = find_relevant(&store, &format!("something {trigger} something"));
            assert!(outcome.broad, "trigger {trigger:?} did not fire");
        }
    }

    #[test]
    fn empty_alias_never_matches() {
        // "/" splits into two segments that both normalize to "".
        let store = store(&["/ (!!)"]);
        let outcome = find_relevant(&store, "a completely unrelated question");
        assert!(outcome.skills.is_empty());
    }

    #[test]
    fn matches_preserve_store_order() {
        let store = store(&["Triffis", "Barani", "Miller"]);
        let outcome = find_relevant(&store, "is a barani easier than a triffis miller combo");
        // "easier" is not a trigger; all three match by alias.
        let names: Vec<_> = outcome.skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Triffis", "Barani", "Miller"]);
    }

    #[test]
    fn no_duplicate_matches() {
        let store = store(&["Rudy / Rudy (Rudy)"]);
        let outcome = find_relevant(&store, "show me the rudy");
        assert_eq!(outcome.skills.len(), 1);
    }
}
