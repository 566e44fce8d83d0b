//! Skill dataset loading.
//!
//! Reads the whole CSV once at startup. The parser is deliberately small:
//! line-oriented records, a quote-aware field splitter (quoted fields may
//! contain commas, doubled quotes unescape), header row skipped.

use std::path::Path;
use trampcoach_core::{Skill, SkillError};

/// The in-memory skill dataset. Immutable after load; share via `Arc`.
#[derive(Debug, Clone)]
pub struct SkillStore {
    skills: Vec<Skill>,
}

impl SkillStore {
    /// Load the dataset from a CSV file.
    ///
    /// A missing or unreadable file is a startup-class fatal error. Rows with
    /// an empty name are dropped; an unparseable difficulty coerces to 0.0.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SkillError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| SkillError::DatasetUnreadable {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let mut skills = Vec::new();
        for line in content.lines().skip(1) {
            let fields = split_csv_line(line);
            let name = fields.first().map(|f| f.trim()).unwrap_or("");
            if name.is_empty() {
                tracing::debug!(line, "dropping dataset row with empty name");
                continue;
            }

            let notation = fields.get(1).map(|f| f.trim()).unwrap_or("").to_string();
            let difficulty = fields
                .get(2)
                .and_then(|f| f.trim().parse::<f64>().ok())
                .filter(|d| d.is_finite() && *d >= 0.0)
                .unwrap_or(0.0);
            let description = fields.get(3).map(|f| f.trim()).unwrap_or("").to_string();

            skills.push(Skill {
                name: name.to_string(),
                notation,
                difficulty,
                description,
            });
        }

        tracing::info!(path = %path.display(), count = skills.len(), "skill dataset loaded");
        Ok(Self { skills })
    }

    /// All loaded skills, in file order.
    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Build a store from in-memory skills, bypassing the CSV loader.
    pub fn from_skills(skills: Vec<Skill>) -> Self {
        Self { skills }
    }
}

/// Split one CSV record into fields.
///
/// Inside quotes a comma is literal and `""` unescapes to `"`. Anything short
/// of that is passed through unchanged.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}
