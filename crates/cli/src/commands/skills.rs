//! `trampcoach skills` — Inspect the loaded dataset or preview a match.

use trampcoach_config::AppConfig;
use trampcoach_skills::{find_relevant, SkillStore};

pub async fn run(question: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let store = SkillStore::load(&config.dataset.path)?;

    match question {
        Some(q) => {
            let outcome = find_relevant(&store, q);
            if outcome.broad {
                println!(
                    "Broad analysis question — all {} skills would be sent.",
                    store.len()
                );
            } else if outcome.skills.is_empty() {
                println!("No skills matched — this question would be refused.");
            } else {
                println!("{} skill(s) matched:", outcome.skills.len());
                for skill in &outcome.skills {
                    println!(
                        "  {} | notation: {} | difficulty: {} | {}",
                        skill.name,
                        skill.notation,
                        skill.difficulty_display(),
                        skill.description
                    );
                }
            }
        }
        None => {
            println!("Skill dataset: {} ({} rows)", config.dataset.path, store.len());
            println!();
            for skill in store.skills() {
                println!(
                    "  {:<28} {:<10} {:>4}  {}",
                    skill.name,
                    skill.notation,
                    skill.difficulty_display(),
                    skill.description
                );
            }
        }
    }

    Ok(())
}
