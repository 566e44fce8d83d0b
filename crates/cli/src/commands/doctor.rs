//! `trampcoach doctor` — Diagnose credential and dataset health.

use trampcoach_config::AppConfig;
use trampcoach_core::Provider;
use trampcoach_providers::GeminiProvider;
use trampcoach_skills::SkillStore;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("Trampcoach Doctor — System Diagnostics");
    println!("======================================\n");

    let mut issues = 0;

    // Check config
    let config_path = AppConfig::config_dir().join("config.toml");
    let config = match AppConfig::load() {
        Ok(config) => {
            if config_path.exists() {
                println!("  ✅ Config file valid");
            } else {
                println!("  ✅ No config file — using defaults + environment");
            }
            config
        }
        Err(e) => {
            println!("  ❌ Config invalid: {e}");
            issues += 1;
            AppConfig::default()
        }
    };

    // Check API key
    if config.has_api_key() {
        println!("  ✅ API key configured");
    } else {
        println!("  ❌ No API key — set GEMINI_API_KEY or add api_key to config.toml");
        issues += 1;
    }

    // Check dataset
    match SkillStore::load(&config.dataset.path) {
        Ok(store) if store.is_empty() => {
            println!(
                "  ⚠️  Dataset at {} loaded but contains no skills",
                config.dataset.path
            );
            issues += 1;
        }
        Ok(store) => {
            println!("  ✅ Dataset loaded ({} skills)", store.len());
        }
        Err(e) => {
            println!("  ❌ Dataset unreadable: {e}");
            issues += 1;
        }
    }

    // Check provider reachability
    if config.has_api_key() {
        let api_key = config.require_api_key()?;
        let provider = GeminiProvider::new(api_key);
        match provider.health_check().await {
            Ok(true) => println!("  ✅ Provider reachable, credential accepted"),
            Ok(false) => {
                println!("  ❌ Provider rejected the credential");
                issues += 1;
            }
            Err(e) => {
                println!("  ⚠️  Provider unreachable: {e}");
                issues += 1;
            }
        }
    }

    // Summary
    println!();
    if issues == 0 {
        println!("  All checks passed!");
    } else {
        println!("  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
