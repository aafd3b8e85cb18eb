//! The `quizforge init` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizforge_providers::config::parse_config;

use super::open_store;

pub async fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let path = config_path.unwrap_or_else(|| PathBuf::from("quizforge.toml"));

    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(&path, SAMPLE_CONFIG)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Created {}", path.display());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config = parse_config(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))?;

    let store = open_store(&config);
    if store.seed_sample_data().await? {
        println!("Seeded sample data into {}", store.dir().display());
    } else {
        println!("{} already has data, skipping.", store.dir().display());
    }

    println!("\nNext steps:");
    println!("  1. Add an API key: quizforge set-key --provider groq --key <KEY>");
    println!("     or export QUIZFORGE_GROQ_API_KEY / QUIZFORGE_GEMINI_API_KEY / QUIZFORGE_OPENAI_API_KEY");
    println!("  2. Run: quizforge generate --chapter ch2 --count 5 --save");
    println!("  3. Run: quizforge take --test test2 --student student_1");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizforge configuration

# Provider used when no key is auto-detected: groq, gemini or openai.
default_provider = "groq"
question_count = 5
time_limit_minutes = 15
request_timeout_secs = 120
data_dir = "./quizforge-data"

# Keys may also come from QUIZFORGE_<PROVIDER>_API_KEY or `quizforge set-key`.
# String values expand ${VAR} references.
#
# [providers.groq]
# api_key = "${GROQ_API_KEY}"
#
# [providers.gemini]
# api_key = "${GEMINI_API_KEY}"
#
# [providers.openai]
# api_key = "${OPENAI_API_KEY}"
# base_url = "https://api.openai.com/v1/chat/completions"
"#;
