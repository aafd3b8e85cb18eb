//! The `quizforge set-key` command.

use std::path::PathBuf;

use anyhow::Result;

use quizforge_core::registry::ProviderId;
use quizforge_core::traits::KeyStore;

use super::{load_config, open_keys};

pub fn execute(config_path: Option<PathBuf>, provider: String, key: String) -> Result<()> {
    let provider: ProviderId = provider.parse()?;
    if key.trim().is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    let config = load_config(config_path)?;
    let keys = open_keys(&config)?;
    keys.set(provider, &key)?;
    keys.set_last_provider(provider)?;

    println!(
        "Saved API key for {} to {}",
        provider.descriptor().display_name,
        keys.path().display()
    );
    Ok(())
}
