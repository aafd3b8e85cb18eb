//! The `quizforge providers` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizforge_core::registry::PROVIDERS;
use quizforge_core::traits::KeyStore;
use quizforge_providers::select_provider;

use super::{load_config, open_keys};

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path)?;
    let keys = open_keys(&config)?;
    let selection = select_provider(&config, &keys, None);

    let mut table = Table::new();
    table.set_header(vec!["", "Id", "Provider", "Model", "Tier", "Key"]);

    for descriptor in &PROVIDERS {
        let key_source = if config.secret(descriptor.id).is_some() {
            "env/config"
        } else if keys.get(descriptor.id).is_some() {
            "stored"
        } else {
            "-"
        };
        let marker = if descriptor.id == selection.provider { "*" } else { "" };
        table.add_row(vec![
            Cell::new(marker),
            Cell::new(descriptor.id),
            Cell::new(descriptor.display_name),
            Cell::new(descriptor.model_id),
            Cell::new(descriptor.badge),
            Cell::new(key_source),
        ]);
    }

    println!("{table}");

    if selection.auto_detected {
        println!("Auto-detected: {}", selection.provider);
    } else if selection.api_key.is_some() {
        println!("Using stored key for: {}", selection.provider);
    } else {
        println!(
            "No API key found; `generate` will use sample questions. Get a key at {}",
            selection.provider.descriptor().docs_url
        );
    }

    Ok(())
}
