//! The `quizforge chapters` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizforge_core::traits::QuizStore;

use super::{load_config, open_store};

pub async fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path)?;
    let store = open_store(&config);

    let chapters = store.list_chapters().await?;
    if chapters.is_empty() {
        println!("No chapters found. Run `quizforge init` to add sample chapters.");
        return Ok(());
    }

    let tests = store.list_tests().await?;

    let mut table = Table::new();
    table.set_header(vec!["Id", "Title", "Subject", "Class", "Tests"]);
    for chapter in &chapters {
        let test_count = tests.iter().filter(|t| t.chapter_id == chapter.id).count();
        table.add_row(vec![
            Cell::new(&chapter.id),
            Cell::new(&chapter.title),
            Cell::new(&chapter.subject),
            Cell::new(&chapter.class_level),
            Cell::new(test_count),
        ]);
    }
    println!("{table}");
    Ok(())
}
