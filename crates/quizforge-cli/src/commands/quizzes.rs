//! The `quizforge quizzes` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizforge_core::traits::QuizStore;

use super::{load_config, open_store};

pub async fn execute(config_path: Option<PathBuf>, class_level: Option<String>) -> Result<()> {
    let config = load_config(config_path)?;
    let store = open_store(&config);

    let quizzes: Vec<_> = store
        .list_tests()
        .await?
        .into_iter()
        .filter(|q| class_level.as_deref().map_or(true, |c| q.visible_to_class(c)))
        .collect();
    if quizzes.is_empty() {
        println!("No quizzes found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Id", "Title", "Chapter", "Questions", "Minutes", "Class"]);
    for quiz in &quizzes {
        table.add_row(vec![
            Cell::new(&quiz.id),
            Cell::new(&quiz.title),
            Cell::new(&quiz.chapter_id),
            Cell::new(quiz.questions.len()),
            Cell::new(quiz.time_limit_minutes),
            Cell::new(quiz.class_level.as_deref().unwrap_or("any")),
        ]);
    }
    println!("{table}");
    Ok(())
}
