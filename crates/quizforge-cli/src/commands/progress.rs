//! The `quizforge progress` command.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizforge_core::statistics::summarize;
use quizforge_core::traits::QuizStore;

use super::{load_config, open_store};

pub async fn execute(config_path: Option<PathBuf>, student: String, format: String) -> Result<()> {
    let config = load_config(config_path)?;
    let store = open_store(&config);

    let submissions = store.list_attempts_by_student(&student).await?;
    let chapters = store.list_chapters().await?;
    let chapter_subjects: HashMap<&str, &str> = chapters
        .iter()
        .map(|c| (c.id.as_str(), c.subject.as_str()))
        .collect();

    // Quizzes saved without a subject inherit their chapter's.
    let mut tests = store.list_tests().await?;
    for quiz in tests.iter_mut().filter(|t| t.subject.is_none()) {
        quiz.subject = chapter_subjects
            .get(quiz.chapter_id.as_str())
            .map(|s| s.to_string());
    }

    let summary = summarize(&submissions, &tests);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if summary.is_empty() {
        println!("No attempts yet for {student}.");
        return Ok(());
    }

    println!("Progress for {student}");
    println!("  Attempts: {}", summary.attempts);
    println!("  Average: {}%", summary.average);
    println!("  Best: {}%", summary.best);
    println!("  Pass rate: {}%", summary.pass_rate);

    let mut subjects = Table::new();
    subjects.set_header(vec!["Subject", "Attempts", "Average"]);
    for subject in &summary.subjects {
        subjects.add_row(vec![
            Cell::new(&subject.subject),
            Cell::new(subject.attempts),
            Cell::new(format!("{}%", subject.average)),
        ]);
    }
    println!("\n{subjects}");

    if !summary.weak_subjects.is_empty() {
        let weak: Vec<_> = summary
            .weak_subjects
            .iter()
            .map(|s| format!("{} ({}%)", s.subject, s.average))
            .collect();
        println!("\nNeeds work: {}", weak.join(", "));
    }

    let titles: HashMap<&str, &str> = tests
        .iter()
        .map(|t| (t.id.as_str(), t.title.as_str()))
        .collect();
    let mut latest = Table::new();
    latest.set_header(vec!["Test", "Score", "Completed"]);
    for (test_id, submission) in &summary.latest {
        latest.add_row(vec![
            Cell::new(titles.get(test_id.as_str()).copied().unwrap_or(test_id.as_str())),
            Cell::new(format!("{} ({}%)", submission.score, submission.percentage)),
            Cell::new(submission.completed_at.format("%Y-%m-%d %H:%M")),
        ]);
    }
    println!("\n{latest}");

    Ok(())
}
