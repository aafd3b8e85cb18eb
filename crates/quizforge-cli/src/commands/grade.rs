//! The `quizforge grade` command.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use quizforge_core::grading::{grade, review, GradeResult, QuestionReview};
use quizforge_core::model::NewSubmission;
use quizforge_core::traits::QuizStore;

use super::{find_test, load_config, open_store};

pub async fn execute(
    config_path: Option<PathBuf>,
    test_id: String,
    answers_path: PathBuf,
    student: Option<String>,
    format: String,
) -> Result<()> {
    let config = load_config(config_path)?;
    let store = open_store(&config);
    let quiz = find_test(&store, &test_id).await?;

    let content = std::fs::read_to_string(&answers_path)
        .with_context(|| format!("failed to read answers: {}", answers_path.display()))?;
    let answers: BTreeMap<String, String> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse answers: {}", answers_path.display()))?;

    let result = grade(&quiz, &answers)?;
    let rows = review(&quiz, &answers);

    if format == "json" {
        let report = serde_json::json!({
            "testId": quiz.id,
            "score": result.score,
            "total": result.total,
            "percentage": result.percentage,
            "band": result.band(),
            "review": rows,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_review(&rows);
        print_score(&result);
    }

    if let Some(student_id) = student {
        let submission = store
            .submit_attempt(NewSubmission {
                student_id,
                test_id: quiz.id.clone(),
                answers,
                score: result.score,
                percentage: result.percentage,
            })
            .await?;
        eprintln!("Recorded submission {}", submission.id);
    }

    Ok(())
}

pub(crate) fn print_review(rows: &[QuestionReview]) {
    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Your answer", "Correct answer", ""]);
    for (i, row) in rows.iter().enumerate() {
        let submitted = if row.submitted.trim().is_empty() {
            "(no answer)"
        } else {
            row.submitted.as_str()
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&row.question),
            Cell::new(submitted),
            Cell::new(&row.correct_answer),
            Cell::new(if row.correct { "OK" } else { "WRONG" }),
        ]);
    }
    println!("{table}");
}

pub(crate) fn print_score(result: &GradeResult) {
    println!(
        "\nScore: {}/{} ({}%) {}",
        result.score,
        result.total,
        result.percentage,
        result.band().label()
    );
}
