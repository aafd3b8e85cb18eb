//! The `quizforge take` command: a timed attempt read from stdin.

use std::io::BufRead;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;

use quizforge_core::attempt::{AttemptSession, GradedAttempt, SubmitTrigger};
use quizforge_core::grading::review;
use quizforge_core::model::{NewSubmission, Question, QuestionType};
use quizforge_core::traits::QuizStore;
use quizforge_core::GradingError;

use super::grade::{print_review, print_score};
use super::{find_test, load_config, open_store};

fn format_remaining(remaining: Duration) -> String {
    let secs = remaining.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Map shorthand input to the stored answer form: option numbers for MCQ,
/// `t`/`f` for true/false.
fn interpret(question: &Question, input: &str) -> String {
    let input = input.trim();
    match question.kind {
        QuestionType::Mcq => input
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| question.options.as_ref()?.get(i).cloned())
            .unwrap_or_else(|| input.to_string()),
        QuestionType::TrueFalse => match input.to_lowercase().as_str() {
            "t" | "y" | "yes" => "true".to_string(),
            "f" | "n" | "no" => "false".to_string(),
            _ => input.to_string(),
        },
        QuestionType::ShortAnswer => input.to_string(),
    }
}

/// Read stdin on a plain thread so a pending read never holds up runtime
/// shutdown after an auto-submit.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn print_question(index: usize, total: usize, question: &Question, remaining: Duration) {
    println!(
        "\n[{} left] Question {}/{} ({})",
        format_remaining(remaining),
        index + 1,
        total,
        question.kind.short_label()
    );
    println!("{}", question.question);
    match (&question.options, question.kind) {
        (Some(options), _) => {
            for (i, option) in options.iter().enumerate() {
                println!("  {}) {option}", i + 1);
            }
        }
        (None, QuestionType::TrueFalse) => println!("  (true/false)"),
        _ => {}
    }
}

pub async fn execute(config_path: Option<PathBuf>, test_id: String, student: String) -> Result<()> {
    let config = load_config(config_path)?;
    let store = open_store(&config);
    let quiz = find_test(&store, &test_id).await?;

    println!(
        "{}: {} questions, {} minutes. Press Enter to skip a question.",
        quiz.title,
        quiz.questions.len(),
        quiz.time_limit_minutes
    );

    let session = AttemptSession::start(quiz.clone())?;
    let mut lines = spawn_stdin_reader();

    let graded = 'attempt: {
        for (i, question) in quiz.questions.iter().enumerate() {
            print_question(i, quiz.questions.len(), question, session.remaining());

            let line = tokio::select! {
                graded = session.completed() => {
                    println!("\nTime's up! Your answers were submitted automatically.");
                    break 'attempt graded;
                }
                line = lines.recv() => line,
            };

            let Some(line) = line else { break };
            if let Err(GradingError::AlreadySubmitted) =
                session.record_answer(&question.id, &interpret(question, &line))
            {
                break 'attempt session.completed().await;
            }
        }

        submit(&session).await?
    };

    print_review(&review(&quiz, &graded.answers));
    print_score(&graded.result);

    let submission = store
        .submit_attempt(NewSubmission {
            student_id: student,
            test_id: quiz.id.clone(),
            answers: graded.answers,
            score: graded.result.score,
            percentage: graded.result.percentage,
        })
        .await?;
    tracing::info!(
        "recorded submission {} ({})",
        submission.id,
        match graded.trigger {
            SubmitTrigger::Manual => "submitted",
            SubmitTrigger::TimeExpired => "time expired",
        }
    );

    Ok(())
}

async fn submit(session: &AttemptSession) -> Result<GradedAttempt> {
    match session.submit() {
        Ok(graded) => Ok(graded),
        Err(GradingError::AlreadySubmitted) => Ok(session.completed().await),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(kind: QuestionType) -> Question {
        Question {
            id: "q1".into(),
            kind,
            question: "?".into(),
            options: (kind == QuestionType::Mcq)
                .then(|| vec!["Melanin".into(), "Chlorophyll".into()]),
            correct_answer: "Chlorophyll".into(),
            explanation: None,
        }
    }

    #[test]
    fn option_numbers_select_mcq_options() {
        let q = question(QuestionType::Mcq);
        assert_eq!(interpret(&q, "2"), "Chlorophyll");
        assert_eq!(interpret(&q, " chlorophyll "), "chlorophyll");
        assert_eq!(interpret(&q, "0"), "0");
        assert_eq!(interpret(&q, "9"), "9");
    }

    #[test]
    fn true_false_shorthand() {
        let q = question(QuestionType::TrueFalse);
        assert_eq!(interpret(&q, "T"), "true");
        assert_eq!(interpret(&q, "no"), "false");
        assert_eq!(interpret(&q, "False"), "False");
    }

    #[test]
    fn remaining_time_is_mm_ss() {
        assert_eq!(format_remaining(Duration::from_secs(900)), "15:00");
        assert_eq!(format_remaining(Duration::from_secs(61)), "01:01");
    }
}
