//! The `quizforge generate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizforge_core::model::{GenerationRequest, NewQuiz, Question, QuestionType};
use quizforge_core::registry::ProviderId;
use quizforge_core::traits::{KeyStore, QuizStore};
use quizforge_core::QuestionSource;
use quizforge_providers::{build_engine, select_provider};

use super::{load_config, open_keys, open_store};

pub struct GenerateArgs {
    pub chapter: String,
    pub count: Option<usize>,
    pub types: String,
    pub provider: Option<String>,
    pub title: Option<String>,
    pub time_limit: Option<u32>,
    pub save: bool,
    pub exclude: Vec<String>,
    pub format: String,
}

fn parse_types(spec: &str) -> Result<Vec<QuestionType>> {
    spec.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<QuestionType>().map_err(anyhow::Error::msg))
        .collect()
}

pub async fn execute(config_path: Option<PathBuf>, args: GenerateArgs) -> Result<()> {
    let config = load_config(config_path)?;
    let store = open_store(&config);
    let keys = open_keys(&config)?;

    let chapter = store
        .get_chapter(&args.chapter)
        .await?
        .with_context(|| format!("chapter not found: {}", args.chapter))?;

    let explicit = args
        .provider
        .as_deref()
        .map(str::parse::<ProviderId>)
        .transpose()?;
    let selection = select_provider(&config, &keys, explicit);

    let types = parse_types(&args.types)?;
    let mut request = GenerationRequest::new(
        chapter.clone(),
        args.count.unwrap_or(config.question_count),
        &types,
        selection.provider,
    );
    if let Some(key) = selection.api_key {
        request = request.with_api_key(key);
    }
    request.validate()?;

    let engine = build_engine(&config)?;
    let outcome = engine.generate(&request).await?;
    if let Some(provider) = explicit {
        keys.set_last_provider(provider)?;
    }

    if let Some(warning) = &outcome.warning {
        eprintln!("Warning: {warning}");
    }

    let draft = if args.save {
        let mut draft = NewQuiz::from_generated(
            &chapter,
            outcome.questions.clone(),
            args.time_limit.unwrap_or(config.time_limit_minutes),
        );
        if let Some(title) = args.title {
            draft.title = title;
        }
        for id in &args.exclude {
            if !draft.remove_question(id) {
                anyhow::bail!("no generated question with id {id}");
            }
        }
        Some(draft)
    } else {
        None
    };

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&outcome.questions)?);
    } else {
        match outcome.source {
            QuestionSource::Ai(provider) => println!(
                "Generated {} questions with {} for \"{}\"\n",
                outcome.questions.len(),
                provider.descriptor().display_name,
                chapter.title
            ),
            QuestionSource::Fallback => println!(
                "Generated {} sample questions for \"{}\"\n",
                outcome.questions.len(),
                chapter.title
            ),
        }
        print_questions(&outcome.questions);
    }

    if let Some(draft) = draft {
        let quiz = store.create_test(draft).await?;
        eprintln!(
            "Saved \"{}\" as {} ({} marks, {} min)",
            quiz.title, quiz.id, quiz.total_marks, quiz.time_limit_minutes
        );
    }

    Ok(())
}

fn print_questions(questions: &[Question]) {
    for (i, q) in questions.iter().enumerate() {
        println!("{}. [{}] {}", i + 1, q.kind.short_label(), q.question);
        if let Some(options) = &q.options {
            for (j, option) in options.iter().enumerate() {
                println!("     {}) {option}", j + 1);
            }
        }
        println!("   Answer: {}", q.correct_answer);
        if let Some(explanation) = &q.explanation {
            println!("   Why: {explanation}");
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_types_keeps_order_and_skips_blanks() {
        let types = parse_types("true_false, mcq,,").unwrap();
        assert_eq!(types, vec![QuestionType::TrueFalse, QuestionType::Mcq]);
        assert!(parse_types("").unwrap().is_empty());
        assert!(parse_types("essay").is_err());
    }
}
