//! Prompt building for quiz generation.

use crate::model::{Chapter, QuestionType};

/// Maximum number of corpus characters copied into a prompt.
pub const MAX_EXCERPT_CHARS: usize = 2000;

/// Build the instruction sent to the model. Output depends only on the inputs.
pub fn build_prompt(chapter: &Chapter, question_count: usize, types: &[QuestionType]) -> String {
    let labels = types
        .iter()
        .map(|t| t.prompt_label())
        .collect::<Vec<_>>()
        .join(", ");

    let excerpt: String = chapter.corpus().chars().take(MAX_EXCERPT_CHARS).collect();

    let examples = types
        .iter()
        .map(|t| format!("  {}", example_object(*t)))
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        "You are an expert teacher making a test for Class {class} students.\n\
         Chapter: \"{title}\" | Subject: {subject}\n\
         Content: {excerpt}\n\
         \n\
         Generate EXACTLY {question_count} questions. Types to use: {labels}. Distribute evenly.\n\
         \n\
         Return ONLY a raw JSON array, no markdown, no backticks. Start with [ directly.\n\
         \n\
         [\n{examples}\n]\n\
         \n\
         Keep language simple and appropriate for Class {class}.",
        class = chapter.class_level,
        title = chapter.title,
        subject = chapter.subject,
    )
}

fn example_object(kind: QuestionType) -> &'static str {
    match kind {
        QuestionType::Mcq => {
            r#"{"type":"mcq","question":"...","options":["A","B","C","D"],"correctAnswer":"A","explanation":"..."}"#
        }
        QuestionType::TrueFalse => {
            r#"{"type":"true_false","question":"...","correctAnswer":"true","explanation":"..."}"#
        }
        QuestionType::ShortAnswer => {
            r#"{"type":"short_answer","question":"...","correctAnswer":"...","explanation":"..."}"#
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter(content: &str) -> Chapter {
        Chapter {
            id: "ch1".into(),
            title: "Introduction to Algebra".into(),
            subject: "Mathematics".into(),
            class_level: "10".into(),
            description: "Variables and equations.".into(),
            content: content.into(),
        }
    }

    #[test]
    fn prompt_contains_required_parts() {
        let prompt = build_prompt(
            &chapter("Algebra uses symbols."),
            7,
            &[QuestionType::Mcq, QuestionType::ShortAnswer],
        );
        assert!(prompt.contains("Class 10 students"));
        assert!(prompt.contains("Chapter: \"Introduction to Algebra\" | Subject: Mathematics"));
        assert!(prompt.contains("Content: Algebra uses symbols."));
        assert!(prompt.contains("Generate EXACTLY 7 questions"));
        assert!(
            prompt.contains("Types to use: Multiple Choice (exactly 4 options), Short Answer.")
        );
        assert!(prompt.contains("raw JSON array"));
        assert!(prompt.contains(r#""type":"mcq""#));
        assert!(prompt.contains(r#""type":"short_answer""#));
        assert!(!prompt.contains(r#""type":"true_false""#));
    }

    #[test]
    fn prompt_uses_description_when_content_empty() {
        let prompt = build_prompt(&chapter(""), 3, &[QuestionType::TrueFalse]);
        assert!(prompt.contains("Content: Variables and equations."));
    }

    #[test]
    fn excerpt_is_capped_in_characters() {
        let long = "é".repeat(MAX_EXCERPT_CHARS + 500);
        let prompt = build_prompt(&chapter(&long), 1, &[QuestionType::Mcq]);
        let excerpt_len = prompt
            .lines()
            .find_map(|l| l.strip_prefix("Content: "))
            .map(|c| c.chars().count())
            .unwrap();
        assert_eq!(excerpt_len, MAX_EXCERPT_CHARS);
    }

    #[test]
    fn prompt_is_deterministic() {
        let c = chapter("Same input.");
        let a = build_prompt(&c, 5, &QuestionType::ALL);
        let b = build_prompt(&c, 5, &QuestionType::ALL);
        assert_eq!(a, b);
    }
}
