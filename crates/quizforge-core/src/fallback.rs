//! Deterministic template questions used when no AI output is available.
//!
//! `generate` makes no network calls and has no failure path, so a quiz can
//! always be produced.

use std::collections::HashMap;

use crate::model::{question_id, Chapter, Question, QuestionType};

/// A template before an id and type are attached.
struct Template {
    question: String,
    options: Option<Vec<String>>,
    correct_answer: String,
    explanation: String,
}

impl Template {
    fn plain(question: String, correct_answer: String, explanation: String) -> Self {
        Self {
            question,
            options: None,
            correct_answer,
            explanation,
        }
    }

    fn choice(
        question: String,
        options: [String; 4],
        correct_answer: String,
        explanation: String,
    ) -> Self {
        Self {
            question,
            options: Some(options.into()),
            correct_answer,
            explanation,
        }
    }
}

/// The three templates for one type, filled in from the chapter.
fn pool(chapter: &Chapter, kind: QuestionType) -> Vec<Template> {
    let title = &chapter.title;
    let subject = &chapter.subject;
    let class = &chapter.class_level;

    match kind {
        QuestionType::Mcq => vec![
            Template::choice(
                format!("What is the main subject of \"{title}\"?"),
                [subject.clone(), "History".into(), "Geography".into(), "Sports".into()],
                subject.clone(),
                format!("This chapter belongs to {subject}."),
            ),
            Template::choice(
                format!("\"{title}\" is for which class?"),
                ["5".into(), "8".into(), class.clone(), "12".into()],
                class.clone(),
                format!("This chapter is for Class {class}."),
            ),
            Template::choice(
                format!("Which subject is \"{title}\" part of?"),
                [
                    subject.clone(),
                    "Physical Education".into(),
                    "Fine Arts".into(),
                    "Music".into(),
                ],
                subject.clone(),
                format!("It is a {subject} chapter."),
            ),
        ],
        QuestionType::TrueFalse => vec![
            Template::plain(
                format!("\"{title}\" is studied in Class {class}."),
                "true".into(),
                format!("Yes, this chapter is for Class {class}."),
            ),
            Template::plain(
                format!("{subject} is an important school subject."),
                "true".into(),
                format!("Yes, {subject} is a core subject."),
            ),
            Template::plain(
                format!("\"{title}\" is a chapter about Sports."),
                "false".into(),
                format!("No, it is about {subject}."),
            ),
        ],
        QuestionType::ShortAnswer => {
            let (learned, learned_explanation) = if chapter.description.is_empty() {
                (title.clone(), format!("This chapter covers {title}."))
            } else {
                (chapter.description.clone(), chapter.description.clone())
            };
            vec![
                Template::plain(
                    "What is the title of this chapter?".into(),
                    title.clone(),
                    format!("The chapter is titled \"{title}\"."),
                ),
                Template::plain(
                    "Which subject does this chapter belong to?".into(),
                    subject.clone(),
                    format!("This is a {subject} chapter."),
                ),
                Template::plain(
                    "Write one thing you will learn from this chapter.".into(),
                    learned,
                    learned_explanation,
                ),
            ]
        }
    }
}

/// Produce exactly `question_count` template questions.
///
/// Types are visited round-robin in the order given (all three when `types`
/// is empty). Each type walks its own pool with an independent counter, so the
/// k-th draw of a type is `pool[k % pool.len()]`.
pub fn generate(chapter: &Chapter, question_count: usize, types: &[QuestionType]) -> Vec<Question> {
    let types: &[QuestionType] = if types.is_empty() {
        &QuestionType::ALL
    } else {
        types
    };

    let pools: HashMap<QuestionType, Vec<Template>> =
        types.iter().map(|&t| (t, pool(chapter, t))).collect();
    let mut next_index: HashMap<QuestionType, usize> = HashMap::new();

    (0..question_count)
        .map(|i| {
            let kind = types[i % types.len()];
            let templates = &pools[&kind];
            let counter = next_index.entry(kind).or_insert(0);
            let template = &templates[*counter % templates.len()];
            *counter += 1;

            Question {
                id: question_id(i),
                kind,
                question: template.question.clone(),
                options: template.options.clone(),
                correct_answer: template.correct_answer.clone(),
                explanation: Some(template.explanation.clone()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter() -> Chapter {
        Chapter {
            id: "ch3".into(),
            title: "The French Revolution".into(),
            subject: "Social Studies".into(),
            class_level: "9".into(),
            description: "Political change in France, 1789-1799.".into(),
            content: "The revolution began in 1789.".into(),
        }
    }

    #[test]
    fn output_is_deterministic() {
        let a = generate(&chapter(), 7, &QuestionType::ALL);
        let b = generate(&chapter(), 7, &QuestionType::ALL);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn round_robin_follows_input_order() {
        let questions = generate(&chapter(), 5, &[QuestionType::Mcq, QuestionType::TrueFalse]);
        let kinds: Vec<_> = questions.iter().map(|q| q.kind).collect();
        assert_eq!(
            kinds,
            vec![
                QuestionType::Mcq,
                QuestionType::TrueFalse,
                QuestionType::Mcq,
                QuestionType::TrueFalse,
                QuestionType::Mcq,
            ]
        );
    }

    #[test]
    fn type_counts_differ_by_at_most_one() {
        let questions = generate(&chapter(), 10, &QuestionType::ALL);
        let count = |k: QuestionType| questions.iter().filter(|q| q.kind == k).count();
        let counts = [
            count(QuestionType::Mcq),
            count(QuestionType::TrueFalse),
            count(QuestionType::ShortAnswer),
        ];
        assert_eq!(counts, [4, 3, 3]);
    }

    #[test]
    fn ids_are_sequential_and_count_exact() {
        let questions = generate(&chapter(), 4, &[QuestionType::ShortAnswer]);
        let ids: Vec<_> = questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["q1", "q2", "q3", "q4"]);
        assert!(generate(&chapter(), 0, &QuestionType::ALL).is_empty());
    }

    #[test]
    fn per_type_pool_wraps_around() {
        let questions = generate(&chapter(), 4, &[QuestionType::TrueFalse]);
        assert_eq!(questions[0].question, questions[3].question);
        assert_ne!(questions[0].question, questions[1].question);
        assert_eq!(questions[2].correct_answer, "false");
    }

    #[test]
    fn per_type_counters_are_independent() {
        let questions = generate(&chapter(), 4, &[QuestionType::Mcq, QuestionType::ShortAnswer]);
        // Second mcq draw is the second mcq template, not the fourth overall.
        assert_eq!(questions[2].question, "\"The French Revolution\" is for which class?");
        assert_eq!(questions[3].question, "Which subject does this chapter belong to?");
    }

    #[test]
    fn empty_types_default_to_all_in_fixed_order() {
        let questions = generate(&chapter(), 3, &[]);
        let kinds: Vec<_> = questions.iter().map(|q| q.kind).collect();
        assert_eq!(kinds, QuestionType::ALL.to_vec());
    }

    #[test]
    fn mcq_answers_are_among_options() {
        for q in generate(&chapter(), 3, &[QuestionType::Mcq]) {
            let options = q.options.expect("mcq templates carry options");
            assert_eq!(options.len(), 4);
            assert!(options.contains(&q.correct_answer));
        }
    }

    #[test]
    fn short_answer_uses_title_when_description_missing() {
        let mut c = chapter();
        c.description.clear();
        let questions = generate(&c, 3, &[QuestionType::ShortAnswer]);
        assert_eq!(questions[2].correct_answer, "The French Revolution");
        assert_eq!(
            questions[2].explanation.as_deref(),
            Some("This chapter covers The French Revolution.")
        );
    }
}
