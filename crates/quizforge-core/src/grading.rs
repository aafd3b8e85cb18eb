//! Answer grading.
//!
//! Answers and keys are compared after trimming and lower-casing. Multiple
//! choice and true/false need an exact match; short answers also accept
//! substring containment in either direction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::GradingError;
use crate::model::{Question, QuestionType, Quiz};

/// Score of one graded attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeResult {
    pub score: u32,
    pub total: u32,
    pub percentage: u32,
}

impl GradeResult {
    pub fn band(&self) -> PerformanceBand {
        PerformanceBand::from_percentage(self.percentage)
    }
}

/// Per-question outcome shown when reviewing an attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionReview {
    pub question_id: String,
    pub question: String,
    pub submitted: String,
    pub correct_answer: String,
    pub correct: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Coarse feedback label for a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceBand {
    Excellent,
    Great,
    Good,
    KeepTrying,
}

impl PerformanceBand {
    pub fn from_percentage(percentage: u32) -> Self {
        if percentage >= 90 {
            PerformanceBand::Excellent
        } else if percentage >= 75 {
            PerformanceBand::Great
        } else if percentage >= 50 {
            PerformanceBand::Good
        } else {
            PerformanceBand::KeepTrying
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PerformanceBand::Excellent => "Excellent!",
            PerformanceBand::Great => "Great Job!",
            PerformanceBand::Good => "Good Effort!",
            PerformanceBand::KeepTrying => "Keep Trying!",
        }
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Whether `submitted` satisfies the question's equivalence rule.
pub fn is_correct(question: &Question, submitted: &str) -> bool {
    let answer = normalize(submitted);
    let key = normalize(&question.correct_answer);
    match question.kind {
        QuestionType::Mcq | QuestionType::TrueFalse => answer == key,
        // An empty answer is contained in every key, so it counts as correct.
        QuestionType::ShortAnswer => {
            answer == key || answer.contains(&key) || key.contains(&answer)
        }
    }
}

/// Round-half-up of `score / total * 100`.
pub fn percentage(score: u32, total: u32) -> u32 {
    debug_assert!(total > 0);
    let (score, total) = (u64::from(score), u64::from(total));
    ((score * 200 + total) / (2 * total)) as u32
}

fn submitted_for<'a>(answers: &'a BTreeMap<String, String>, question: &Question) -> &'a str {
    answers.get(&question.id).map(String::as_str).unwrap_or("")
}

/// Score an attempt. Questions without a submitted answer are graded against
/// the empty string.
pub fn grade(quiz: &Quiz, answers: &BTreeMap<String, String>) -> Result<GradeResult, GradingError> {
    if quiz.questions.is_empty() {
        return Err(GradingError::EmptyQuiz(quiz.id.clone()));
    }

    let score = quiz
        .questions
        .iter()
        .filter(|q| is_correct(q, submitted_for(answers, q)))
        .count() as u32;
    let total = quiz.questions.len() as u32;

    Ok(GradeResult {
        score,
        total,
        percentage: percentage(score, total),
    })
}

/// Per-question breakdown of an attempt, in quiz order.
pub fn review(quiz: &Quiz, answers: &BTreeMap<String, String>) -> Vec<QuestionReview> {
    quiz.questions
        .iter()
        .map(|q| {
            let submitted = submitted_for(answers, q);
            QuestionReview {
                question_id: q.id.clone(),
                question: q.question.clone(),
                submitted: submitted.to_string(),
                correct_answer: q.correct_answer.clone(),
                correct: is_correct(q, submitted),
                explanation: q.explanation.clone(),
            }
        })
        .collect()
}
