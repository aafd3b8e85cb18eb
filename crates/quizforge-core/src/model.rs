//! Core data model types for quizforge.
//!
//! Chapters, questions, quizzes and submissions serialize as camelCase JSON so
//! they round-trip through the store unchanged.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::registry::ProviderId;

/// A chapter authored by a teacher. Read-only input to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: String,
    pub title: String,
    pub subject: String,
    /// Target class/grade, e.g. "9".
    #[serde(alias = "class")]
    pub class_level: String,
    #[serde(default)]
    pub description: String,
    /// Free text fed to the prompt; may be empty.
    #[serde(default)]
    pub content: String,
}

impl Chapter {
    /// The text used as prompt corpus: content, or the description when
    /// content is empty.
    pub fn corpus(&self) -> &str {
        if self.content.is_empty() {
            &self.description
        } else {
            &self.content
        }
    }
}

/// Supported question types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Mcq,
    TrueFalse,
    ShortAnswer,
}

impl QuestionType {
    /// All types in their canonical order.
    pub const ALL: [QuestionType; 3] = [
        QuestionType::Mcq,
        QuestionType::TrueFalse,
        QuestionType::ShortAnswer,
    ];

    /// Human-readable label used in prompts.
    pub fn prompt_label(self) -> &'static str {
        match self {
            QuestionType::Mcq => "Multiple Choice (exactly 4 options)",
            QuestionType::TrueFalse => "True/False",
            QuestionType::ShortAnswer => "Short Answer",
        }
    }

    /// Short label used in listings.
    pub fn short_label(self) -> &'static str {
        match self {
            QuestionType::Mcq => "MCQ",
            QuestionType::TrueFalse => "True/False",
            QuestionType::ShortAnswer => "Short Answer",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::Mcq => write!(f, "mcq"),
            QuestionType::TrueFalse => write!(f, "true_false"),
            QuestionType::ShortAnswer => write!(f, "short_answer"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mcq" => Ok(QuestionType::Mcq),
            "true_false" | "truefalse" | "tf" => Ok(QuestionType::TrueFalse),
            "short_answer" | "shortanswer" | "short" => Ok(QuestionType::ShortAnswer),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// A single quiz question.
///
/// For `mcq` the answer is expected to be one of `options`, and for
/// `true_false` it is expected to be `"true"` or `"false"`. Neither is
/// enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Sequential id ("q1".."qN"), unique within a quiz.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub question: String,
    /// Present iff `kind` is `mcq`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Format of sequential question ids.
pub fn question_id(index: usize) -> String {
    format!("q{}", index + 1)
}

/// A saved quiz ("test").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub chapter_id: String,
    pub title: String,
    pub questions: Vec<Question>,
    pub total_marks: u32,
    pub time_limit_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Quiz {
    /// Whether a student in `class_level` may take this quiz. Quizzes without
    /// a class level are open to everyone.
    pub fn visible_to_class(&self, class_level: &str) -> bool {
        self.class_level
            .as_deref()
            .map_or(true, |c| c == class_level)
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

/// Data for a quiz that has not been saved yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuiz {
    pub chapter_id: String,
    pub title: String,
    pub questions: Vec<Question>,
    pub time_limit_minutes: u32,
    #[serde(default)]
    pub class_level: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
}

impl NewQuiz {
    /// Assemble a quiz from generated questions. The title defaults to
    /// `"<chapter title> - Test"`.
    pub fn from_generated(
        chapter: &Chapter,
        questions: Vec<Question>,
        time_limit_minutes: u32,
    ) -> Self {
        Self {
            chapter_id: chapter.id.clone(),
            title: format!("{} - Test", chapter.title),
            questions,
            time_limit_minutes,
            class_level: Some(chapter.class_level.clone()),
            subject: Some(chapter.subject.clone()),
            created_by: None,
        }
    }

    /// Replace the question with the same id. Returns `false` if no question
    /// has that id.
    pub fn replace_question(&mut self, updated: Question) -> bool {
        match self.questions.iter_mut().find(|q| q.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        }
    }

    /// Remove a question by id. Remaining ids are kept as they are.
    pub fn remove_question(&mut self, id: &str) -> bool {
        let before = self.questions.len();
        self.questions.retain(|q| q.id != id);
        self.questions.len() != before
    }

    pub fn total_marks(&self) -> u32 {
        self.questions.len() as u32
    }

    /// Checks run before saving.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.chapter_id.is_empty() {
            return Err(ValidationError::NoChapter);
        }
        Ok(())
    }
}

/// A graded attempt. Append-only: retakes create new records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub student_id: String,
    pub test_id: String,
    pub answers: BTreeMap<String, String>,
    pub score: u32,
    pub percentage: u32,
    pub completed_at: DateTime<Utc>,
}

/// Data for a submission that has not been recorded yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubmission {
    pub student_id: String,
    pub test_id: String,
    pub answers: BTreeMap<String, String>,
    pub score: u32,
    pub percentage: u32,
}

/// Data for a chapter that has not been saved yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChapter {
    pub title: String,
    pub subject: String,
    #[serde(alias = "class")]
    pub class_level: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
}

/// Parameters for one quiz generation.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub chapter: Chapter,
    pub question_count: usize,
    /// Requested types in order, without duplicates.
    pub question_types: Vec<QuestionType>,
    pub provider: ProviderId,
    pub api_key: Option<String>,
}

impl GenerationRequest {
    pub fn new(
        chapter: Chapter,
        question_count: usize,
        question_types: &[QuestionType],
        provider: ProviderId,
    ) -> Self {
        let mut types = Vec::with_capacity(question_types.len());
        for t in question_types {
            if !types.contains(t) {
                types.push(*t);
            }
        }
        Self {
            chapter,
            question_count,
            question_types: types,
            provider,
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// The key, if present and not blank.
    pub fn usable_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// Caller preconditions; the engine must not run otherwise.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.question_types.is_empty() {
            return Err(ValidationError::NoQuestionTypes);
        }
        if self.question_count == 0 {
            return Err(ValidationError::ZeroQuestions);
        }
        Ok(())
    }
}
