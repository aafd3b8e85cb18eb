//! Turning `New*` inputs into stored records.

use anyhow::Result;
use chrono::Utc;
use uuid::Uuid;

use quizforge_core::model::{Chapter, NewChapter, NewQuiz, NewSubmission, Quiz, Submission};

/// In-memory image of a store.
#[derive(Debug, Default, Clone)]
pub(crate) struct Collections {
    pub chapters: Vec<Chapter>,
    pub tests: Vec<Quiz>,
    pub submissions: Vec<Submission>,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub(crate) fn chapter(data: NewChapter) -> Chapter {
    Chapter {
        id: new_id(),
        title: data.title,
        subject: data.subject,
        class_level: data.class_level,
        description: data.description,
        content: data.content,
    }
}

/// Validates the input and recomputes `total_marks` from the final questions.
pub(crate) fn quiz(data: NewQuiz) -> Result<Quiz> {
    data.validate()?;
    Ok(Quiz {
        id: new_id(),
        total_marks: data.total_marks(),
        chapter_id: data.chapter_id,
        title: data.title.trim().to_string(),
        questions: data.questions,
        time_limit_minutes: data.time_limit_minutes,
        class_level: data.class_level,
        subject: data.subject,
        created_by: data.created_by,
        created_at: Utc::now(),
    })
}

pub(crate) fn submission(data: NewSubmission) -> Submission {
    Submission {
        id: new_id(),
        student_id: data.student_id,
        test_id: data.test_id,
        answers: data.answers,
        score: data.score,
        percentage: data.percentage,
        completed_at: Utc::now(),
    }
}
