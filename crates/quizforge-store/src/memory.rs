//! In-memory store.

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use quizforge_core::model::{Chapter, NewChapter, NewQuiz, NewSubmission, Quiz, Submission};
use quizforge_core::traits::QuizStore;

use crate::records::{self, Collections};
use crate::seed;

/// Store backed by process memory. Contents are lost on drop.
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store preloaded with the sample chapters, quizzes and attempts.
    pub fn with_sample_data() -> Self {
        Self {
            data: RwLock::new(seed::sample_collections()),
        }
    }
}

#[async_trait]
impl QuizStore for MemoryStore {
    async fn list_chapters(&self) -> Result<Vec<Chapter>> {
        Ok(self.data.read().await.chapters.clone())
    }

    async fn get_chapter(&self, id: &str) -> Result<Option<Chapter>> {
        Ok(self
            .data
            .read()
            .await
            .chapters
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn create_chapter(&self, data: NewChapter) -> Result<Chapter> {
        let chapter = records::chapter(data);
        self.data.write().await.chapters.push(chapter.clone());
        Ok(chapter)
    }

    async fn list_tests(&self) -> Result<Vec<Quiz>> {
        Ok(self.data.read().await.tests.clone())
    }

    async fn get_test(&self, id: &str) -> Result<Option<Quiz>> {
        Ok(self
            .data
            .read()
            .await
            .tests
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn create_test(&self, data: NewQuiz) -> Result<Quiz> {
        let quiz = records::quiz(data)?;
        self.data.write().await.tests.push(quiz.clone());
        Ok(quiz)
    }

    async fn submit_attempt(&self, data: NewSubmission) -> Result<Submission> {
        let submission = records::submission(data);
        self.data.write().await.submissions.push(submission.clone());
        Ok(submission)
    }

    async fn list_attempts_by_student(&self, student_id: &str) -> Result<Vec<Submission>> {
        Ok(self
            .data
            .read()
            .await
            .submissions
            .iter()
            .filter(|s| s.student_id == student_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use quizforge_core::model::{Question, QuestionType};
    use quizforge_core::ValidationError;

    fn new_quiz(title: &str) -> NewQuiz {
        NewQuiz {
            chapter_id: "ch4".into(),
            title: title.into(),
            questions: vec![Question {
                id: "q1".into(),
                kind: QuestionType::TrueFalse,
                question: "1/2 equals 0.5.".into(),
                options: None,
                correct_answer: "true".into(),
                explanation: None,
            }],
            time_limit_minutes: 5,
            class_level: Some("6".into()),
            subject: Some("Mathematics".into()),
            created_by: None,
        }
    }

    #[tokio::test]
    async fn create_test_assigns_id_and_marks() {
        let store = MemoryStore::new();
        let quiz = store.create_test(new_quiz("Fractions - Test")).await.unwrap();
        assert!(!quiz.id.is_empty());
        assert_eq!(quiz.total_marks, 1);
        assert_eq!(store.get_test(&quiz.id).await.unwrap(), Some(quiz));
    }

    #[tokio::test]
    async fn blank_title_is_rejected() {
        let store = MemoryStore::new();
        let err = store.create_test(new_quiz("   ")).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::EmptyTitle)
        );
        assert!(store.list_tests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn attempts_are_append_only_and_filtered_by_student() {
        let store = MemoryStore::new();
        for (student, pct) in [("s1", 40), ("s1", 80), ("s2", 100)] {
            store
                .submit_attempt(NewSubmission {
                    student_id: student.into(),
                    test_id: "test1".into(),
                    answers: BTreeMap::new(),
                    score: 0,
                    percentage: pct,
                })
                .await
                .unwrap();
        }

        let s1 = store.list_attempts_by_student("s1").await.unwrap();
        assert_eq!(s1.len(), 2);
        assert_ne!(s1[0].id, s1[1].id);
        assert_eq!(s1[1].percentage, 80);
    }

    #[tokio::test]
    async fn sample_data_is_loaded() {
        let store = MemoryStore::with_sample_data();
        assert_eq!(store.list_chapters().await.unwrap().len(), 4);
        assert_eq!(store.list_tests().await.unwrap().len(), 2);
        assert!(store.get_chapter("ch2").await.unwrap().is_some());
    }
}
