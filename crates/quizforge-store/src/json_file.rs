//! Directory of JSON files, one per collection.
//!
//! ```text
//! <dir>/chapters.json
//! <dir>/tests.json
//! <dir>/submissions.json
//! ```
//!
//! Missing files read as empty collections. Writes go through a single lock so
//! concurrent appends in one process do not lose records.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use quizforge_core::model::{Chapter, NewChapter, NewQuiz, NewSubmission, Quiz, Submission};
use quizforge_core::traits::QuizStore;

use crate::records::{self, Collections};
use crate::seed;

const CHAPTERS_FILE: &str = "chapters.json";
const TESTS_FILE: &str = "tests.json";
const SUBMISSIONS_FILE: &str = "submissions.json";

/// File-backed store rooted at a directory.
pub struct JsonFileStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open a store at `dir`. The directory is created on first write.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the sample data unless the directory already has chapters.
    /// Returns whether anything was written.
    pub async fn seed_sample_data(&self) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        if tokio::fs::try_exists(self.dir.join(CHAPTERS_FILE))
            .await
            .unwrap_or(false)
        {
            tracing::info!("{} already has data, skipping seed", self.dir.display());
            return Ok(false);
        }

        let Collections {
            chapters,
            tests,
            submissions,
        } = seed::sample_collections();
        self.write(CHAPTERS_FILE, &chapters).await?;
        self.write(TESTS_FILE, &tests).await?;
        self.write(SUBMISSIONS_FILE, &submissions).await?;
        tracing::info!("seeded sample data into {}", self.dir.display());
        Ok(true)
    }

    async fn read<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        let path = self.dir.join(file);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", path.display()))
            }
        };
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    async fn write<T: Serialize>(&self, file: &str, items: &[T]) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("failed to create {}", self.dir.display()))?;
        let path = self.dir.join(file);
        let json = serde_json::to_string_pretty(items).context("failed to serialize records")?;
        tokio::fs::write(&path, json)
            .await
            .with_context(|| format!("failed to write {}", path.display()))
    }

    async fn append<T>(&self, file: &str, item: T) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Clone,
    {
        let _guard = self.write_lock.lock().await;
        let mut items: Vec<T> = self.read(file).await?;
        items.push(item.clone());
        self.write(file, &items).await?;
        Ok(item)
    }
}

#[async_trait]
impl QuizStore for JsonFileStore {
    async fn list_chapters(&self) -> Result<Vec<Chapter>> {
        self.read(CHAPTERS_FILE).await
    }

    async fn get_chapter(&self, id: &str) -> Result<Option<Chapter>> {
        Ok(self
            .list_chapters()
            .await?
            .into_iter()
            .find(|c| c.id == id))
    }

    async fn create_chapter(&self, data: NewChapter) -> Result<Chapter> {
        self.append(CHAPTERS_FILE, records::chapter(data)).await
    }

    async fn list_tests(&self) -> Result<Vec<Quiz>> {
        self.read(TESTS_FILE).await
    }

    async fn get_test(&self, id: &str) -> Result<Option<Quiz>> {
        Ok(self.list_tests().await?.into_iter().find(|t| t.id == id))
    }

    async fn create_test(&self, data: NewQuiz) -> Result<Quiz> {
        let quiz = records::quiz(data)?;
        tracing::info!("saving quiz '{}' ({} questions)", quiz.title, quiz.questions.len());
        self.append(TESTS_FILE, quiz).await
    }

    async fn submit_attempt(&self, data: NewSubmission) -> Result<Submission> {
        self.append(SUBMISSIONS_FILE, records::submission(data)).await
    }

    async fn list_attempts_by_student(&self, student_id: &str) -> Result<Vec<Submission>> {
        Ok(self
            .read::<Submission>(SUBMISSIONS_FILE)
            .await?
            .into_iter()
            .filter(|s| s.student_id == student_id)
            .collect())
    }
}
