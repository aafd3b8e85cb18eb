//! Core trait definitions for provider clients, key storage and persistence.
//!
//! Provider clients live in `quizforge-providers`; stores live in
//! `quizforge-store`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::model::{Chapter, NewChapter, NewQuiz, NewSubmission, Quiz, Submission};
use crate::registry::{ApiFamily, ProviderId};

// ---------------------------------------------------------------------------
// LLM Provider trait
// ---------------------------------------------------------------------------

/// Trait for HTTP clients of one provider API family.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// The request/response shape this client speaks.
    fn family(&self) -> ApiFamily;

    /// Send the prompt and return the model's raw text.
    async fn invoke(&self, call: &ProviderCall) -> Result<String, ProviderError>;
}

/// One call to a provider endpoint.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderCall {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub prompt: String,
}

impl std::fmt::Debug for ProviderCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderCall")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"***")
            .field("model", &self.model)
            .field("prompt_len", &self.prompt.len())
            .finish()
    }
}

/// Sampling temperature sent to every provider.
pub const TEMPERATURE: f64 = 0.7;

/// Output token cap sent to every provider.
pub const MAX_OUTPUT_TOKENS: u32 = 3000;

// ---------------------------------------------------------------------------
// Key store trait
// ---------------------------------------------------------------------------

/// Per-provider storage for user-supplied API keys.
pub trait KeyStore: Send + Sync {
    fn get(&self, provider: ProviderId) -> Option<String>;

    fn set(&self, provider: ProviderId, key: &str) -> anyhow::Result<()>;

    /// The provider the user picked last, if remembered.
    fn last_provider(&self) -> Option<ProviderId> {
        None
    }

    fn set_last_provider(&self, _provider: ProviderId) -> anyhow::Result<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Data-access trait
// ---------------------------------------------------------------------------

/// CRUD access to chapters, quizzes and submissions.
#[async_trait]
pub trait QuizStore: Send + Sync {
    async fn list_chapters(&self) -> anyhow::Result<Vec<Chapter>>;

    async fn get_chapter(&self, id: &str) -> anyhow::Result<Option<Chapter>>;

    async fn create_chapter(&self, data: NewChapter) -> anyhow::Result<Chapter>;

    async fn list_tests(&self) -> anyhow::Result<Vec<Quiz>>;

    async fn get_test(&self, id: &str) -> anyhow::Result<Option<Quiz>>;

    async fn create_test(&self, data: NewQuiz) -> anyhow::Result<Quiz>;

    /// Record a graded attempt. Never overwrites earlier attempts.
    async fn submit_attempt(&self, data: NewSubmission) -> anyhow::Result<Submission>;

    async fn list_attempts_by_student(&self, student_id: &str) -> anyhow::Result<Vec<Submission>>;
}
