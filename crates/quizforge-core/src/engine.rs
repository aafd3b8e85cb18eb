//! Quiz generation orchestrator.
//!
//! Tries the selected provider once and falls back to template questions on
//! any provider or parse failure. Only invalid requests and unregistered
//! providers fail outward.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::instrument;

use crate::error::{GenerationError, ParseError, ProviderError, RegistryError};
use crate::fallback;
use crate::model::{GenerationRequest, Question};
use crate::parser::parse_questions;
use crate::prompt::build_prompt;
use crate::registry::{ApiFamily, ProviderDescriptor, ProviderId};
use crate::traits::{LlmProvider, ProviderCall};

/// Appended to the underlying error text when the fallback path is taken.
pub const FALLBACK_SUFFIX: &str = " — using sample questions instead";

/// Where the questions in an outcome came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionSource {
    Ai(ProviderId),
    Fallback,
}

/// Result of one generation run.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub questions: Vec<Question>,
    pub source: QuestionSource,
    /// Set when an AI attempt failed and the fallback was used.
    pub warning: Option<String>,
}

impl GenerationOutcome {
    /// `true` when an AI attempt was made and failed.
    pub fn is_degraded(&self) -> bool {
        self.warning.is_some()
    }
}

#[derive(Debug, Error)]
enum AiFailure {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("AI response contained no questions")]
    NoQuestions,
}

/// The generation engine.
#[derive(Default)]
pub struct GenerationEngine {
    clients: HashMap<ApiFamily, Arc<dyn LlmProvider>>,
    endpoints: HashMap<ProviderId, String>,
}

impl GenerationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the client for its API family, replacing any earlier one.
    pub fn with_client(mut self, client: Arc<dyn LlmProvider>) -> Self {
        self.clients.insert(client.family(), client);
        self
    }

    /// Send requests for `provider` to `url` instead of the registry endpoint.
    pub fn with_endpoint(mut self, provider: ProviderId, url: impl Into<String>) -> Self {
        self.endpoints.insert(provider, url.into());
        self
    }

    fn endpoint_for(&self, descriptor: &ProviderDescriptor) -> String {
        self.endpoints
            .get(&descriptor.id)
            .cloned()
            .unwrap_or_else(|| descriptor.endpoint_url.to_string())
    }

    /// Generate questions for a request.
    #[instrument(
        skip(self, request),
        fields(provider = %request.provider, count = request.question_count)
    )]
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationOutcome, GenerationError> {
        request
            .validate()
            .map_err(|e| GenerationError::InvalidRequest(e.to_string()))?;

        let descriptor = request.provider.descriptor();
        let client = self.clients.get(&descriptor.family).ok_or_else(|| {
            RegistryError::UnknownProvider(format!(
                "{} (no client for {:?} API)",
                descriptor.id, descriptor.family
            ))
        })?;

        let Some(api_key) = request.usable_key() else {
            tracing::info!("no API key for {}, using sample questions", descriptor.id);
            return Ok(self.fallback(request, None));
        };

        let start = Instant::now();
        match self.try_ai(client.as_ref(), descriptor, api_key, request).await {
            Ok(questions) => {
                tracing::info!(
                    "generated {} questions with {} in {}ms",
                    questions.len(),
                    descriptor.display_name,
                    start.elapsed().as_millis()
                );
                Ok(GenerationOutcome {
                    questions,
                    source: QuestionSource::Ai(descriptor.id),
                    warning: None,
                })
            }
            Err(e) => {
                tracing::warn!("AI generation with {} failed: {e}", descriptor.id);
                Ok(self.fallback(request, Some(format!("{e}{FALLBACK_SUFFIX}"))))
            }
        }
    }

    async fn try_ai(
        &self,
        client: &dyn LlmProvider,
        descriptor: &ProviderDescriptor,
        api_key: &str,
        request: &GenerationRequest,
    ) -> Result<Vec<Question>, AiFailure> {
        let call = ProviderCall {
            endpoint: self.endpoint_for(descriptor),
            api_key: api_key.to_string(),
            model: descriptor.model_id.to_string(),
            prompt: build_prompt(
                &request.chapter,
                request.question_count,
                &request.question_types,
            ),
        };

        let raw = client.invoke(&call).await?;
        tracing::debug!("raw response: {} bytes", raw.len());

        let questions = parse_questions(&raw)?;
        if questions.is_empty() {
            return Err(AiFailure::NoQuestions);
        }
        Ok(questions)
    }

    fn fallback(&self, request: &GenerationRequest, warning: Option<String>) -> GenerationOutcome {
        GenerationOutcome {
            questions: fallback::generate(
                &request.chapter,
                request.question_count,
                &request.question_types,
            ),
            source: QuestionSource::Fallback,
            warning,
        }
    }
}
