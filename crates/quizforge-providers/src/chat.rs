//! Chat-completion API client (Groq, OpenAI).

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use quizforge_core::error::ProviderError;
use quizforge_core::registry::ApiFamily;
use quizforge_core::traits::{LlmProvider, ProviderCall, MAX_OUTPUT_TOKENS, TEMPERATURE};

use crate::http::{build_client, send_json, DEFAULT_TIMEOUT_SECS};

/// Client for OpenAI-compatible `chat/completions` endpoints.
pub struct ChatCompletionClient {
    client: reqwest::Client,
    timeout_secs: u64,
}

impl ChatCompletionClient {
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(timeout)?,
            timeout_secs: timeout.as_secs(),
        })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatChoiceMessage>,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    fn into_text(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .unwrap_or_default()
    }
}

#[async_trait]
impl LlmProvider for ChatCompletionClient {
    fn family(&self) -> ApiFamily {
        ApiFamily::ChatCompletion
    }

    #[instrument(skip(self, call), fields(model = %call.model))]
    async fn invoke(&self, call: &ProviderCall) -> Result<String, ProviderError> {
        let body = ChatRequest {
            model: &call.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &call.prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_OUTPUT_TOKENS,
        };

        let request = self
            .client
            .post(&call.endpoint)
            .header("Authorization", format!("Bearer {}", call.api_key))
            .header("content-type", "application/json")
            .json(&body);

        let response: ChatResponse =
            send_json(request, ApiFamily::ChatCompletion, self.timeout_secs).await?;
        Ok(response.into_text())
    }
}
