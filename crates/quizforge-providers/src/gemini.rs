//! Gemini `generateContent` API client.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use quizforge_core::error::ProviderError;
use quizforge_core::registry::ApiFamily;
use quizforge_core::traits::{LlmProvider, ProviderCall, MAX_OUTPUT_TOKENS, TEMPERATURE};

use crate::http::{build_client, send_json, DEFAULT_TIMEOUT_SECS};

/// Client for the generation family. The key travels as a `key` query
/// parameter; no auth header is sent.
pub struct GenerationClient {
    client: reqwest::Client,
    timeout_secs: u64,
}

impl GenerationClient {
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
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .unwrap_or_default()
    }
}

#[async_trait]
impl LlmProvider for GenerationClient {
    fn family(&self) -> ApiFamily {
        ApiFamily::Generation
    }

    #[instrument(skip(self, call), fields(model = %call.model))]
    async fn invoke(&self, call: &ProviderCall) -> Result<String, ProviderError> {
        let mut url = reqwest::Url::parse(&call.endpoint).map_err(|e| {
            ProviderError::Network(format!("invalid endpoint {}: {e}", call.endpoint))
        })?;
        url.query_pairs_mut().append_pair("key", &call.api_key);

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: &call.prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let request = self
            .client
            .post(url)
            .header("content-type", "application/json")
            .json(&body);

        let response: GenerateContentResponse =
            send_json(request, ApiFamily::Generation, self.timeout_secs).await?;
        Ok(response.into_text())
    }
}
