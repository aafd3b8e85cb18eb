//! Request plumbing shared by both provider families.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use quizforge_core::error::ProviderError;
use quizforge_core::registry::ApiFamily;

pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::Network(format!("failed to build HTTP client: {e}")))
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// The provider's `error.message`, if the body carries one.
fn provider_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.error.message)
        .filter(|m| !m.trim().is_empty())
}

fn transport_error(e: reqwest::Error, timeout_secs: u64) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout(timeout_secs)
    } else {
        ProviderError::Network(e.to_string())
    }
}

/// Send `request` and decode a successful JSON body into `T`.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    family: ApiFamily,
    timeout_secs: u64,
) -> Result<T, ProviderError> {
    let response = request
        .send()
        .await
        .map_err(|e| transport_error(e, timeout_secs))?;

    let status = response.status().as_u16();
    if !response.status().is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = provider_message(&body)
            .unwrap_or_else(|| format!("{} error {status}", family.error_label()));
        tracing::debug!(status, "provider returned an error: {message}");
        return Err(if status == 401 || status == 403 {
            ProviderError::Auth { status, message }
        } else {
            ProviderError::Http { status, message }
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| transport_error(e, timeout_secs))?;
    serde_json::from_slice(&bytes).map_err(|e| ProviderError::Http {
        status,
        message: format!("failed to parse response: {e}"),
    })
}
