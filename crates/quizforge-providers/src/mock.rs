//! Mock provider for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use quizforge_core::error::ProviderError;
use quizforge_core::registry::ApiFamily;
use quizforge_core::traits::{LlmProvider, ProviderCall};

enum Reply {
    Text(String),
    Status { status: u16, message: String },
}

/// A mock LLM client for exercising the generation engine without real API
/// calls. Replies with fixed text or a fixed HTTP failure.
pub struct MockProvider {
    family: ApiFamily,
    reply: Reply,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Last call received.
    last_call: Mutex<Option<ProviderCall>>,
}

impl MockProvider {
    /// A mock that always returns `text`.
    pub fn with_fixed_response(family: ApiFamily, text: &str) -> Self {
        Self::new(family, Reply::Text(text.to_string()))
    }

    /// A mock that always fails with `status`, using the family's generic message.
    pub fn failing(family: ApiFamily, status: u16) -> Self {
        let message = format!("{} error {status}", family.error_label());
        Self::new(family, Reply::Status { status, message })
    }

    fn new(family: ApiFamily, reply: Reply) -> Self {
        Self {
            family,
            reply,
            call_count: AtomicU32::new(0),
            last_call: Mutex::new(None),
        }
    }

    /// Get the number of calls made to this provider.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last call made to this provider.
    pub fn last_call(&self) -> Option<ProviderCall> {
        self.last_call
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn family(&self) -> ApiFamily {
        self.family
    }

    async fn invoke(&self, call: &ProviderCall) -> Result<String, ProviderError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self
            .last_call
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(call.clone());

        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Status { status, message } if *status == 401 || *status == 403 => {
                Err(ProviderError::Auth {
                    status: *status,
                    message: message.clone(),
                })
            }
            Reply::Status { status, message } => Err(ProviderError::Http {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}
