//! Error types for the generation and grading pipeline.
//!
//! Provider and parse errors are recoverable: the generation engine turns them
//! into the fallback path plus a warning. Registry, generation and validation
//! errors are hard failures surfaced to the caller.

use thiserror::Error;

/// Errors that can occur when calling an LLM provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider rejected the credentials (HTTP 401/403).
    #[error("{message}")]
    Auth { status: u16, message: String },

    /// The provider returned any other non-success status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),
}

impl ProviderError {
    /// HTTP status, if the failure came from a provider response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Auth { status, .. } | ProviderError::Http { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// Returns `true` if the provider rejected the credentials.
    pub fn is_auth(&self) -> bool {
        matches!(self, ProviderError::Auth { .. })
    }
}

/// Errors produced while extracting questions from raw model text.
#[derive(Debug, Error)]
pub enum ParseError {
    /// No bracketed array could be located or decoded.
    #[error("Could not find JSON array in AI response{}", suffix(.detail))]
    MalformedResponse { detail: Option<String> },

    /// The bracketed text decoded to something other than a list.
    #[error("AI response is not an array")]
    NotAnArray,
}

fn suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(": {d}"))
        .unwrap_or_default()
}

/// Errors from the provider registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),
}

/// Hard failures of the generation engine.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// A caller precondition was violated; nothing was generated.
    #[error("invalid generation request: {0}")]
    InvalidRequest(String),

    /// The provider is not registered or has no client for its API family.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors from the grading engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradingError {
    /// A quiz without questions cannot produce a percentage.
    #[error("quiz '{0}' has no questions")]
    EmptyQuiz(String),

    /// The attempt was already submitted.
    #[error("attempt already submitted")]
    AlreadySubmitted,
}

/// Caller-level validation failures shown to the user before any action runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a chapter")]
    NoChapter,

    #[error("Select at least one question type")]
    NoQuestionTypes,

    #[error("Question count must be at least 1")]
    ZeroQuestions,

    #[error("Please enter a test title")]
    EmptyTitle,
}
