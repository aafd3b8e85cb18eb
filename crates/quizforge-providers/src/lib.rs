//! quizforge-providers — HTTP clients for the supported AI providers.
//!
//! Implements `LlmProvider` for the chat-completion family (Groq, OpenAI) and
//! the Gemini generation family, plus configuration loading and API key
//! storage.

pub mod chat;
pub mod config;
pub mod gemini;
mod http;
pub mod keys;
pub mod mock;

pub use chat::ChatCompletionClient;
pub use config::{
    build_engine, load_config, load_config_from, select_provider, ProviderSelection,
    ProviderSettings, QuizforgeConfig,
};
pub use gemini::GenerationClient;
pub use keys::{FileKeyStore, MemoryKeyStore};
