//! Configuration loading, key resolution and engine construction.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizforge_core::registry::{self, ProviderId};
use quizforge_core::traits::KeyStore;
use quizforge_core::GenerationEngine;

use crate::chat::ChatCompletionClient;
use crate::gemini::GenerationClient;

/// Per-provider settings from the `[providers.<id>]` tables.
///
/// Custom Debug masks the API key.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ProviderSettings {
    #[serde(default)]
    pub api_key: Option<String>,
    /// Replaces the registry endpoint, e.g. for a proxy.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Top-level quizforge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizforgeConfig {
    /// Provider settings keyed by provider id.
    #[serde(default)]
    pub providers: HashMap<String, ProviderSettings>,
    /// Provider used when none is given and none is auto-detected.
    #[serde(default)]
    pub default_provider: Option<ProviderId>,
    #[serde(default = "default_question_count")]
    pub question_count: usize,
    #[serde(default = "default_time_limit")]
    pub time_limit_minutes: u32,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Directory holding chapters, tests and submissions.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Key store file. Defaults to `keys.json` inside `data_dir`.
    #[serde(default)]
    pub key_file: Option<PathBuf>,
}

fn default_question_count() -> usize {
    5
}
fn default_time_limit() -> u32 {
    15
}
fn default_request_timeout() -> u64 {
    120
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("./quizforge-data")
}

impl Default for QuizforgeConfig {
    fn default() -> Self {
        Self {
            providers: HashMap::new(),
            default_provider: None,
            question_count: default_question_count(),
            time_limit_minutes: default_time_limit(),
            request_timeout_secs: default_request_timeout(),
            data_dir: default_data_dir(),
            key_file: None,
        }
    }
}

impl QuizforgeConfig {
    pub fn settings(&self, provider: ProviderId) -> Option<&ProviderSettings> {
        self.providers.get(provider.as_str())
    }

    /// Configured (file or environment) secret for `provider`, if non-blank.
    pub fn secret(&self, provider: ProviderId) -> Option<String> {
        self.settings(provider)
            .and_then(|s| s.api_key.as_deref())
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
    }

    pub fn key_file(&self) -> PathBuf {
        self.key_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("keys.json"))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Environment variable holding the secret for `provider`.
pub fn env_var_name(provider: ProviderId) -> String {
    format!("QUIZFORGE_{}_API_KEY", provider.as_str().to_uppercase())
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied as-is and never expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + len];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + len + 1..];
    }
    result.push_str(rest);
    result
}

fn apply_env_overrides<F>(config: &mut QuizforgeConfig, mut env: F)
where
    F: FnMut(&str) -> Option<String>,
{
    for provider in ProviderId::ALL {
        if let Some(key) = env(&env_var_name(provider)) {
            config
                .providers
                .entry(provider.as_str().to_string())
                .or_default()
                .api_key = Some(key);
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizforge.toml` in the current directory
/// 2. `~/.config/quizforge/config.toml`
///
/// Environment overrides: `QUIZFORGE_GROQ_API_KEY`, `QUIZFORGE_GEMINI_API_KEY`,
/// `QUIZFORGE_OPENAI_API_KEY`.
pub fn load_config() -> Result<QuizforgeConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizforgeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizforge.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizforgeConfig::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    tracing::debug!(path = ?config_path, "loaded config: {config:?}");
    Ok(config)
}

/// Parse a TOML document, expand `${VAR}` references and check provider ids.
pub fn parse_config(content: &str) -> Result<QuizforgeConfig> {
    let mut config: QuizforgeConfig = toml::from_str(content)?;

    for id in config.providers.keys() {
        registry::lookup(id)?;
    }
    for settings in config.providers.values_mut() {
        settings.api_key = settings.api_key.as_deref().map(resolve_env_vars);
        settings.base_url = settings.base_url.as_deref().map(resolve_env_vars);
    }
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizforge"))
}

/// Build an engine with both API families registered and any `base_url`
/// overrides applied.
pub fn build_engine(config: &QuizforgeConfig) -> Result<GenerationEngine> {
    let timeout = config.request_timeout();
    let mut engine = GenerationEngine::new()
        .with_client(Arc::new(
            ChatCompletionClient::with_timeout(timeout).context("chat-completion client")?,
        ))
        .with_client(Arc::new(
            GenerationClient::with_timeout(timeout).context("generation client")?,
        ));

    for provider in ProviderId::ALL {
        if let Some(url) = config.settings(provider).and_then(|s| s.base_url.clone()) {
            engine = engine.with_endpoint(provider, url);
        }
    }
    Ok(engine)
}

/// The provider and key a generation run should use.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderSelection {
    pub provider: ProviderId,
    pub api_key: Option<String>,
    /// The provider was picked because a configured secret was found.
    pub auto_detected: bool,
}

impl std::fmt::Debug for ProviderSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSelection")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("auto_detected", &self.auto_detected)
            .finish()
    }
}

/// Choose a provider and key.
///
/// An explicit provider uses its configured secret, then its stored key.
/// Otherwise the first provider with a configured secret wins; failing that,
/// the configured default or last-used provider with its stored key, then the
/// first registry entry.
pub fn select_provider(
    config: &QuizforgeConfig,
    keys: &dyn KeyStore,
    explicit: Option<ProviderId>,
) -> ProviderSelection {
    if let Some(provider) = explicit {
        return ProviderSelection {
            provider,
            api_key: config.secret(provider).or_else(|| keys.get(provider)),
            auto_detected: false,
        };
    }

    if let Some((provider, key)) = registry::auto_detect(|id| config.secret(id)) {
        return ProviderSelection {
            provider,
            api_key: Some(key),
            auto_detected: true,
        };
    }

    let provider = config
        .default_provider
        .or_else(|| keys.last_provider())
        .unwrap_or(ProviderId::ALL[0]);
    ProviderSelection {
        provider,
        api_key: keys.get(provider),
        auto_detected: false,
    }
}
