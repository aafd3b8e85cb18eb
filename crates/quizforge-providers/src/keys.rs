//! API key storage.
//!
//! One slot per provider plus the last provider the user picked.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizforge_core::registry::ProviderId;
use quizforge_core::traits::KeyStore;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredKeys {
    #[serde(default)]
    keys: BTreeMap<ProviderId, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_provider: Option<ProviderId>,
}

impl StoredKeys {
    fn get(&self, provider: ProviderId) -> Option<String> {
        self.keys
            .get(&provider)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }
}

fn lock(state: &Mutex<StoredKeys>) -> MutexGuard<'_, StoredKeys> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Keys persisted as a JSON file.
pub struct FileKeyStore {
    path: PathBuf,
    state: Mutex<StoredKeys>,
}

impl FileKeyStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read key file: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("failed to parse key file: {}", path.display()))?
        } else {
            StoredKeys::default()
        };
        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, state: &StoredKeys) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(state)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write key file: {}", self.path.display()))
    }
}

impl KeyStore for FileKeyStore {
    fn get(&self, provider: ProviderId) -> Option<String> {
        lock(&self.state).get(provider)
    }

    fn set(&self, provider: ProviderId, key: &str) -> Result<()> {
        let mut state = lock(&self.state);
        state.keys.insert(provider, key.trim().to_string());
        self.save(&state)?;
        tracing::info!("stored API key for {provider}");
        Ok(())
    }

    fn last_provider(&self) -> Option<ProviderId> {
        lock(&self.state).last_provider
    }

    fn set_last_provider(&self, provider: ProviderId) -> Result<()> {
        let mut state = lock(&self.state);
        state.last_provider = Some(provider);
        self.save(&state)
    }
}

/// In-memory keys, for tests and one-off runs.
#[derive(Default)]
pub struct MemoryKeyStore {
    state: Mutex<StoredKeys>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyStore for MemoryKeyStore {
    fn get(&self, provider: ProviderId) -> Option<String> {
        lock(&self.state).get(provider)
    }

    fn set(&self, provider: ProviderId, key: &str) -> Result<()> {
        lock(&self.state)
            .keys
            .insert(provider, key.trim().to_string());
        Ok(())
    }

    fn last_provider(&self) -> Option<ProviderId> {
        lock(&self.state).last_provider
    }

    fn set_last_provider(&self, provider: ProviderId) -> Result<()> {
        lock(&self.state).last_provider = Some(provider);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("keys.json");

        let store = FileKeyStore::open(&path).unwrap();
        assert_eq!(store.get(ProviderId::Groq), None);
        store.set(ProviderId::Groq, "  gsk-123 ").unwrap();
        store.set_last_provider(ProviderId::Groq).unwrap();

        let reopened = FileKeyStore::open(&path).unwrap();
        assert_eq!(reopened.get(ProviderId::Groq).as_deref(), Some("gsk-123"));
        assert_eq!(reopened.get(ProviderId::OpenAi), None);
        assert_eq!(reopened.last_provider(), Some(ProviderId::Groq));

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"groq\""));
        assert!(raw.contains("lastProvider"));
    }

    #[test]
    fn blank_key_reads_as_missing() {
        let store = MemoryKeyStore::new();
        store.set(ProviderId::Gemini, "   ").unwrap();
        assert_eq!(store.get(ProviderId::Gemini), None);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys.json");
        std::fs::write(&path, "not json").unwrap();
        let err = FileKeyStore::open(&path).err().unwrap();
        assert!(err.to_string().contains("failed to parse key file"));
    }
}
