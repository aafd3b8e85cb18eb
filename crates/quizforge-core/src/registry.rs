//! Static registry of supported AI backends.
//!
//! The table order is the auto-detection priority: free, fast tiers first,
//! paid tiers last.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// Identifier of a registered provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Groq,
    Gemini,
    OpenAi,
}

impl ProviderId {
    /// All providers in auto-detection priority order.
    pub const ALL: [ProviderId; 3] = [ProviderId::Groq, ProviderId::Gemini, ProviderId::OpenAi];

    pub fn as_str(self) -> &'static str {
        match self {
            ProviderId::Groq => "groq",
            ProviderId::Gemini => "gemini",
            ProviderId::OpenAi => "openai",
        }
    }

    /// The descriptor for this provider.
    pub fn descriptor(self) -> &'static ProviderDescriptor {
        match self {
            ProviderId::Groq => &PROVIDERS[0],
            ProviderId::Gemini => &PROVIDERS[1],
            ProviderId::OpenAi => &PROVIDERS[2],
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "groq" => Ok(ProviderId::Groq),
            "gemini" => Ok(ProviderId::Gemini),
            "openai" => Ok(ProviderId::OpenAi),
            other => Err(RegistryError::UnknownProvider(other.to_string())),
        }
    }
}

/// Request/response shape spoken by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiFamily {
    /// `messages` in, `choices[0].message.content` out, bearer auth.
    ChatCompletion,
    /// `contents` in, `candidates[0].content.parts[0].text` out, key in query.
    Generation,
}

impl ApiFamily {
    /// Prefix of the generic error message, e.g. "API error 500".
    pub fn error_label(self) -> &'static str {
        match self {
            ApiFamily::ChatCompletion => "API",
            ApiFamily::Generation => "Gemini",
        }
    }
}

/// Static description of a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderDescriptor {
    pub id: ProviderId,
    pub display_name: &'static str,
    pub endpoint_url: &'static str,
    pub model_id: &'static str,
    pub docs_url: &'static str,
    pub family: ApiFamily,
    pub badge: &'static str,
}

/// Registered providers, in auto-detection priority order.
pub static PROVIDERS: [ProviderDescriptor; 3] = [
    ProviderDescriptor {
        id: ProviderId::Groq,
        display_name: "Groq (Llama 3)",
        endpoint_url: "https://api.groq.com/openai/v1/chat/completions",
        model_id: "llama3-8b-8192",
        docs_url: "https://console.groq.com/keys",
        family: ApiFamily::ChatCompletion,
        badge: "Free & Fast",
    },
    ProviderDescriptor {
        id: ProviderId::Gemini,
        display_name: "Google Gemini",
        endpoint_url: "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent",
        model_id: "gemini-2.0-flash",
        docs_url: "https://aistudio.google.com/app/apikey",
        family: ApiFamily::Generation,
        badge: "Free Tier",
    },
    ProviderDescriptor {
        id: ProviderId::OpenAi,
        display_name: "OpenAI GPT-4o mini",
        endpoint_url: "https://api.openai.com/v1/chat/completions",
        model_id: "gpt-4o-mini",
        docs_url: "https://platform.openai.com/api-keys",
        family: ApiFamily::ChatCompletion,
        badge: "Paid",
    },
];

/// Look up a provider by its string id.
pub fn lookup(id: &str) -> Result<&'static ProviderDescriptor, RegistryError> {
    id.parse::<ProviderId>().map(ProviderId::descriptor)
}

/// Pick the first provider, in priority order, that has a non-blank secret.
///
/// `secret` is asked once per provider until one answers.
pub fn auto_detect<F>(mut secret: F) -> Option<(ProviderId, String)>
where
    F: FnMut(ProviderId) -> Option<String>,
{
    ProviderId::ALL.into_iter().find_map(|id| {
        secret(id)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .map(|k| (id, k))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn lookup_known_and_unknown() {
        let d = lookup("Gemini").unwrap();
        assert_eq!(d.id, ProviderId::Gemini);
        assert_eq!(d.family, ApiFamily::Generation);
        assert_eq!(
            lookup("cohere"),
            Err(RegistryError::UnknownProvider("cohere".into()))
        );
    }

    #[test]
    fn descriptor_table_matches_ids() {
        for id in ProviderId::ALL {
            assert_eq!(id.descriptor().id, id);
        }
    }

    #[test]
    fn auto_detect_prefers_earlier_providers() {
        let secrets: HashMap<ProviderId, String> = [
            (ProviderId::OpenAi, "sk-paid".to_string()),
            (ProviderId::Gemini, "AIza-free".to_string()),
        ]
        .into_iter()
        .collect();

        let found = auto_detect(|id| secrets.get(&id).cloned());
        assert_eq!(found, Some((ProviderId::Gemini, "AIza-free".into())));
    }

    #[test]
    fn auto_detect_skips_blank_secrets() {
        let found = auto_detect(|id| match id {
            ProviderId::Groq => Some("  ".into()),
            ProviderId::Gemini => None,
            ProviderId::OpenAi => Some("sk-1".into()),
        });
        assert_eq!(found, Some((ProviderId::OpenAi, "sk-1".into())));
        assert_eq!(auto_detect(|_| None), None);
    }
}
