// ABOUTME: Ordered credential-prefix policy that picks the LLM provider for a coaching call
// ABOUTME: First matching rule wins: OpenAI sk-proj-, then Claude sk-ant-, then any Gemini key
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

//! # Provider Selection
//!
//! Selection is a pure function of the configured credentials, evaluated for
//! every request. The rules live in [`SELECTION_RULES`] in priority order so
//! the policy reads as data.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::config::LlmCredentials;

/// LLM vendor family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    /// `OpenAI` chat completions
    #[serde(rename = "openai")]
    OpenAi,
    /// Anthropic Claude
    #[serde(rename = "claude")]
    Claude,
    /// Google Gemini
    #[serde(rename = "gemini")]
    Gemini,
}

impl ProviderKind {
    /// Wire name, as reported in `providerUsed`
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Claude => "claude",
            Self::Gemini => "gemini",
        }
    }
}

impl Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the selection policy
pub struct SelectionRule {
    /// Provider chosen when the rule matches
    pub kind: ProviderKind,
    /// Which configured credential the rule inspects
    pub credential: fn(&LlmCredentials) -> Option<&str>,
    /// Whether the credential qualifies
    pub accepts: fn(&str) -> bool,
}

fn openai_key(credentials: &LlmCredentials) -> Option<&str> {
    credentials.openai.as_deref()
}

fn anthropic_key(credentials: &LlmCredentials) -> Option<&str> {
    credentials.anthropic.as_deref()
}

fn gemini_key(credentials: &LlmCredentials) -> Option<&str> {
    credentials.gemini.as_deref()
}

fn is_openai_project_key(key: &str) -> bool {
    key.starts_with("sk-proj-")
}

fn is_anthropic_key(key: &str) -> bool {
    key.starts_with("sk-ant-")
}

fn is_non_empty(key: &str) -> bool {
    !key.is_empty()
}

/// Selection policy in priority order
pub const SELECTION_RULES: [SelectionRule; 3] = [
    SelectionRule {
        kind: ProviderKind::OpenAi,
        credential: openai_key,
        accepts: is_openai_project_key,
    },
    SelectionRule {
        kind: ProviderKind::Claude,
        credential: anthropic_key,
        accepts: is_anthropic_key,
    },
    SelectionRule {
        kind: ProviderKind::Gemini,
        credential: gemini_key,
        accepts: is_non_empty,
    },
];

/// Outcome of a successful selection
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedProvider {
    /// Chosen vendor
    pub kind: ProviderKind,
    /// Credential that matched
    pub api_key: String,
}

impl fmt::Debug for SelectedProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedProvider")
            .field("kind", &self.kind)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Apply [`SELECTION_RULES`] to `credentials`; `None` means no provider is usable
#[must_use]
pub fn select_provider(credentials: &LlmCredentials) -> Option<SelectedProvider> {
    SELECTION_RULES.iter().find_map(|rule| {
        (rule.credential)(credentials)
            .filter(|key| (rule.accepts)(key))
            .map(|key| SelectedProvider {
                kind: rule.kind,
                api_key: key.to_owned(),
            })
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn credentials(
        openai: Option<&str>,
        anthropic: Option<&str>,
        gemini: Option<&str>,
    ) -> LlmCredentials {
        LlmCredentials {
            openai: openai.map(str::to_owned),
            anthropic: anthropic.map(str::to_owned),
            gemini: gemini.map(str::to_owned),
        }
    }

    #[test]
    fn test_openai_project_key_wins() {
        let selected =
            select_provider(&credentials(Some("sk-proj-abc"), Some("sk-ant-x"), Some("g")))
                .unwrap();
        assert_eq!(selected.kind, ProviderKind::OpenAi);
        assert_eq!(selected.api_key, "sk-proj-abc");
    }

    #[test]
    fn test_legacy_openai_key_falls_through_to_claude() {
        let selected =
            select_provider(&credentials(Some("sk-legacy"), Some("sk-ant-api03"), None)).unwrap();
        assert_eq!(selected.kind, ProviderKind::Claude);
    }

    #[test]
    fn test_malformed_anthropic_key_falls_through_to_gemini() {
        let selected =
            select_provider(&credentials(None, Some("ant-key"), Some("AIza123"))).unwrap();
        assert_eq!(selected.kind, ProviderKind::Gemini);
        assert_eq!(selected.api_key, "AIza123");
    }

    #[test]
    fn test_nothing_usable_selects_none() {
        assert!(select_provider(&credentials(None, None, None)).is_none());
        assert!(select_provider(&credentials(Some("sk-old"), Some("nope"), Some(""))).is_none());
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ProviderKind::OpenAi).unwrap(),
            "\"openai\""
        );
        assert_eq!(ProviderKind::Claude.to_string(), "claude");
    }

    #[test]
    fn test_debug_redacts_selected_key() {
        let selected = select_provider(&credentials(None, None, Some("secret"))).unwrap();
        assert!(!format!("{selected:?}").contains("secret"));
    }
}
