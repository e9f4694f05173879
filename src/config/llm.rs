// ABOUTME: LLM credential and endpoint configuration loaded from environment variables
// ABOUTME: Holds per-vendor keys, models, base URLs, generation limits and HTTP timeouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use boris_core::errors::{AppError, AppResult};

use super::env_parse_or;
use crate::llm::{
    ProviderKind, ProviderSettings, CLAUDE_DEFAULT_BASE_URL, CLAUDE_DEFAULT_MODEL,
    GEMINI_DEFAULT_BASE_URL, GEMINI_DEFAULT_MODEL, OPENAI_DEFAULT_BASE_URL, OPENAI_DEFAULT_MODEL,
};

/// Environment variable holding the `OpenAI` key
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Environment variable holding the Anthropic key
pub const ANTHROPIC_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
/// Environment variable holding the Gemini key
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default completion cap
pub const DEFAULT_MAX_TOKENS: u32 = 2000;
/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
/// Default TCP connect timeout
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default total request timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Raw vendor credentials; empty values are treated as absent
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LlmCredentials {
    /// `OpenAI` key
    pub openai: Option<String>,
    /// Anthropic key
    pub anthropic: Option<String>,
    /// Gemini key
    pub gemini: Option<String>,
}

impl LlmCredentials {
    /// Read the three credential variables
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            openai: non_empty_env(OPENAI_API_KEY_ENV),
            anthropic: non_empty_env(ANTHROPIC_API_KEY_ENV),
            gemini: non_empty_env(GEMINI_API_KEY_ENV),
        }
    }

    /// Whether any credential is set at all
    #[must_use]
    pub const fn any_present(&self) -> bool {
        self.openai.is_some() || self.anthropic.is_some() || self.gemini.is_some()
    }
}

impl Debug for LlmCredentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("LlmCredentials")
            .field("openai", &redact(&self.openai))
            .field("anthropic", &redact(&self.anthropic))
            .field("gemini", &redact(&self.gemini))
            .finish()
    }
}

/// Model and host for one vendor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoint {
    /// Model identifier
    pub model: String,
    /// Scheme and host, without the versioned path
    pub base_url: String,
}

impl ProviderEndpoint {
    fn from_env(model_var: &str, model: &str, base_url_var: &str, base_url: &str) -> Self {
        Self {
            model: non_empty_env(model_var).unwrap_or_else(|| model.to_owned()),
            base_url: non_empty_env(base_url_var).unwrap_or_else(|| base_url.to_owned()),
        }
    }
}

/// Everything the coaching gateway needs to reach a vendor
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Vendor credentials
    pub credentials: LlmCredentials,
    /// `OpenAI` model and host
    pub openai: ProviderEndpoint,
    /// Anthropic model and host
    pub claude: ProviderEndpoint,
    /// Gemini model and host
    pub gemini: ProviderEndpoint,
    /// Completion cap
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// TCP connect timeout
    pub connect_timeout: Duration,
    /// Total request timeout
    pub request_timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            credentials: LlmCredentials::default(),
            openai: ProviderEndpoint {
                model: OPENAI_DEFAULT_MODEL.to_owned(),
                base_url: OPENAI_DEFAULT_BASE_URL.to_owned(),
            },
            claude: ProviderEndpoint {
                model: CLAUDE_DEFAULT_MODEL.to_owned(),
                base_url: CLAUDE_DEFAULT_BASE_URL.to_owned(),
            },
            gemini: ProviderEndpoint {
                model: GEMINI_DEFAULT_MODEL.to_owned(),
                base_url: GEMINI_DEFAULT_BASE_URL.to_owned(),
            },
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl LlmConfig {
    /// Load LLM configuration from environment
    ///
    /// Unparseable numbers fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a timeout is zero.
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();

        let connect_secs = env_parse_or("LLM_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS);
        let request_secs = env_parse_or("LLM_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS);
        if connect_secs == 0 || request_secs == 0 {
            return Err(AppError::config(
                "LLM_CONNECT_TIMEOUT_SECS and LLM_REQUEST_TIMEOUT_SECS must be greater than zero",
            ));
        }

        Ok(Self {
            credentials: LlmCredentials::from_env(),
            openai: ProviderEndpoint::from_env(
                "OPENAI_MODEL",
                &defaults.openai.model,
                "OPENAI_BASE_URL",
                &defaults.openai.base_url,
            ),
            claude: ProviderEndpoint::from_env(
                "ANTHROPIC_MODEL",
                &defaults.claude.model,
                "ANTHROPIC_BASE_URL",
                &defaults.claude.base_url,
            ),
            gemini: ProviderEndpoint::from_env(
                "GEMINI_MODEL",
                &defaults.gemini.model,
                "GEMINI_BASE_URL",
                &defaults.gemini.base_url,
            ),
            max_tokens: env_parse_or("LLM_MAX_TOKENS", DEFAULT_MAX_TOKENS),
            temperature: env_parse_or("LLM_TEMPERATURE", DEFAULT_TEMPERATURE),
            connect_timeout: Duration::from_secs(connect_secs),
            request_timeout: Duration::from_secs(request_secs),
        })
    }

    /// Endpoint configured for `kind`
    #[must_use]
    pub const fn endpoint(&self, kind: ProviderKind) -> &ProviderEndpoint {
        match kind {
            ProviderKind::OpenAi => &self.openai,
            ProviderKind::Claude => &self.claude,
            ProviderKind::Gemini => &self.gemini,
        }
    }

    /// Adapter settings for `kind` authenticated with `api_key`
    #[must_use]
    pub fn settings_for(&self, kind: ProviderKind, api_key: &str) -> ProviderSettings {
        let endpoint = self.endpoint(kind);
        ProviderSettings {
            api_key: api_key.to_owned(),
            base_url: endpoint.base_url.clone(),
            model: endpoint.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

/// Read a variable, treating unset and empty the same
fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
