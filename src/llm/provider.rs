// ABOUTME: Tagged provider variant over the OpenAI, Claude and Gemini adapters
// ABOUTME: Builds the adapter chosen by the selector and dispatches the LlmProvider trait to it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

//! # Chat Provider
//!
//! [`ChatProvider`] wraps exactly one vendor adapter. The gateway builds one
//! per request from the selected [`ProviderKind`] and the shared HTTP client.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use reqwest::Client;

use super::{
    ChatRequest, ChatResponse, ClaudeProvider, GeminiProvider, LlmProvider, OpenAiProvider,
    ProviderKind,
};
use boris_core::errors::AppError;

/// Everything an adapter needs besides the HTTP client
#[derive(Clone)]
pub struct ProviderSettings {
    /// Vendor credential
    pub api_key: String,
    /// Scheme and host of the vendor API, without the versioned path
    pub base_url: String,
    /// Model used when the request does not name one
    pub model: String,
    /// Completion cap sent to vendors that accept one
    pub max_tokens: u32,
    /// Sampling temperature sent to vendors that accept one
    pub temperature: f32,
}

impl ProviderSettings {
    /// Join the base URL and an API path without doubling slashes
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Debug for ProviderSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ProviderSettings")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// One configured LLM adapter
pub enum ChatProvider {
    /// `OpenAI` chat completions
    OpenAi(OpenAiProvider),
    /// Anthropic messages API
    Claude(ClaudeProvider),
    /// Google Gemini `generateContent`
    Gemini(GeminiProvider),
}

impl ChatProvider {
    /// Build the adapter for `kind`
    #[must_use]
    pub fn for_kind(kind: ProviderKind, settings: ProviderSettings, client: Client) -> Self {
        match kind {
            ProviderKind::OpenAi => Self::OpenAi(OpenAiProvider::new(settings, client)),
            ProviderKind::Claude => Self::Claude(ClaudeProvider::new(settings, client)),
            ProviderKind::Gemini => Self::Gemini(GeminiProvider::new(settings, client)),
        }
    }

    /// Which vendor this adapter talks to
    #[must_use]
    pub const fn kind(&self) -> ProviderKind {
        match self {
            Self::OpenAi(_) => ProviderKind::OpenAi,
            Self::Claude(_) => ProviderKind::Claude,
            Self::Gemini(_) => ProviderKind::Gemini,
        }
    }

    fn inner(&self) -> &dyn LlmProvider {
        match self {
            Self::OpenAi(p) => p,
            Self::Claude(p) => p,
            Self::Gemini(p) => p,
        }
    }
}

#[async_trait]
impl LlmProvider for ChatProvider {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn default_model(&self) -> &str {
        self.inner().default_model()
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.inner().complete(request).await
    }
}

impl Debug for ChatProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ChatProvider")
            .field("kind", &self.kind())
            .field("model", &self.default_model())
            .finish_non_exhaustive()
    }
}
