// ABOUTME: Google Gemini generateContent adapter for the coaching gateway
// ABOUTME: Sends persona and user content as two text parts of a single content entry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

//! # Gemini Provider
//!
//! `POST {base}/v1beta/models/{model}:generateContent?key={key}`. Gemini has
//! no separate system role on this endpoint, so the persona travels as the
//! first text part and the user content as the second.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::provider::ProviderSettings;
use super::transport;
use super::{ChatRequest, ChatResponse, LlmProvider, MessageRole, TokenUsage};
use boris_core::errors::AppError;

const PROVIDER_NAME: &str = "gemini";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-pro";

/// Default API host
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount")]
    prompt: Option<u32>,
    #[serde(rename = "candidatesTokenCount")]
    candidates: Option<u32>,
    #[serde(rename = "totalTokenCount")]
    total: Option<u32>,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini adapter
pub struct GeminiProvider {
    settings: ProviderSettings,
    client: Client,
}

impl GeminiProvider {
    /// Create an adapter sharing `client`
    #[must_use]
    pub const fn new(settings: ProviderSettings, client: Client) -> Self {
        Self { settings, client }
    }

    /// Wire body: every message becomes one text part, system parts first
    fn build_request(request: &ChatRequest) -> GeminiRequest<'_> {
        let system = request
            .messages
            .iter()
            .filter(|m| m.role == MessageRole::System);
        let parts = system
            .chain(request.conversation())
            .map(|m| TextPart { text: &m.content })
            .collect();

        GeminiRequest {
            contents: vec![GeminiContent { parts }],
        }
    }

    fn url(&self, model: &str) -> String {
        self.settings
            .endpoint(&format!("v1beta/models/{model}:generateContent"))
    }

    fn parse_response(
        body: &str,
    ) -> Result<(String, Option<TokenUsage>), AppError> {
        let response: GeminiResponse = transport::parse_body(PROVIDER_NAME, body)?;
        let usage = response.usage_metadata.map(|u| TokenUsage {
            prompt_tokens: u.prompt.unwrap_or(0),
            completion_tokens: u.candidates.unwrap_or(0),
            total_tokens: u.total.unwrap_or(0),
        });

        let reply = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text);

        Ok((transport::require_reply(PROVIDER_NAME, reply)?, usage))
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn default_model(&self) -> &str {
        &self.settings.model
    }

    #[instrument(skip(self, request), fields(provider = PROVIDER_NAME, model = %self.settings.model))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let model = self.settings.model.clone();
        let body = Self::build_request(request);

        debug!("Sending request to Gemini API");
        let http = self
            .client
            .post(self.url(&model))
            .query(&[("key", self.settings.api_key.as_str())])
            .json(&body);

        let raw = transport::send(PROVIDER_NAME, http).await?;
        let (content, usage) = Self::parse_response(&raw)?;

        Ok(ChatResponse {
            content,
            model,
            usage,
        })
    }
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
