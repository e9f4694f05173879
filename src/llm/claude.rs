// ABOUTME: Anthropic Claude messages API adapter for the coaching gateway
// ABOUTME: Sends the persona as the top-level system field and the user content as one message
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

//! # Claude Provider
//!
//! `POST {base}/v1/messages` authenticated with `x-api-key` and pinned to
//! `anthropic-version: 2023-06-01`. The reply is `content[0].text`.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::provider::ProviderSettings;
use super::transport;
use super::{ChatRequest, ChatResponse, LlmProvider, TokenUsage};
use boris_core::errors::AppError;

const PROVIDER_NAME: &str = "claude";

/// Default model
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";

/// Default API host
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

const MESSAGES_PATH: &str = "v1/messages";

/// Pinned Anthropic API version header value
const ANTHROPIC_VERSION: &str = "2023-06-01";

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ClaudeRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<ClaudeMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ClaudeMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ClaudeResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Anthropic Claude adapter
pub struct ClaudeProvider {
    settings: ProviderSettings,
    client: Client,
}

impl ClaudeProvider {
    /// Create an adapter sharing `client`
    #[must_use]
    pub const fn new(settings: ProviderSettings, client: Client) -> Self {
        Self { settings, client }
    }

    /// Wire body for `request`; the messages API takes no temperature here
    fn build_request<'a>(&'a self, request: &'a ChatRequest) -> ClaudeRequest<'a> {
        ClaudeRequest {
            model: &self.settings.model,
            max_tokens: self.settings.max_tokens,
            system: request.system_prompt(),
            messages: request
                .conversation()
                .map(|m| ClaudeMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
        }
    }

    fn parse_response(
        body: &str,
    ) -> Result<(String, Option<TokenUsage>), AppError> {
        let response: ClaudeResponse = transport::parse_body(PROVIDER_NAME, body)?;
        let usage = response.usage.map(|u| TokenUsage {
            prompt_tokens: u.input_tokens,
            completion_tokens: u.output_tokens,
            total_tokens: u.input_tokens.saturating_add(u.output_tokens),
        });
        let reply = response.content.into_iter().next().and_then(|b| b.text);

        Ok((transport::require_reply(PROVIDER_NAME, reply)?, usage))
    }
}

#[async_trait]
impl LlmProvider for ClaudeProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn default_model(&self) -> &str {
        &self.settings.model
    }

    #[instrument(skip(self, request), fields(provider = PROVIDER_NAME, model = %self.settings.model))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let body = self.build_request(request);
        let model = body.model.to_owned();

        debug!("Sending request to Anthropic API");
        let http = self
            .client
            .post(self.settings.endpoint(MESSAGES_PATH))
            .header("x-api-key", &self.settings.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
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

impl Debug for ClaudeProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ClaudeProvider")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;
    use crate::llm::ChatMessage;
    use boris_core::errors::ErrorCode;

    fn provider() -> ClaudeProvider {
        ClaudeProvider::new(
            ProviderSettings {
                api_key: "sk-ant-test".to_owned(),
                base_url: DEFAULT_BASE_URL.to_owned(),
                model: DEFAULT_MODEL.to_owned(),
                max_tokens: 2000,
                temperature: 0.7,
            },
            Client::new(),
        )
    }

    #[test]
    fn test_request_body_carries_system_separately() {
        let provider = provider();
        let request = ChatRequest::new(vec![
            ChatMessage::system("Du är Boris."),
            ChatMessage::user("Kontext: {}\n\nFråga: Hej"),
        ]);

        let body = serde_json::to_value(provider.build_request(&request)).unwrap();

        assert_eq!(
            body,
            json!({
                "model": "claude-3-5-sonnet-20241022",
                "max_tokens": 2000,
                "system": "Du är Boris.",
                "messages": [{"role": "user", "content": "Kontext: {}\n\nFråga: Hej"}]
            })
        );
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_parse_response_reads_first_block() {
        let body = r#"{
            "content": [{"type": "text", "text": "Boris tycker att du ska sova mer."}],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 30, "output_tokens": 9}
        }"#;

        let (reply, usage) = ClaudeProvider::parse_response(body).unwrap();

        assert_eq!(reply, "Boris tycker att du ska sova mer.");
        assert_eq!(usage.unwrap().total_tokens, 39);
    }

    #[test]
    fn test_parse_response_with_empty_content_fails() {
        let err = ClaudeProvider::parse_response(r#"{"content": []}"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::UpstreamProviderError);
    }
}
