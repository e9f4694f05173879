// ABOUTME: OpenAI chat completions adapter for the coaching gateway
// ABOUTME: Sends persona and user content as system/user messages with bearer authentication
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

//! # `OpenAI` Provider
//!
//! `POST {base}/v1/chat/completions`, reply taken from
//! `choices[0].message.content`.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::provider::ProviderSettings;
use super::transport;
use super::{ChatRequest, ChatResponse, LlmProvider, TokenUsage};
use boris_core::errors::AppError;

/// Provider identifier used in logs and error details
const PROVIDER_NAME: &str = "openai";

/// Default model
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default API host
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Chat completions path
const COMPLETIONS_PATH: &str = "v1/chat/completions";

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAiMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct OpenAiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// `OpenAI` chat completions adapter
pub struct OpenAiProvider {
    settings: ProviderSettings,
    client: Client,
}

impl OpenAiProvider {
    /// Create an adapter sharing `client`
    #[must_use]
    pub const fn new(settings: ProviderSettings, client: Client) -> Self {
        Self { settings, client }
    }

    /// Wire body for `request`
    fn build_request<'a>(&'a self, request: &'a ChatRequest) -> OpenAiRequest<'a> {
        let messages = request
            .messages
            .iter()
            .map(|m| OpenAiMessage {
                role: m.role.as_str(),
                content: &m.content,
            })
            .collect();

        OpenAiRequest {
            model: &self.settings.model,
            messages,
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        }
    }

    /// Extract reply text and token usage
    fn parse_response(
        body: &str,
    ) -> Result<(String, Option<TokenUsage>), AppError> {
        let response: OpenAiResponse = transport::parse_body(PROVIDER_NAME, body)?;
        let usage = response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        let reply = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content);

        Ok((transport::require_reply(PROVIDER_NAME, reply)?, usage))
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
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

        debug!("Sending request to OpenAI API");
        let http = self
            .client
            .post(self.settings.endpoint(COMPLETIONS_PATH))
            .bearer_auth(&self.settings.api_key)
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

impl Debug for OpenAiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("OpenAiProvider")
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

    fn provider() -> OpenAiProvider {
        OpenAiProvider::new(
            ProviderSettings {
                api_key: "sk-proj-test".to_owned(),
                base_url: DEFAULT_BASE_URL.to_owned(),
                model: DEFAULT_MODEL.to_owned(),
                max_tokens: 2000,
                temperature: 0.7,
            },
            Client::new(),
        )
    }

    #[test]
    fn test_request_body_shape() {
        let provider = provider();
        let request = ChatRequest::new(vec![
            ChatMessage::system("Du är Boris."),
            ChatMessage::user("Hej!"),
        ]);

        let body = serde_json::to_value(provider.build_request(&request)).unwrap();

        assert_eq!(
            body,
            json!({
                "model": "gpt-4o-mini",
                "messages": [
                    {"role": "system", "content": "Du är Boris."},
                    {"role": "user", "content": "Hej!"}
                ],
                "max_tokens": 2000,
                "temperature": 0.7_f32
            })
        );
    }

    #[test]
    fn test_parse_response_reads_first_choice() {
        let body = r#"{
            "choices": [{"message": {"role": "assistant", "content": "Boris säger: gå en promenad!"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 40, "completion_tokens": 8, "total_tokens": 48}
        }"#;

        let (reply, usage) = OpenAiProvider::parse_response(body).unwrap();

        assert_eq!(reply, "Boris säger: gå en promenad!");
        assert_eq!(usage.unwrap().total_tokens, 48);
    }

    #[test]
    fn test_parse_response_without_choices_is_upstream_error() {
        let err = OpenAiProvider::parse_response(r#"{"choices": []}"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::UpstreamProviderError);
    }
}
