// ABOUTME: Coaching gateway that turns a user question into one persona-guided LLM call
// ABOUTME: Selects the provider per request, renders health context and normalizes failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

//! # Coaching Gateway
//!
//! [`CoachingGateway::get_advice`] validates the question, picks a vendor with
//! [`select_provider`], sends the persona and the rendered user content as
//! separate messages, and returns the reply together with the vendor used.
//! Each call is exactly one upstream request.

use std::time::Instant;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use boris_core::errors::{AppError, AppResult};
use boris_core::models::HealthContext;

use crate::config::LlmConfig;
use crate::llm::prompts::render_user_content;
use crate::llm::{
    select_provider, ChatMessage, ChatProvider, ChatRequest, LlmProvider, Persona, ProviderKind,
    SelectedProvider,
};
use crate::logging::AppLogger;

/// A user's question plus optional health context
#[derive(Debug, Clone, PartialEq)]
pub struct CoachingRequest {
    /// Caller identity, used for logging only
    pub user_id: String,
    /// Free-text question
    pub message: String,
    /// Latest health numbers the coach may refer to
    pub context: Option<HealthContext>,
}

/// Reply from the coach
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachingResponse {
    /// Vendor that produced the reply
    pub provider_used: ProviderKind,
    /// Reply text exactly as returned upstream
    pub reply_text: String,
    /// When the reply was received
    pub produced_at: DateTime<Utc>,
}

/// Stateless gateway to the configured LLM vendors
#[derive(Debug, Clone)]
pub struct CoachingGateway {
    config: LlmConfig,
    persona: Persona,
    client: Client,
}

impl CoachingGateway {
    /// Build a gateway with a shared HTTP client bounded by the configured timeouts
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: LlmConfig, persona: Persona) -> AppResult<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::config(format!("Failed to build LLM HTTP client: {e}")))?;

        Ok(Self {
            config,
            persona,
            client,
        })
    }

    /// Provider the next request would use, if any
    #[must_use]
    pub fn selected_provider(&self) -> Option<ProviderKind> {
        select_provider(&self.config.credentials).map(|selected| selected.kind)
    }

    /// Ask the coach
    ///
    /// # Errors
    ///
    /// - `INVALID_INPUT` when the message is empty or whitespace
    /// - `NO_PROVIDER_CONFIGURED` when no credential qualifies
    /// - `UPSTREAM_PROVIDER_ERROR` for any failure of the single upstream call
    #[instrument(skip(self, request), fields(user.id = %request.user_id))]
    pub async fn get_advice(&self, request: CoachingRequest) -> AppResult<CoachingResponse> {
        if request.message.trim().is_empty() {
            return Err(AppError::invalid_input("message must not be empty"));
        }

        let SelectedProvider { kind, api_key } =
            select_provider(&self.config.credentials).ok_or_else(AppError::no_provider_configured)?;

        let user_content = render_user_content(&request.message, request.context.as_ref())?;
        debug!(
            provider = %kind,
            has_context = request.context.as_ref().is_some_and(|c| !c.is_empty()),
            "Dispatching coaching request"
        );

        let provider = ChatProvider::for_kind(
            kind,
            self.config.settings_for(kind, &api_key),
            self.client.clone(),
        );
        let chat = ChatRequest::new(vec![
            ChatMessage::system(self.persona.system_prompt()),
            ChatMessage::user(user_content),
        ]);

        let started = Instant::now();
        let result = provider.complete(&chat).await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        match result {
            Ok(response) => {
                AppLogger::log_coaching_call(
                    &request.user_id,
                    kind.as_str(),
                    &response.model,
                    elapsed_ms,
                    response.usage.map(|usage| usage.total_tokens),
                );
                Ok(CoachingResponse {
                    provider_used: kind,
                    reply_text: response.content,
                    produced_at: Utc::now(),
                })
            }
            Err(error) => {
                AppLogger::log_coaching_failure(
                    &request.user_id,
                    kind.as_str(),
                    provider.default_model(),
                    elapsed_ms,
                    error.code.as_str(),
                );
                Err(error)
            }
        }
    }
}
