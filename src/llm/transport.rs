// ABOUTME: Shared HTTP send and error normalization for LLM provider adapters
// ABOUTME: Maps transport failures, timeouts and non-2xx responses to upstream provider errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error, warn};

use boris_core::errors::AppError;

/// Longest slice of a non-JSON error body copied into an error message
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Error envelope shared by the `OpenAI`, Anthropic and Gemini APIs
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Send one request and return the raw body of a successful response
///
/// Exactly one attempt is made. Every failure becomes an
/// `UPSTREAM_PROVIDER_ERROR` tagged with `provider`.
pub(super) async fn send(provider: &'static str, request: RequestBuilder) -> Result<String, AppError> {
    let response = request
        .send()
        .await
        .map_err(|e| transport_error(provider, e))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| transport_error(provider, e))?;

    if !status.is_success() {
        let detail = extract_error_message(&body);
        error!(provider, status = %status, detail = %detail, "LLM provider returned an error");
        return Err(AppError::upstream(
            provider,
            Some(status.as_u16()),
            format!("HTTP {status}: {detail}"),
        ));
    }

    debug!(provider, bytes = body.len(), "LLM provider responded");
    Ok(body)
}

/// Normalize a reqwest failure; the URL is stripped since Gemini keys travel in the query
fn transport_error(provider: &'static str, error: reqwest::Error) -> AppError {
    let error = error.without_url();
    let reason = if error.is_timeout() {
        "request timed out"
    } else if error.is_connect() {
        "connection failed"
    } else {
        "request failed"
    };
    warn!(provider, reason, error = %error, "LLM provider call failed");
    AppError::upstream(
        provider,
        error.status().map(|s| s.as_u16()),
        format!("{reason}: {error}"),
    )
}

/// Pull a readable message out of an error body
pub(super) fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body).map_or_else(
        |_| body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        |envelope| envelope.error.message,
    )
}

/// Parse a successful body, treating malformed JSON as an upstream failure
pub(super) fn parse_body<T: DeserializeOwned>(
    provider: &'static str,
    body: &str,
) -> Result<T, AppError> {
    serde_json::from_str(body).map_err(|e| {
        error!(provider, error = %e, "Failed to parse LLM provider response");
        AppError::upstream(provider, None, format!("unparseable response: {e}"))
    })
}

/// Reject a missing or blank reply instead of passing filler text on
pub(super) fn require_reply(provider: &'static str, reply: Option<String>) -> Result<String, AppError> {
    match reply {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(AppError::upstream(provider, None, "response contained no reply text")),
    }
}
