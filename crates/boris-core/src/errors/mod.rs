// ABOUTME: Unified error handling with standard error codes for the Boris coaching service
// ABOUTME: Defines ErrorCode, AppError and the camelCase error body returned to clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

//! # Unified Error Handling
//!
//! Every fallible operation in the service returns [`AppResult`]. The
//! [`ErrorCode`] carried by an [`AppError`] decides the HTTP status and the
//! `errorCode` string clients see, so the gateway taxonomy
//! (no provider configured, upstream provider failure, validation) maps onto
//! stable wire codes.

#[cfg(feature = "http-response")]
mod http;

use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// Standard error codes used throughout the application
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication (1000-1999)
    /// Caller identity is missing
    #[serde(rename = "AUTH_REQUIRED")]
    AuthRequired = 1000,

    // Validation (3000-3999)
    /// Request body or parameter failed validation
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// Numeric value outside its accepted range
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 3003,

    // Resource Management (4000-4999)
    /// Requested resource does not exist for this user
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,

    // External Services (5000-5999)
    /// Selected LLM provider rejected or failed the call
    #[serde(rename = "UPSTREAM_PROVIDER_ERROR")]
    UpstreamProviderError = 5000,
    /// No usable LLM credential is configured
    #[serde(rename = "NO_PROVIDER_CONFIGURED")]
    NoProviderConfigured = 5001,

    // Configuration (6000-6999)
    /// Configuration value could not be parsed or loaded
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Persistence layer failure
    #[serde(rename = "DATABASE_ERROR")]
    DatabaseError = 9001,
    /// Persistence layer is not reachable
    #[serde(rename = "STORAGE_UNAVAILABLE")]
    StorageUnavailable = 9002,
    /// Data could not be serialized or deserialized
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidInput | Self::ValueOutOfRange => 400,
            Self::AuthRequired => 401,
            Self::ResourceNotFound => 404,
            Self::UpstreamProviderError => 502,
            Self::NoProviderConfigured | Self::StorageUnavailable => 503,
            Self::ConfigInvalid
            | Self::InternalError
            | Self::DatabaseError
            | Self::SerializationError => 500,
        }
    }

    /// Stable wire name, identical to the serialized form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AuthRequired => "AUTH_REQUIRED",
            Self::InvalidInput => "INVALID_INPUT",
            Self::ValueOutOfRange => "VALUE_OUT_OF_RANGE",
            Self::ResourceNotFound => "RESOURCE_NOT_FOUND",
            Self::UpstreamProviderError => "UPSTREAM_PROVIDER_ERROR",
            Self::NoProviderConfigured => "NO_PROVIDER_CONFIGURED",
            Self::ConfigInvalid => "CONFIG_INVALID",
            Self::InternalError => "INTERNAL_ERROR",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::StorageUnavailable => "STORAGE_UNAVAILABLE",
            Self::SerializationError => "SERIALIZATION_ERROR",
        }
    }

    /// Get a user-facing description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::AuthRequired => "Authentication is required to access this resource",
            Self::InvalidInput => "The provided input is invalid",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::UpstreamProviderError => "The coach is unavailable right now, try again",
            Self::NoProviderConfigured => "Coaching unavailable, configure an AI provider",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal server error occurred",
            Self::DatabaseError => "Database operation failed",
            Self::StorageUnavailable => "Storage is temporarily unavailable",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Structured details surfaced to clients (null when absent)
    pub details: Value,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: Value::Null,
            source: None,
        }
    }

    /// Attach structured details to the error
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Attach a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors for common errors
impl AppError {
    /// Caller identity missing
    #[must_use]
    pub fn auth_required() -> Self {
        Self::new(ErrorCode::AuthRequired, "Authentication required")
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Numeric field outside its accepted range
    pub fn out_of_range(field: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValueOutOfRange, message).with_details(json!({ "field": field }))
    }

    /// Resource not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// No usable LLM credential
    #[must_use]
    pub fn no_provider_configured() -> Self {
        Self::new(
            ErrorCode::NoProviderConfigured,
            "No AI provider configured. Set OPENAI_API_KEY, ANTHROPIC_API_KEY or GEMINI_API_KEY",
        )
        .with_details(json!({ "providerUsed": "none" }))
    }

    /// Selected LLM provider failed; `status` is the upstream HTTP status when one was received
    pub fn upstream(provider: &str, status: Option<u16>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(
            ErrorCode::UpstreamProviderError,
            format!("{provider}: {message}"),
        )
        .with_details(json!({ "provider": provider, "status": status }))
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Storage unreachable
    pub fn storage_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageUnavailable, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }
}

#[cfg(feature = "database-errors")]
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        let message = error.to_string();
        Self::database(message).with_source(error)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        let message = error.to_string();
        Self::serialization(message).with_source(error)
    }
}

/// HTTP error response body
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Stable machine-readable code
    pub error_code: ErrorCode,
    /// Human-readable message
    pub error_message: String,
    /// Optional structured details
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub details: Value,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error_code: error.code,
            error_message: error.message,
            details: error.details,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_error_code_http_status() {
        assert_eq!(ErrorCode::NoProviderConfigured.http_status(), 503);
        assert_eq!(ErrorCode::UpstreamProviderError.http_status(), 502);
        assert_eq!(ErrorCode::InvalidInput.http_status(), 400);
        assert_eq!(ErrorCode::AuthRequired.http_status(), 401);
        assert_eq!(ErrorCode::DatabaseError.http_status(), 500);
    }

    #[test]
    fn test_upstream_error_carries_provider_details() {
        let error = AppError::upstream("claude", Some(529), "overloaded");

        assert_eq!(error.code, ErrorCode::UpstreamProviderError);
        assert_eq!(error.details["provider"], "claude");
        assert_eq!(error.details["status"], 529);
        assert!(error.message.contains("overloaded"));
    }

    #[test]
    fn test_error_response_serialization() {
        let response = ErrorResponse::from(AppError::no_provider_configured());
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["errorCode"], "NO_PROVIDER_CONFIGURED");
        assert!(json["errorMessage"]
            .as_str()
            .unwrap()
            .contains("GEMINI_API_KEY"));
        assert_eq!(json["details"]["providerUsed"], "none");
    }

    #[test]
    fn test_error_response_omits_null_details() {
        let response = ErrorResponse::from(AppError::invalid_input("message is required"));
        let json = serde_json::to_value(&response).unwrap();

        assert!(json.get("details").is_none());
    }
}
