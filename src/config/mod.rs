// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Handles environment-driven server, storage, identity and LLM provider settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI
//! Configuration module for the Boris coaching server
//!
//! - **Environment**: server configuration from environment variables
//! - **LLM**: vendor credentials, endpoints, limits and timeouts
//! - **Types**: shared enums such as [`Environment`]

use std::env;
use std::str::FromStr;

/// Environment and server configuration
pub mod environment;
/// LLM vendor configuration
pub mod llm;
/// Shared configuration enums
pub mod types;

pub use environment::{ServerConfig, DEFAULT_DATABASE_URL, DEFAULT_USER_ID_HEADER};
pub use llm::{LlmConfig, LlmCredentials, ProviderEndpoint};
pub use types::Environment;

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, falling back to `default` when unset or malformed
fn env_parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}
