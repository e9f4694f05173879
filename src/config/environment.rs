// ABOUTME: Server configuration loaded from environment variables
// ABOUTME: Covers the listen port, database URL, identity header, persona override and LLM settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

use std::env;
use std::path::PathBuf;

use tracing::info;

use boris_core::constants::ports::DEFAULT_HTTP_PORT;
use boris_core::errors::{AppError, AppResult};

use super::llm::LlmConfig;
use super::types::Environment;
use super::{env_parse_or, env_var_or};
use crate::llm::select_provider;

/// Default `SQLite` location
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/boris.db";

/// Default header carrying the caller identity
pub const DEFAULT_USER_ID_HEADER: &str = "x-user-id";

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// sqlx `SQLite` URL
    pub database_url: String,
    /// Lowercase name of the trusted identity header
    pub user_id_header: String,
    /// Deployment environment
    pub environment: Environment,
    /// Optional file replacing the built-in persona prompt
    pub persona_file: Option<PathBuf>,
    /// LLM vendors, limits and timeouts
    pub llm: LlmConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            database_url: DEFAULT_DATABASE_URL.to_owned(),
            user_id_header: DEFAULT_USER_ID_HEADER.to_owned(),
            environment: Environment::default(),
            persona_file: None,
            llm: LlmConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the identity header name is empty or
    /// the LLM timeouts are invalid.
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let user_id_header = env_var_or("USER_ID_HEADER", DEFAULT_USER_ID_HEADER)
            .trim()
            .to_ascii_lowercase();
        if user_id_header.is_empty() {
            return Err(AppError::config("USER_ID_HEADER must not be empty"));
        }

        Ok(Self {
            http_port: env_parse_or("HTTP_PORT", DEFAULT_HTTP_PORT),
            database_url: env_var_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            user_id_header,
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            persona_file: env::var("BORIS_PERSONA_FILE")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            llm: LlmConfig::from_env()?,
        })
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        let provider = select_provider(&self.llm.credentials)
            .map_or("none (coaching disabled)", |selected| selected.kind.as_str());

        format!(
            "Boris Coach Server Configuration:\n\
             - HTTP Port: {}\n\
             - Database: {}\n\
             - Identity Header: {}\n\
             - Environment: {}\n\
             - Persona: {}\n\
             - LLM Provider: {provider}\n\
             - LLM Timeouts: connect {}s, request {}s",
            self.http_port,
            if self.database_url.contains(":memory:") {
                "SQLite (in-memory)"
            } else {
                "SQLite"
            },
            self.user_id_header,
            self.environment,
            self.persona_file
                .as_ref()
                .map_or_else(|| "built-in".to_owned(), |p| p.display().to_string()),
            self.llm.connect_timeout.as_secs(),
            self.llm.request_timeout.as_secs(),
        )
    }
}
