// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, in-memory stores, fixed clocks and wired server resources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `boris_coach`

use std::env;
use std::sync::{Arc, Once};
use std::time::Duration;

use anyhow::Result;
use boris_coach::coaching::CoachingGateway;
use boris_coach::config::{LlmConfig, LlmCredentials, ServerConfig};
use boris_coach::database::SqliteStore;
use boris_coach::engagement::{EngagementTracker, FixedClock};
use boris_coach::llm::Persona;
use boris_coach::resources::ServerResources;
use chrono::NaiveDate;
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Fresh in-memory store
pub async fn create_test_store() -> Result<Arc<SqliteStore>> {
    init_test_logging();
    Ok(Arc::new(SqliteStore::connect("sqlite::memory:").await?))
}

/// Day of March 2025
pub fn day(n: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, n).unwrap()
}

/// Clock pinned to March `n`, 2025
pub fn fixed_clock(n: u32) -> Arc<FixedClock> {
    Arc::new(FixedClock::new(day(n)))
}

/// Tracker over a fresh store with a settable clock
pub async fn create_test_tracker(start_day: u32) -> Result<(EngagementTracker, Arc<FixedClock>)> {
    let store = create_test_store().await?;
    let clock = fixed_clock(start_day);
    Ok((EngagementTracker::new(store, clock.clone()), clock))
}

/// LLM config pointing every vendor at `base_url` with short timeouts
pub fn llm_config_for(base_url: &str, credentials: LlmCredentials) -> LlmConfig {
    let mut config = LlmConfig {
        credentials,
        connect_timeout: Duration::from_secs(2),
        request_timeout: Duration::from_secs(5),
        ..LlmConfig::default()
    };
    config.openai.base_url = base_url.to_owned();
    config.claude.base_url = base_url.to_owned();
    config.gemini.base_url = base_url.to_owned();
    config
}

/// `OpenAI` project key only
pub fn openai_credentials() -> LlmCredentials {
    LlmCredentials {
        openai: Some("sk-proj-test".to_owned()),
        ..LlmCredentials::default()
    }
}

/// Anthropic key only
pub fn anthropic_credentials() -> LlmCredentials {
    LlmCredentials {
        anthropic: Some("sk-ant-test".to_owned()),
        ..LlmCredentials::default()
    }
}

/// Gemini key only
pub fn gemini_credentials() -> LlmCredentials {
    LlmCredentials {
        gemini: Some("AIza-test".to_owned()),
        ..LlmCredentials::default()
    }
}

/// Gateway with the built-in persona
pub fn create_test_gateway(llm: LlmConfig) -> CoachingGateway {
    CoachingGateway::new(llm, Persona::boris()).unwrap()
}

/// Full resources over an in-memory store
pub async fn create_test_resources(
    llm: LlmConfig,
    clock: Arc<FixedClock>,
) -> Result<Arc<ServerResources>> {
    let store = create_test_store().await?;
    let config = ServerConfig {
        database_url: "sqlite::memory:".to_owned(),
        llm: llm.clone(),
        ..ServerConfig::default()
    };

    Ok(Arc::new(ServerResources::new(
        config,
        store,
        create_test_gateway(llm),
        clock,
    )))
}
