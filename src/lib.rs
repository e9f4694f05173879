// ABOUTME: Main library entry point for the Boris health coaching API
// ABOUTME: Provides the multi-provider coaching gateway and the streak and XP engagement tracker
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

#![deny(unsafe_code)]

//! # Boris Coach Server
//!
//! Backend for the Boris health coach. Two services sit behind one HTTP API:
//!
//! - **Coaching gateway**: answers a user's question through exactly one call
//!   to OpenAI, Anthropic Claude or Google Gemini, picked from the configured
//!   credentials, with the Boris persona as system prompt.
//! - **Engagement tracker**: turns logged samples into daily streaks, XP,
//!   levels, achievement badges and celebrations.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use boris_coach::config::ServerConfig;
//! use boris_core::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("{}", config.summary());
//!     Ok(())
//! }
//! ```

/// Coaching gateway: validation, provider selection and the single upstream call
pub mod coaching;

/// Environment-driven server and LLM configuration
pub mod config;

/// Persistence trait and the `SQLite` store
pub mod database;

/// Streaks, XP, achievements, celebrations and goals
pub mod engagement;

/// LLM provider adapters, persona prompt and selection policy
pub mod llm;

/// Structured logging setup and domain event helpers
pub mod logging;

/// Shared server resources
pub mod resources;

/// HTTP routes
pub mod routes;
