// ABOUTME: Persistence abstraction for per-user engagement state and logged health samples
// ABOUTME: Defines the HealthStore trait implemented by the SQLite backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

//! # Database Management
//!
//! The service talks to storage only through [`HealthStore`], so the tracker
//! and routes can be driven by any backend. [`SqliteStore`] is the shipped
//! implementation.

mod sqlite;

pub use sqlite::SqliteStore;

use async_trait::async_trait;
use uuid::Uuid;

use boris_core::errors::AppResult;
use boris_core::models::{EngagementState, SampleKind, SamplePayload, SampleRecord};

/// Core storage trait
///
/// Every operation is scoped to one user. Implementations never coordinate
/// writes; callers serialize updates for the same user.
#[async_trait]
pub trait HealthStore: Send + Sync {
    // ================================
    // Engagement State
    // ================================

    /// Stored engagement state, `None` if the user never logged
    async fn get_engagement(&self, user_id: &str) -> AppResult<Option<EngagementState>>;

    /// Insert or replace the user's engagement state
    async fn put_engagement(&self, user_id: &str, state: &EngagementState) -> AppResult<()>;

    // ================================
    // Health Samples
    // ================================

    /// Store a validated sample and return it with its id and timestamp
    async fn append_sample(&self, user_id: &str, payload: &SamplePayload)
        -> AppResult<SampleRecord>;

    /// Newest-first samples of one kind, at most `limit`
    async fn list_samples(
        &self,
        user_id: &str,
        kind: SampleKind,
        limit: u32,
    ) -> AppResult<Vec<SampleRecord>>;

    /// Delete one sample owned by `user_id`; `false` when nothing matched
    async fn delete_sample(&self, user_id: &str, kind: SampleKind, id: Uuid) -> AppResult<bool>;

    // ================================
    // Health
    // ================================

    /// Check that storage answers queries
    async fn health_check(&self) -> AppResult<()>;
}
