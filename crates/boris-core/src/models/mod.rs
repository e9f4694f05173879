// ABOUTME: Core data models for the Boris coaching service
// ABOUTME: Re-exports engagement state, health context and logged sample types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

//! # Data Models
//!
//! - `EngagementState`: per-user streak, XP and level with the daily log transition
//! - `HealthContext`: numeric snapshot sent along with a coaching question
//! - `SamplePayload` / `SampleRecord`: logged weight, activity and meal entries

mod context;
mod engagement;
mod samples;

pub use context::HealthContext;
pub use engagement::{level_for_xp, xp_for_streak, EngagementState};
pub use samples::{
    ActivitySample, MealSample, SampleKind, SamplePayload, SampleRecord, WeightSample,
};
