// ABOUTME: Engagement domain: daily streak tracking, XP, badges, celebrations and goals
// ABOUTME: Re-exports the tracker and the pure classifiers it builds on
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

//! # Engagement
//!
//! [`EngagementTracker`] owns the stateful part: load, apply and persist a
//! user's [`EngagementState`](boris_core::models::EngagementState) under a
//! per-user lock. Everything else in this module is pure.

pub mod achievements;
pub mod celebrations;
pub mod clock;
pub mod goals;
mod tracker;

pub use achievements::{achievements_for, Achievement, AchievementKey};
pub use celebrations::{Celebration, CelebrationKind};
pub use clock::{Clock, FixedClock, SystemClock};
pub use goals::{goal_progress, DailyGoals};
pub use tracker::{EngagementSnapshot, EngagementTracker, LogOutcome, SampleLogged};
