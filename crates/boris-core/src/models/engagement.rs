// ABOUTME: Per-user engagement state with the daily streak and XP transition
// ABOUTME: Pure state machine: callers pass in today's date and persist the result themselves
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::engagement::{BASE_XP_PER_LOG, XP_PER_LEVEL, XP_PER_STREAK_DAY};

/// Streak, XP and level for one user
///
/// Created zeroed on a user's first log and mutated only through
/// [`EngagementState::apply_log`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementState {
    /// Consecutive calendar days ending at `last_log_date`
    pub current_streak_days: u32,
    /// Highest streak ever reached
    pub longest_streak_days: u32,
    /// Distinct days with at least one log
    pub total_logged_days: u32,
    /// Calendar day of the latest applied log
    pub last_log_date: Option<NaiveDate>,
    /// Accumulated experience points
    pub xp_total: u64,
    /// Derived from `xp_total`, starts at 1
    pub level: u32,
}

impl Default for EngagementState {
    fn default() -> Self {
        Self::new()
    }
}

impl EngagementState {
    /// Zeroed state for a user who has never logged
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current_streak_days: 0,
            longest_streak_days: 0,
            total_logged_days: 0,
            last_log_date: None,
            xp_total: 0,
            level: 1,
        }
    }

    /// Rebuild a state from stored counters, deriving the level from XP
    #[must_use]
    pub fn from_stored(
        current_streak_days: u32,
        longest_streak_days: u32,
        total_logged_days: u32,
        last_log_date: Option<NaiveDate>,
        xp_total: u64,
    ) -> Self {
        Self {
            current_streak_days,
            longest_streak_days,
            total_logged_days,
            last_log_date,
            xp_total,
            level: level_for_xp(xp_total),
        }
    }

    /// Apply a log event dated `today`
    ///
    /// Returns `false` and leaves the state untouched when a log was already
    /// applied for `today`. Otherwise the streak continues if the previous log
    /// was yesterday (or there was none), and restarts at 1 after any gap.
    pub fn apply_log(&mut self, today: NaiveDate) -> bool {
        if self.last_log_date == Some(today) {
            return false;
        }

        let continues_streak = match self.last_log_date {
            None => true,
            Some(last) => today.pred_opt() == Some(last),
        };

        self.current_streak_days = if continues_streak {
            self.current_streak_days.saturating_add(1)
        } else {
            1
        };
        self.longest_streak_days = self.longest_streak_days.max(self.current_streak_days);
        self.total_logged_days = self.total_logged_days.saturating_add(1);
        self.last_log_date = Some(today);
        self.xp_total = self
            .xp_total
            .saturating_add(xp_for_streak(self.current_streak_days));
        self.level = level_for_xp(self.xp_total);

        true
    }
}

/// XP granted for a log that brings the streak to `streak_days`
#[must_use]
pub fn xp_for_streak(streak_days: u32) -> u64 {
    BASE_XP_PER_LOG + XP_PER_STREAK_DAY * u64::from(streak_days)
}

/// Level reached with `xp_total` points: `floor(xp / 100) + 1`
#[must_use]
pub fn level_for_xp(xp_total: u64) -> u32 {
    u32::try_from(xp_total / XP_PER_LEVEL)
        .unwrap_or(u32::MAX)
        .saturating_add(1)
}
