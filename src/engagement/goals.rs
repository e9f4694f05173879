// ABOUTME: Default daily goals and progress percentage computation
// ABOUTME: Progress is rounded, capped at 100 and zero for a zero goal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

use serde::{Deserialize, Serialize};

use boris_core::constants::goals::{
    DAILY_ACTIVE_MINUTES, DAILY_CALORIES, DAILY_STEPS, DAILY_WATER_GLASSES, WEEKLY_WORKOUTS,
};

/// Per-user goal targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyGoals {
    /// Steps per day
    pub daily_steps: u32,
    /// Calories per day
    pub daily_calories: u32,
    /// Active minutes per day
    pub daily_active_minutes: u32,
    /// Glasses of water per day
    pub daily_water_glasses: u32,
    /// Workouts per week
    pub weekly_workouts: u32,
}

impl Default for DailyGoals {
    fn default() -> Self {
        Self {
            daily_steps: DAILY_STEPS,
            daily_calories: DAILY_CALORIES,
            daily_active_minutes: DAILY_ACTIVE_MINUTES,
            daily_water_glasses: DAILY_WATER_GLASSES,
            weekly_workouts: WEEKLY_WORKOUTS,
        }
    }
}

/// `min(100, round(value / goal * 100))`; a zero goal yields 0
#[must_use]
pub fn goal_progress(value: f64, goal: f64) -> u32 {
    if goal <= 0.0 || !value.is_finite() || value <= 0.0 {
        return 0;
    }
    let percent = (value / goal * 100.0).round();
    if percent >= 100.0 {
        100
    } else {
        percent as u32
    }
}
