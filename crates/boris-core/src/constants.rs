// ABOUTME: Domain constants for engagement scoring, celebrations and sample validation
// ABOUTME: Pure data constants grouped by domain for the Boris coaching service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

//! Constants module
//!
//! Constants are grouped into small domain modules rather than one flat list.

/// Service identification
pub mod service_names {
    /// Service name used in structured logs
    pub const BORIS_COACH_SERVER: &str = "boris-coach-server";
}

/// Network ports
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
}

/// XP and level computation
pub mod engagement {
    /// Flat XP awarded for every new logged day
    pub const BASE_XP_PER_LOG: u64 = 10;
    /// Extra XP per day of the current streak
    pub const XP_PER_STREAK_DAY: u64 = 2;
    /// XP needed to advance one level
    pub const XP_PER_LEVEL: u64 = 100;
    /// Streak lengths that trigger a milestone celebration
    pub const STREAK_MILESTONES: [u32; 4] = [7, 14, 30, 100];
}

/// Celebration classifier thresholds
pub mod celebrations {
    /// A healthy meal stays strictly below this many calories
    pub const HEALTHY_MEAL_MAX_CALORIES: f64 = 500.0;
    /// A healthy meal has strictly more protein than this (grams)
    pub const HEALTHY_MEAL_MIN_PROTEIN_GRAMS: f64 = 15.0;
    /// Progress percentage at which a goal counts as reached
    pub const GOAL_REACHED_PERCENT: u32 = 100;
    /// Lowest resting heart rate considered good (bpm, inclusive)
    pub const GOOD_RESTING_HR_MIN: f64 = 60.0;
    /// Highest resting heart rate considered good (bpm, inclusive)
    pub const GOOD_RESTING_HR_MAX: f64 = 80.0;
    /// Shortest good night of sleep (hours, inclusive)
    pub const GOOD_SLEEP_MIN_HOURS: f64 = 7.0;
    /// Longest good night of sleep (hours, inclusive)
    pub const GOOD_SLEEP_MAX_HOURS: f64 = 9.0;
}

/// Default daily goals
pub mod goals {
    /// Daily step goal
    pub const DAILY_STEPS: u32 = 10_000;
    /// Daily calorie goal
    pub const DAILY_CALORIES: u32 = 2_000;
    /// Daily active minutes goal
    pub const DAILY_ACTIVE_MINUTES: u32 = 30;
    /// Daily glasses of water goal
    pub const DAILY_WATER_GLASSES: u32 = 8;
    /// Weekly workout goal
    pub const WEEKLY_WORKOUTS: u32 = 3;
}

/// Sample validation and listing limits
pub mod samples {
    /// Heaviest accepted body weight in kilograms (inclusive)
    pub const MAX_WEIGHT_KG: f64 = 500.0;
    /// Largest accepted meal in calories (inclusive)
    pub const MAX_MEAL_CALORIES: f64 = 10_000.0;
    /// Samples returned by a listing when no limit is given
    pub const DEFAULT_LIST_LIMIT: u32 = 30;
    /// Upper bound on a listing limit
    pub const MAX_LIST_LIMIT: u32 = 100;
}
