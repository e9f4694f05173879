// ABOUTME: Celebration catalogue and the pure classifiers that decide when to celebrate
// ABOUTME: Weight loss, healthy meal, goal reached, streak milestone, heart rate and sleep checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

//! Celebrations are presentation events: a kind plus the Swedish message and
//! the sound, emoji and colour hints the client plays back. Classifiers never
//! touch state; they return `Some` when the event applies.

use serde::Serialize;

use boris_core::constants::celebrations::{
    GOAL_REACHED_PERCENT, GOOD_RESTING_HR_MAX, GOOD_RESTING_HR_MIN, GOOD_SLEEP_MAX_HOURS,
    GOOD_SLEEP_MIN_HOURS, HEALTHY_MEAL_MAX_CALORIES, HEALTHY_MEAL_MIN_PROTEIN_GRAMS,
};
use boris_core::constants::engagement::STREAK_MILESTONES;

/// Celebration event kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CelebrationKind {
    /// Weight dropped since the previous measurement
    WeightLoss,
    /// Low-calorie, protein-rich meal
    HealthyMeal,
    /// A daily goal reached 100 %
    GoalReached,
    /// Streak hit 7, 14, 30 or 100 days
    StreakMilestone,
    /// Water goal met
    WaterGoal,
    /// Step goal met
    StepsGoal,
    /// Workout finished
    WorkoutComplete,
    /// Resting heart rate in the healthy band
    GoodHeartRate,
    /// Sleep duration in the healthy band
    GoodSleep,
}

/// A celebration ready for the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Celebration {
    /// Event kind
    pub kind: CelebrationKind,
    /// Sound pattern hint
    pub sound: &'static str,
    /// Swedish message shown to the user
    pub message: &'static str,
    /// Emoji hint
    pub emoji: &'static str,
    /// Colour gradient hint
    pub color: &'static str,
}

impl CelebrationKind {
    /// Full presentation for this kind
    #[must_use]
    pub const fn descriptor(self) -> Celebration {
        let (sound, message, emoji, color) = match self {
            Self::WeightLoss => (
                "celebration",
                "Fantastiskt! Du har gått ner i vikt! 🎉",
                "🎊",
                "from-green-500 to-emerald-500",
            ),
            Self::HealthyMeal => (
                "success",
                "Hälsosam mat! Boris är stolt över dig! 🥗",
                "🌟",
                "from-green-500 to-lime-500",
            ),
            Self::GoalReached => (
                "achievement",
                "Mål uppnått! Du är en stjärna! ⭐",
                "🏆",
                "from-yellow-500 to-orange-500",
            ),
            Self::StreakMilestone => (
                "fanfare",
                "Otrolig streak! Du är på rullande! 🔥",
                "🔥",
                "from-orange-500 to-red-500",
            ),
            Self::WaterGoal => (
                "ding",
                "Bra jobbat! Vattenmålet klarat! 💧",
                "💧",
                "from-cyan-500 to-blue-500",
            ),
            Self::StepsGoal => (
                "victory",
                "Wow! Du nådde ditt stegmål! 👟",
                "🎯",
                "from-blue-500 to-purple-500",
            ),
            Self::WorkoutComplete => (
                "cheer",
                "Träningspass klart! Du är en vinnare! 💪",
                "💪",
                "from-purple-500 to-pink-500",
            ),
            Self::GoodHeartRate => (
                "positive",
                "Perfekt hjärtfrekvens! Bra jobbat! ❤️",
                "❤️",
                "from-red-500 to-pink-500",
            ),
            Self::GoodSleep => (
                "calm",
                "Underbar sömn! Du är utvilad! 😴",
                "😴",
                "from-indigo-500 to-purple-500",
            ),
        };

        Celebration {
            kind: self,
            sound,
            message,
            emoji,
            color,
        }
    }
}

fn celebrate_if(condition: bool, kind: CelebrationKind) -> Option<Celebration> {
    condition.then(|| kind.descriptor())
}

/// Celebrate when a positive previous weight is strictly above the new one
#[must_use]
pub fn check_weight_loss(current_kg: f64, previous_kg: Option<f64>) -> Option<Celebration> {
    celebrate_if(
        previous_kg.is_some_and(|previous| previous > 0.0 && current_kg < previous),
        CelebrationKind::WeightLoss,
    )
}

/// Celebrate a meal under 500 kcal with more than 15 g protein
#[must_use]
pub fn check_healthy_meal(calories: f64, protein_grams: Option<f64>) -> Option<Celebration> {
    celebrate_if(
        calories < HEALTHY_MEAL_MAX_CALORIES
            && protein_grams.is_some_and(|protein| protein > HEALTHY_MEAL_MIN_PROTEIN_GRAMS),
        CelebrationKind::HealthyMeal,
    )
}

/// Celebrate progress of 100 % or more
#[must_use]
pub fn check_goal_reached(progress_percent: u32) -> Option<Celebration> {
    celebrate_if(
        progress_percent >= GOAL_REACHED_PERCENT,
        CelebrationKind::GoalReached,
    )
}

/// Celebrate streaks of exactly 7, 14, 30 or 100 days
#[must_use]
pub fn check_streak_milestone(streak_days: u32) -> Option<Celebration> {
    celebrate_if(
        STREAK_MILESTONES.contains(&streak_days),
        CelebrationKind::StreakMilestone,
    )
}

/// Celebrate a resting heart rate between 60 and 80 bpm inclusive
#[must_use]
pub fn check_good_heart_rate(bpm: f64) -> Option<Celebration> {
    celebrate_if(
        (GOOD_RESTING_HR_MIN..=GOOD_RESTING_HR_MAX).contains(&bpm),
        CelebrationKind::GoodHeartRate,
    )
}

/// Celebrate between 7 and 9 hours of sleep inclusive
#[must_use]
pub fn check_good_sleep(hours: f64) -> Option<Celebration> {
    celebrate_if(
        (GOOD_SLEEP_MIN_HOURS..=GOOD_SLEEP_MAX_HOURS).contains(&hours),
        CelebrationKind::GoodSleep,
    )
}
