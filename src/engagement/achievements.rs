// ABOUTME: Fixed achievement badge catalogue derived from engagement state
// ABOUTME: Streak, total-days and level thresholds with Swedish names and display hints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

use serde::Serialize;

use boris_core::models::EngagementState;

/// Stable badge identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AchievementKey {
    /// 3 days in a row
    #[serde(rename = "streak_3")]
    Streak3,
    /// 7 days in a row
    #[serde(rename = "streak_7")]
    Streak7,
    /// 14 days in a row
    #[serde(rename = "streak_14")]
    Streak14,
    /// 30 days in a row
    #[serde(rename = "streak_30")]
    Streak30,
    /// 100 days in a row
    #[serde(rename = "streak_100")]
    Streak100,
    /// 10 logged days
    #[serde(rename = "total_10")]
    Total10,
    /// 50 logged days
    #[serde(rename = "total_50")]
    Total50,
    /// 100 logged days
    #[serde(rename = "total_100")]
    Total100,
    /// Level 5 reached
    #[serde(rename = "level_5")]
    Level5,
    /// Level 10 reached
    #[serde(rename = "level_10")]
    Level10,
}

/// Which counter a badge threshold applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Metric {
    Streak,
    TotalDays,
    Level,
}

/// One earned badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Achievement {
    /// Stable identifier
    pub key: AchievementKey,
    /// Emoji shown on the badge
    pub icon: &'static str,
    /// Display name
    pub name: &'static str,
    /// Client colour hint
    pub color: &'static str,
}

struct CatalogueEntry {
    achievement: Achievement,
    metric: Metric,
    threshold: u32,
}

const fn entry(
    key: AchievementKey,
    icon: &'static str,
    name: &'static str,
    color: &'static str,
    metric: Metric,
    threshold: u32,
) -> CatalogueEntry {
    CatalogueEntry {
        achievement: Achievement {
            key,
            icon,
            name,
            color,
        },
        metric,
        threshold,
    }
}

/// Badges in display order
const CATALOGUE: [CatalogueEntry; 10] = [
    entry(AchievementKey::Streak3, "🔥", "3-dagars streak!", "orange", Metric::Streak, 3),
    entry(AchievementKey::Streak7, "⚡", "1 vecka!", "yellow", Metric::Streak, 7),
    entry(AchievementKey::Streak14, "💪", "2 veckor!", "blue", Metric::Streak, 14),
    entry(AchievementKey::Streak30, "🏆", "1 månad!", "gold", Metric::Streak, 30),
    entry(AchievementKey::Streak100, "👑", "Mästare!", "purple", Metric::Streak, 100),
    entry(AchievementKey::Total10, "🎯", "10 dagar totalt", "green", Metric::TotalDays, 10),
    entry(AchievementKey::Total50, "🌟", "50 dagar totalt", "green", Metric::TotalDays, 50),
    entry(AchievementKey::Total100, "💎", "100 dagar totalt", "green", Metric::TotalDays, 100),
    entry(AchievementKey::Level5, "📈", "Level 5!", "cyan", Metric::Level, 5),
    entry(AchievementKey::Level10, "🚀", "Level 10!", "cyan", Metric::Level, 10),
];

/// Every badge `state` satisfies, in catalogue order
#[must_use]
pub fn achievements_for(state: &EngagementState) -> Vec<Achievement> {
    CATALOGUE
        .iter()
        .filter(|entry| {
            let value = match entry.metric {
                Metric::Streak => state.current_streak_days,
                Metric::TotalDays => state.total_logged_days,
                Metric::Level => state.level,
            };
            value >= entry.threshold
        })
        .map(|entry| entry.achievement)
        .collect()
}
