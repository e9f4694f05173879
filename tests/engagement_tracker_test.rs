// ABOUTME: Integration tests for the engagement tracker over the SQLite store
// ABOUTME: Covers streak transitions across days, same-day idempotence, concurrency and sample logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use boris_coach::engagement::{AchievementKey, CelebrationKind, DailyGoals, EngagementTracker};
use boris_core::errors::ErrorCode;
use boris_core::models::{ActivitySample, MealSample, SampleKind, SamplePayload, WeightSample};
use tokio::task::JoinSet;
use uuid::Uuid;

use common::{create_test_tracker, day};

fn weight(kg: f64) -> SamplePayload {
    SamplePayload::Weight(WeightSample {
        weight_kg: kg,
        body_fat_percent: None,
        muscle_mass_kg: None,
        notes: None,
    })
}

fn activity(steps: Option<u32>, resting_hr: Option<f64>, sleep: Option<f64>) -> SamplePayload {
    SamplePayload::Activity(ActivitySample {
        activity_type: "walking".to_owned(),
        steps,
        duration_minutes: Some(45),
        calories: None,
        distance_km: None,
        resting_heart_rate: resting_hr,
        sleep_hours: sleep,
        notes: None,
    })
}

fn meal(calories: f64, protein: Option<f64>) -> SamplePayload {
    SamplePayload::Meal(MealSample {
        meal_type: "lunch".to_owned(),
        food_name: "Kycklingsallad".to_owned(),
        calories,
        protein_grams: protein,
        carbs_grams: None,
        fat_grams: None,
        fiber_grams: None,
    })
}

// ============================================================================
// record_log
// ============================================================================

#[tokio::test]
async fn test_first_log_creates_state() {
    let (tracker, _clock) = create_test_tracker(1).await.unwrap();

    let outcome = tracker.record_log("anna").await.unwrap();

    assert!(outcome.is_new_log_today);
    assert_eq!(outcome.state.current_streak_days, 1);
    assert_eq!(outcome.state.longest_streak_days, 1);
    assert_eq!(outcome.state.total_logged_days, 1);
    assert_eq!(outcome.state.xp_total, 12);
    assert_eq!(outcome.state.level, 1);
    assert_eq!(outcome.state.last_log_date, Some(day(1)));
    assert!(outcome.celebration.is_none());
}

#[tokio::test]
async fn test_same_day_log_is_idempotent() {
    let (tracker, _clock) = create_test_tracker(1).await.unwrap();

    let first = tracker.record_log("anna").await.unwrap();
    let second = tracker.record_log("anna").await.unwrap();

    assert!(!second.is_new_log_today);
    assert_eq!(second.state, first.state);
}

#[tokio::test]
async fn test_streak_scenario_with_gap() {
    let (tracker, clock) = create_test_tracker(1).await.unwrap();

    let d1 = tracker.record_log("anna").await.unwrap().state;
    assert_eq!(
        (d1.current_streak_days, d1.longest_streak_days, d1.xp_total, d1.level),
        (1, 1, 12, 1)
    );

    clock.set(day(2));
    let d2 = tracker.record_log("anna").await.unwrap().state;
    assert_eq!(
        (d2.current_streak_days, d2.longest_streak_days, d2.xp_total),
        (2, 2, 26)
    );

    clock.set(day(4));
    let d4 = tracker.record_log("anna").await.unwrap().state;
    assert_eq!(
        (d4.current_streak_days, d4.longest_streak_days, d4.xp_total),
        (1, 2, 38)
    );
    assert_eq!(d4.total_logged_days, 3);
}

#[tokio::test]
async fn test_xp_after_consecutive_days() {
    let (tracker, clock) = create_test_tracker(1).await.unwrap();

    let mut last = None;
    for _ in 0..10 {
        last = Some(tracker.record_log("erik").await.unwrap());
        clock.advance_days(1);
    }
    let outcome = last.unwrap();

    let expected: u64 = (1..=10).map(|i| 10 + 2 * i).sum();
    assert_eq!(outcome.state.xp_total, expected);
    assert_eq!(outcome.state.level, u32::try_from(expected / 100).unwrap() + 1);
    assert_eq!(outcome.state.current_streak_days, 10);
}

#[tokio::test]
async fn test_seventh_day_celebrates_milestone() {
    let (tracker, clock) = create_test_tracker(1).await.unwrap();

    for _ in 0..6 {
        let outcome = tracker.record_log("lisa").await.unwrap();
        assert!(outcome.celebration.is_none());
        clock.advance_days(1);
    }

    let seventh = tracker.record_log("lisa").await.unwrap();
    assert_eq!(seventh.state.current_streak_days, 7);
    assert_eq!(
        seventh.celebration.map(|c| c.kind),
        Some(CelebrationKind::StreakMilestone)
    );
    let keys: Vec<_> = seventh.achievements.iter().map(|a| a.key).collect();
    assert_eq!(keys, vec![AchievementKey::Streak3, AchievementKey::Streak7]);

    // repeating the same day never re-celebrates
    let again = tracker.record_log("lisa").await.unwrap();
    assert!(again.celebration.is_none());
}

#[tokio::test]
async fn test_longest_streak_survives_reset() {
    let (tracker, clock) = create_test_tracker(1).await.unwrap();

    for _ in 0..5 {
        tracker.record_log("anna").await.unwrap();
        clock.advance_days(1);
    }
    clock.advance_days(3);
    let outcome = tracker.record_log("anna").await.unwrap();

    assert_eq!(outcome.state.current_streak_days, 1);
    assert_eq!(outcome.state.longest_streak_days, 5);
}

#[tokio::test]
async fn test_users_are_isolated() {
    let (tracker, _clock) = create_test_tracker(1).await.unwrap();

    tracker.record_log("anna").await.unwrap();
    let other = tracker.current_state("erik").await.unwrap();

    assert_eq!(other.state.current_streak_days, 0);
    assert_eq!(other.state.level, 1);
    assert!(other.achievements.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_same_day_logs_apply_once() {
    let (tracker, _clock) = create_test_tracker(1).await.unwrap();
    let tracker = Arc::new(tracker);

    let mut tasks = JoinSet::new();
    for _ in 0..16 {
        let tracker = Arc::clone(&tracker);
        tasks.spawn(async move { tracker.record_log("anna").await.unwrap() });
    }

    let mut new_logs = 0;
    while let Some(outcome) = tasks.join_next().await {
        if outcome.unwrap().is_new_log_today {
            new_logs += 1;
        }
    }

    assert_eq!(new_logs, 1);
    let state = tracker.current_state("anna").await.unwrap().state;
    assert_eq!(state.total_logged_days, 1);
    assert_eq!(state.xp_total, 12);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_weights_compare_against_latest_sample() {
    let (tracker, _clock) = create_test_tracker(1).await.unwrap();
    let tracker = Arc::new(tracker);
    tracker.log_sample("anna", weight(80.0)).await.unwrap();

    let mut tasks = JoinSet::new();
    for _ in 0..2 {
        let tracker = Arc::clone(&tracker);
        tasks.spawn(async move { tracker.log_sample("anna", weight(79.0)).await.unwrap() });
    }

    let mut weight_losses = 0;
    while let Some(logged) = tasks.join_next().await {
        weight_losses += logged
            .unwrap()
            .celebrations
            .iter()
            .filter(|c| c.kind == CelebrationKind::WeightLoss)
            .count();
    }
    assert_eq!(weight_losses, 1);
}

// ============================================================================
// log_sample
// ============================================================================

#[tokio::test]
async fn test_weight_loss_is_celebrated_against_previous_sample() {
    let (tracker, clock) = create_test_tracker(1).await.unwrap();

    let first = tracker.log_sample("anna", weight(82.0)).await.unwrap();
    assert!(first.celebrations.is_empty());
    assert!(first.engagement.is_new_log_today);

    clock.advance_days(1);
    let second = tracker.log_sample("anna", weight(81.2)).await.unwrap();
    let kinds: Vec<_> = second.celebrations.iter().map(|c| c.kind).collect();
    assert_eq!(kinds, vec![CelebrationKind::WeightLoss]);
    assert_eq!(second.engagement.state.current_streak_days, 2);

    let gained = tracker.log_sample("anna", weight(83.0)).await.unwrap();
    assert!(gained.celebrations.is_empty());
    assert!(!gained.engagement.is_new_log_today);
}

#[tokio::test]
async fn test_activity_celebrations() {
    let (tracker, _clock) = create_test_tracker(1).await.unwrap();

    let logged = tracker
        .log_sample("anna", activity(Some(12_000), Some(72.0), Some(8.0)))
        .await
        .unwrap();
    let kinds: Vec<_> = logged.celebrations.iter().map(|c| c.kind).collect();

    assert_eq!(
        kinds,
        vec![
            CelebrationKind::GoalReached,
            CelebrationKind::GoodHeartRate,
            CelebrationKind::GoodSleep,
        ]
    );

    let quiet = tracker
        .log_sample("anna", activity(Some(4_000), Some(95.0), Some(5.0)))
        .await
        .unwrap();
    assert!(quiet.celebrations.is_empty());
}

#[tokio::test]
async fn test_healthy_meal_celebration() {
    let (tracker, _clock) = create_test_tracker(1).await.unwrap();

    let healthy = tracker.log_sample("anna", meal(420.0, Some(32.0))).await.unwrap();
    assert_eq!(healthy.celebrations[0].kind, CelebrationKind::HealthyMeal);

    let heavy = tracker.log_sample("anna", meal(900.0, Some(40.0))).await.unwrap();
    assert!(heavy.celebrations.is_empty());
}

#[tokio::test]
async fn test_invalid_sample_is_rejected_before_storage() {
    let (tracker, _clock) = create_test_tracker(1).await.unwrap();

    let err = tracker.log_sample("anna", weight(0.0)).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);

    let err = tracker.log_sample("anna", weight(501.0)).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);

    assert!(tracker
        .list_samples("anna", SampleKind::Weight, 30)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(
        tracker.current_state("anna").await.unwrap().state.total_logged_days,
        0
    );
}

#[tokio::test]
async fn test_delete_is_scoped_to_owner() {
    let (tracker, _clock) = create_test_tracker(1).await.unwrap();

    let logged = tracker.log_sample("anna", weight(80.0)).await.unwrap();
    let id = logged.sample.id;

    let err = tracker
        .delete_sample("erik", SampleKind::Weight, id)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    let err = tracker
        .delete_sample("anna", SampleKind::Meal, id)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    tracker
        .delete_sample("anna", SampleKind::Weight, id)
        .await
        .unwrap();
    let err = tracker
        .delete_sample("anna", SampleKind::Weight, Uuid::new_v4())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_custom_goals_change_step_celebration() {
    let (tracker, _clock) = create_test_tracker(1).await.unwrap();
    let goals = DailyGoals {
        daily_steps: 3_000,
        ..DailyGoals::default()
    };
    let tracker: EngagementTracker = tracker.with_goals(goals);

    let logged = tracker
        .log_sample("anna", activity(Some(3_500), None, None))
        .await
        .unwrap();
    assert_eq!(logged.celebrations[0].kind, CelebrationKind::GoalReached);
}
