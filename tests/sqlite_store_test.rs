// ABOUTME: Integration tests for the SQLite HealthStore implementation
// ABOUTME: Covers engagement upserts, sample ordering and limits, scoping and file persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use boris_coach::database::{HealthStore, SqliteStore};
use boris_core::errors::ErrorCode;
use boris_core::models::{EngagementState, MealSample, SampleKind, SamplePayload, WeightSample};
use tempfile::TempDir;

use common::{create_test_store, day, init_test_logging};

fn weight(kg: f64) -> SamplePayload {
    SamplePayload::Weight(WeightSample {
        weight_kg: kg,
        body_fat_percent: Some(21.5),
        muscle_mass_kg: None,
        notes: Some("morgon".to_owned()),
    })
}

#[tokio::test]
async fn test_missing_engagement_is_none() {
    let store = create_test_store().await.unwrap();
    assert!(store.get_engagement("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_engagement_upsert_round_trip() {
    let store = create_test_store().await.unwrap();

    let mut state = EngagementState::new();
    state.apply_log(day(1));
    store.put_engagement("anna", &state).await.unwrap();
    assert_eq!(store.get_engagement("anna").await.unwrap(), Some(state));

    state.apply_log(day(2));
    store.put_engagement("anna", &state).await.unwrap();

    let stored = store.get_engagement("anna").await.unwrap().unwrap();
    assert_eq!(stored.current_streak_days, 2);
    assert_eq!(stored.xp_total, 26);
    assert_eq!(stored.last_log_date, Some(day(2)));
}

#[tokio::test]
async fn test_samples_are_newest_first_and_limited() {
    let store = create_test_store().await.unwrap();

    for kg in [80.0, 79.5, 79.0] {
        store.append_sample("anna", &weight(kg)).await.unwrap();
    }
    store
        .append_sample(
            "anna",
            &SamplePayload::Meal(MealSample {
                meal_type: "frukost".to_owned(),
                food_name: "Havregrynsgröt".to_owned(),
                calories: 350.0,
                protein_grams: Some(12.0),
                carbs_grams: None,
                fat_grams: None,
                fiber_grams: Some(6.0),
            }),
        )
        .await
        .unwrap();

    let weights = store
        .list_samples("anna", SampleKind::Weight, 30)
        .await
        .unwrap();
    let values: Vec<f64> = weights
        .iter()
        .map(|record| match &record.payload {
            SamplePayload::Weight(sample) => sample.weight_kg,
            other => panic!("unexpected payload {other:?}"),
        })
        .collect();
    assert_eq!(values, vec![79.0, 79.5, 80.0]);
    assert!(weights.iter().all(|r| r.user_id == "anna"));

    let latest = store
        .list_samples("anna", SampleKind::Weight, 1)
        .await
        .unwrap();
    assert_eq!(latest.len(), 1);
    assert_eq!(latest[0].payload, weight(79.0));

    let meals = store.list_samples("anna", SampleKind::Meal, 30).await.unwrap();
    assert_eq!(meals.len(), 1);
}

#[tokio::test]
async fn test_delete_requires_matching_owner_and_kind() {
    let store = create_test_store().await.unwrap();
    let record = store.append_sample("anna", &weight(75.0)).await.unwrap();

    assert!(!store
        .delete_sample("erik", SampleKind::Weight, record.id)
        .await
        .unwrap());
    assert!(!store
        .delete_sample("anna", SampleKind::Activity, record.id)
        .await
        .unwrap());
    assert!(store
        .delete_sample("anna", SampleKind::Weight, record.id)
        .await
        .unwrap());
    assert!(store
        .list_samples("anna", SampleKind::Weight, 30)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_file_database_persists_and_creates_directory() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("boris.db");
    let url = format!("sqlite:{}", path.display());

    {
        let store = SqliteStore::connect(&url).await.unwrap();
        let mut state = EngagementState::new();
        state.apply_log(day(3));
        store.put_engagement("anna", &state).await.unwrap();
        store.append_sample("anna", &weight(70.0)).await.unwrap();
        store.pool().close().await;
    }

    assert!(path.exists());

    let reopened = SqliteStore::connect(&url).await.unwrap();
    let state = reopened.get_engagement("anna").await.unwrap().unwrap();
    assert_eq!(state.last_log_date, Some(day(3)));
    assert_eq!(
        reopened
            .list_samples("anna", SampleKind::Weight, 30)
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn test_health_check_reports_closed_pool() {
    let store = create_test_store().await.unwrap();
    store.health_check().await.unwrap();

    store.pool().close().await;
    let err = store.health_check().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::StorageUnavailable);
}

#[tokio::test]
async fn test_malformed_url_is_config_error() {
    init_test_logging();
    let err = SqliteStore::connect("postgres://localhost/boris")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
}
