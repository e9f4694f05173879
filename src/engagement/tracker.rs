// ABOUTME: Engagement tracker that applies daily log events to stored per-user state
// ABOUTME: Serializes updates per user and attaches achievements and celebrations to outcomes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, instrument};
use uuid::Uuid;

use boris_core::errors::{AppError, AppResult};
use boris_core::models::{EngagementState, SampleKind, SamplePayload, SampleRecord};

use super::achievements::{achievements_for, Achievement};
use super::celebrations::{
    check_goal_reached, check_good_heart_rate, check_good_sleep, check_healthy_meal,
    check_streak_milestone, check_weight_loss, Celebration,
};
use super::clock::Clock;
use super::goals::{goal_progress, DailyGoals};
use crate::database::HealthStore;
use crate::logging::AppLogger;

/// Result of one `record_log` call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogOutcome {
    /// State after the call
    #[serde(flatten)]
    pub state: EngagementState,
    /// `false` when today was already logged and nothing changed
    pub is_new_log_today: bool,
    /// Badges the state satisfies
    pub achievements: Vec<Achievement>,
    /// Streak milestone reached by this log, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub celebration: Option<Celebration>,
}

/// Stored state plus its badges
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngagementSnapshot {
    /// Current state, zeroed for a user who never logged
    pub state: EngagementState,
    /// Badges the state satisfies
    pub achievements: Vec<Achievement>,
}

/// Outcome of logging a sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleLogged {
    /// Stored sample
    pub sample: SampleRecord,
    /// Engagement update caused by the sample
    pub engagement: LogOutcome,
    /// Every celebration the sample triggered
    pub celebrations: Vec<Celebration>,
}

type UserLocks = DashMap<String, Arc<Mutex<()>>>;

/// Applies log events to per-user engagement state
pub struct EngagementTracker {
    store: Arc<dyn HealthStore>,
    clock: Arc<dyn Clock>,
    goals: DailyGoals,
    user_locks: UserLocks,
}

/// Handle on one user's mutex; evicts the map entry when the last holder drops
struct UserLock<'a> {
    locks: &'a UserLocks,
    user_id: &'a str,
    mutex: Arc<Mutex<()>>,
}

impl Drop for UserLock<'_> {
    fn drop(&mut self) {
        // The map holds one reference and this handle holds another
        self.locks
            .remove_if(self.user_id, |_, mutex| Arc::strong_count(mutex) <= 2);
    }
}

impl EngagementTracker {
    /// Tracker over `store` using `clock` for the calendar day
    #[must_use]
    pub fn new(store: Arc<dyn HealthStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            goals: DailyGoals::default(),
            user_locks: DashMap::new(),
        }
    }

    /// Use `goals` when judging activity samples
    #[must_use]
    pub const fn with_goals(mut self, goals: DailyGoals) -> Self {
        self.goals = goals;
        self
    }

    fn user_lock<'a>(&'a self, user_id: &'a str) -> UserLock<'a> {
        let mutex = self
            .user_locks
            .entry(user_id.to_owned())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        UserLock {
            locks: &self.user_locks,
            user_id,
            mutex,
        }
    }

    /// Apply one log event for `user_id` dated today
    ///
    /// A second call on the same day returns the stored state unchanged with
    /// `is_new_log_today == false` and writes nothing.
    ///
    /// # Errors
    ///
    /// Returns the store's error if loading or saving the state fails.
    #[instrument(skip(self))]
    pub async fn record_log(&self, user_id: &str) -> AppResult<LogOutcome> {
        let lock = self.user_lock(user_id);
        let _guard = lock.mutex.lock().await;

        self.apply_log_locked(user_id).await
    }

    /// Load, apply and store; the caller holds the user's lock
    async fn apply_log_locked(&self, user_id: &str) -> AppResult<LogOutcome> {
        let mut state = self
            .store
            .get_engagement(user_id)
            .await?
            .unwrap_or_default();

        let today = self.clock.today();
        let is_new_log_today = state.apply_log(today);

        if is_new_log_today {
            self.store.put_engagement(user_id, &state).await?;
            AppLogger::log_engagement_update(
                user_id,
                state.current_streak_days,
                state.xp_total,
                state.level,
            );
        } else {
            debug!(%today, "Log already recorded today");
        }

        let celebration = if is_new_log_today {
            check_streak_milestone(state.current_streak_days)
        } else {
            None
        };

        Ok(LogOutcome {
            achievements: achievements_for(&state),
            state,
            is_new_log_today,
            celebration,
        })
    }

    /// Current state and badges; a user who never logged gets the zeroed state
    ///
    /// # Errors
    ///
    /// Returns the store's error if loading fails.
    pub async fn current_state(&self, user_id: &str) -> AppResult<EngagementSnapshot> {
        let state = self
            .store
            .get_engagement(user_id)
            .await?
            .unwrap_or_default();

        Ok(EngagementSnapshot {
            achievements: achievements_for(&state),
            state,
        })
    }

    /// Badges earned by `user_id`
    ///
    /// # Errors
    ///
    /// Returns the store's error if loading fails.
    pub async fn achievements(&self, user_id: &str) -> AppResult<Vec<Achievement>> {
        Ok(self.current_state(user_id).await?.achievements)
    }

    /// Validate and store a sample, then record the day's log
    ///
    /// # Errors
    ///
    /// Returns a validation error for out-of-range values, or the store's
    /// error if persisting fails.
    #[instrument(skip(self, payload), fields(kind = %payload.kind()))]
    pub async fn log_sample(&self, user_id: &str, payload: SamplePayload) -> AppResult<SampleLogged> {
        payload.validate()?;

        let lock = self.user_lock(user_id);
        let _guard = lock.mutex.lock().await;

        let previous_weight = match &payload {
            SamplePayload::Weight(_) => self
                .store
                .list_samples(user_id, SampleKind::Weight, 1)
                .await?
                .into_iter()
                .find_map(|record| match record.payload {
                    SamplePayload::Weight(previous) => Some(previous.weight_kg),
                    _ => None,
                }),
            _ => None,
        };

        let sample = self.store.append_sample(user_id, &payload).await?;
        AppLogger::log_sample_event(user_id, payload.kind().as_str(), "logged");

        let engagement = self.apply_log_locked(user_id).await?;

        let mut celebrations = self.sample_celebrations(&payload, previous_weight);
        celebrations.extend(engagement.celebration);

        Ok(SampleLogged {
            sample,
            engagement,
            celebrations,
        })
    }

    fn sample_celebrations(
        &self,
        payload: &SamplePayload,
        previous_weight: Option<f64>,
    ) -> Vec<Celebration> {
        match payload {
            SamplePayload::Weight(weight) => check_weight_loss(weight.weight_kg, previous_weight)
                .into_iter()
                .collect(),
            SamplePayload::Meal(meal) => check_healthy_meal(meal.calories, meal.protein_grams)
                .into_iter()
                .collect(),
            SamplePayload::Activity(activity) => {
                let steps_goal = activity.steps.and_then(|steps| {
                    check_goal_reached(goal_progress(
                        f64::from(steps),
                        f64::from(self.goals.daily_steps),
                    ))
                });
                [
                    steps_goal,
                    activity.resting_heart_rate.and_then(check_good_heart_rate),
                    activity.sleep_hours.and_then(check_good_sleep),
                ]
                .into_iter()
                .flatten()
                .collect()
            }
        }
    }

    /// Newest-first samples of `kind`
    ///
    /// # Errors
    ///
    /// Returns the store's error if the query fails.
    pub async fn list_samples(
        &self,
        user_id: &str,
        kind: SampleKind,
        limit: u32,
    ) -> AppResult<Vec<SampleRecord>> {
        self.store.list_samples(user_id, kind, limit).await
    }

    /// Delete one of the user's samples
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` when the user has no such sample.
    pub async fn delete_sample(&self, user_id: &str, kind: SampleKind, id: Uuid) -> AppResult<()> {
        if self.store.delete_sample(user_id, kind, id).await? {
            AppLogger::log_sample_event(user_id, kind.as_str(), "deleted");
            Ok(())
        } else {
            Err(AppError::not_found(format!("{kind} sample {id}")))
        }
    }
}
