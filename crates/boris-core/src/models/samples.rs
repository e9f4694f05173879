// ABOUTME: Logged health samples (weight, activity, meal) with input validation
// ABOUTME: Tagged payload enum stored per user and exchanged over the REST API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::samples::{MAX_MEAL_CALORIES, MAX_WEIGHT_KG};
use crate::errors::{AppError, AppResult};

/// Kind of logged sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleKind {
    /// Body weight measurement
    Weight,
    /// Exercise or daily activity metrics
    Activity,
    /// Eaten meal
    Meal,
}

impl SampleKind {
    /// Stable lowercase name used in URLs and storage
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weight => "weight",
            Self::Activity => "activity",
            Self::Meal => "meal",
        }
    }
}

impl fmt::Display for SampleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SampleKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weight" => Ok(Self::Weight),
            "activity" => Ok(Self::Activity),
            "meal" => Ok(Self::Meal),
            other => Err(AppError::invalid_input(format!(
                "Unknown sample kind '{other}', expected weight, activity or meal"
            ))),
        }
    }
}

/// Body weight measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightSample {
    /// Weight in kilograms, `0 < weight <= 500`
    pub weight_kg: f64,
    /// Body fat percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat_percent: Option<f64>,
    /// Muscle mass in kilograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muscle_mass_kg: Option<f64>,
    /// Free-form note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl WeightSample {
    /// Check ranges before the sample is stored
    ///
    /// # Errors
    ///
    /// Returns a validation error for a non-positive weight, a weight above
    /// 500 kg, or a body fat percentage outside 0-100.
    pub fn validate(&self) -> AppResult<()> {
        if !(self.weight_kg > 0.0 && self.weight_kg <= MAX_WEIGHT_KG) {
            return Err(AppError::out_of_range(
                "weightKg",
                format!("Weight must be between 0 and {MAX_WEIGHT_KG} kg"),
            ));
        }
        if let Some(fat) = self.body_fat_percent {
            if !(0.0..=100.0).contains(&fat) {
                return Err(AppError::out_of_range(
                    "bodyFatPercent",
                    "Body fat must be between 0 and 100 percent",
                ));
            }
        }
        ensure_non_negative("muscleMassKg", self.muscle_mass_kg)
    }
}

/// Exercise session or daily activity metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySample {
    /// Activity label such as "walk" or "daily"
    pub activity_type: String,
    /// Steps taken
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<u32>,
    /// Active minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    /// Calories burned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    /// Distance in kilometres
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    /// Resting heart rate in bpm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resting_heart_rate: Option<f64>,
    /// Hours slept last night
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f64>,
    /// Free-form note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ActivitySample {
    /// Check required fields and ranges before the sample is stored
    ///
    /// # Errors
    ///
    /// Returns a validation error when `activityType` is blank or a metric is
    /// outside its physical range.
    pub fn validate(&self) -> AppResult<()> {
        ensure_present("activityType", &self.activity_type)?;
        ensure_non_negative("calories", self.calories)?;
        ensure_non_negative("distanceKm", self.distance_km)?;
        if let Some(bpm) = self.resting_heart_rate {
            if !(bpm > 0.0 && bpm <= 250.0) {
                return Err(AppError::out_of_range(
                    "restingHeartRate",
                    "Resting heart rate must be between 0 and 250 bpm",
                ));
            }
        }
        if let Some(hours) = self.sleep_hours {
            if !(0.0..=24.0).contains(&hours) {
                return Err(AppError::out_of_range(
                    "sleepHours",
                    "Sleep must be between 0 and 24 hours",
                ));
            }
        }
        Ok(())
    }
}

/// Eaten meal with optional macronutrients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSample {
    /// Breakfast, lunch, dinner or snack
    pub meal_type: String,
    /// What was eaten
    pub food_name: String,
    /// Energy in kcal, `0 <= calories <= 10000`
    pub calories: f64,
    /// Protein in grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_grams: Option<f64>,
    /// Carbohydrates in grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs_grams: Option<f64>,
    /// Fat in grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat_grams: Option<f64>,
    /// Fiber in grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber_grams: Option<f64>,
}

impl MealSample {
    /// Check required fields and ranges before the sample is stored
    ///
    /// # Errors
    ///
    /// Returns a validation error for blank names, calories outside 0-10000
    /// or negative macronutrients.
    pub fn validate(&self) -> AppResult<()> {
        ensure_present("mealType", &self.meal_type)?;
        ensure_present("foodName", &self.food_name)?;
        if !(0.0..=MAX_MEAL_CALORIES).contains(&self.calories) {
            return Err(AppError::out_of_range(
                "calories",
                format!("Calories must be between 0 and {MAX_MEAL_CALORIES}"),
            ));
        }
        ensure_non_negative("proteinGrams", self.protein_grams)?;
        ensure_non_negative("carbsGrams", self.carbs_grams)?;
        ensure_non_negative("fatGrams", self.fat_grams)?;
        ensure_non_negative("fiberGrams", self.fiber_grams)
    }
}

/// Any loggable sample, tagged by `kind` on the wire and in storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SamplePayload {
    /// Weight measurement
    Weight(WeightSample),
    /// Activity metrics
    Activity(ActivitySample),
    /// Meal
    Meal(MealSample),
}

impl SamplePayload {
    /// Kind of the wrapped sample
    #[must_use]
    pub const fn kind(&self) -> SampleKind {
        match self {
            Self::Weight(_) => SampleKind::Weight,
            Self::Activity(_) => SampleKind::Activity,
            Self::Meal(_) => SampleKind::Meal,
        }
    }

    /// Validate the wrapped sample
    ///
    /// # Errors
    ///
    /// Returns the first validation failure of the wrapped sample.
    pub fn validate(&self) -> AppResult<()> {
        match self {
            Self::Weight(sample) => sample.validate(),
            Self::Activity(sample) => sample.validate(),
            Self::Meal(sample) => sample.validate(),
        }
    }
}

/// Stored sample with identity and timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleRecord {
    /// Sample identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: String,
    /// When the sample was stored
    pub recorded_at: DateTime<Utc>,
    /// Sample data including its `kind` tag
    #[serde(flatten)]
    pub payload: SamplePayload,
}

fn ensure_present(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::invalid_input(format!("{field} is required")));
    }
    Ok(())
}

fn ensure_non_negative(field: &str, value: Option<f64>) -> AppResult<()> {
    match value {
        Some(v) if v.is_nan() || v < 0.0 => Err(AppError::out_of_range(
            field,
            format!("{field} must not be negative"),
        )),
        _ => Ok(()),
    }
}
