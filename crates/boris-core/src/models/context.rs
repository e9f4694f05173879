// ABOUTME: Structured health context attached to a coaching question
// ABOUTME: Recent numeric samples that are serialized into the prompt as compact JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

use serde::{Deserialize, Serialize};

/// Recent numeric samples a client may send along with a question
///
/// Absent values are left out of the serialized form. Unknown fields sent by
/// clients are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthContext {
    /// Latest body weight in kilograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Steps today
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<u64>,
    /// Calories eaten today
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    /// Resting heart rate in bpm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<f64>,
    /// Hours slept last night
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f64>,
}

impl HealthContext {
    /// True when no sample is set
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.weight.is_none()
            && self.steps.is_none()
            && self.calories.is_none()
            && self.heart_rate.is_none()
            && self.sleep_hours.is_none()
    }
}
