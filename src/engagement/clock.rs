// ABOUTME: Calendar-day source for streak computation
// ABOUTME: System clock uses the UTC day; a settable clock drives tests across day boundaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

use std::sync::{PoisonError, RwLock};

use chrono::{Days, NaiveDate, Utc};

/// Supplies "today" for engagement updates
pub trait Clock: Send + Sync {
    /// Current calendar day
    fn today(&self) -> NaiveDate;
}

/// Server clock; the calendar day is the UTC date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Clock pinned to a day that only moves when told to
#[derive(Debug)]
pub struct FixedClock {
    today: RwLock<NaiveDate>,
}

impl FixedClock {
    /// Clock reporting `today` until changed
    #[must_use]
    pub const fn new(today: NaiveDate) -> Self {
        Self {
            today: RwLock::new(today),
        }
    }

    /// Jump to `day`
    pub fn set(&self, day: NaiveDate) {
        *self.today.write().unwrap_or_else(PoisonError::into_inner) = day;
    }

    /// Move forward by `days`
    pub fn advance_days(&self, days: u64) {
        let mut today = self.today.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(next) = today.checked_add_days(Days::new(days)) {
            *today = next;
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.today.read().unwrap_or_else(PoisonError::into_inner)
    }
}
