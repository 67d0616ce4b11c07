//! SM-2 spaced repetition algorithm.
//!
//! Deterministic SuperMemo 2: a rating below 3 resets the repetition
//! count and interval, otherwise the interval goes 1, 6, then grows by the
//! easiness factor. Easiness is adjusted on every review and floored.

use super::{SchedulingResult, SpacedRepetitionAlgorithm};
use crate::types::{Quality, ReviewState};
use chrono::{Days, NaiveDate};

/// SM-2 algorithm with configurable parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub initial_easiness: f64,
    pub minimum_easiness: f64,
    /// Upper bound on the interval, in days.
    pub maximum_interval_days: u32,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_easiness: 2.5,
            minimum_easiness: 1.3,
            maximum_interval_days: 36_500,
        }
    }
}

impl SpacedRepetitionAlgorithm for Sm2 {
    fn name(&self) -> &'static str {
        "sm2"
    }

    fn initial_state(&self) -> ReviewState {
        ReviewState {
            easiness: self.initial_easiness,
            repetitions: 0,
            interval_days: 1,
        }
    }

    fn schedule(&self, state: &ReviewState, quality: Quality, today: NaiveDate) -> SchedulingResult {
        let new_state = self.update(state, quality);
        let next_review_date = today
            .checked_add_days(Days::new(u64::from(new_state.interval_days)))
            .unwrap_or(NaiveDate::MAX);

        SchedulingResult {
            new_state,
            next_review_date,
        }
    }
}

impl Sm2 {
    /// Pure state transition for one rating.
    pub fn update(&self, state: &ReviewState, quality: Quality) -> ReviewState {
        let (repetitions, interval_days) = if quality.is_lapse() {
            (0, 1)
        } else {
            let interval = match state.repetitions {
                0 => 1,
                1 => 6,
                _ => (f64::from(state.interval_days) * state.easiness).floor() as u32,
            };
            (
                state.repetitions.saturating_add(1),
                interval.min(self.maximum_interval_days),
            )
        };

        let q = f64::from(Quality::MAX - quality.value());
        let easiness = (state.easiness + (0.1 - q * (0.08 + q * 0.02))).max(self.minimum_easiness);

        ReviewState {
            easiness,
            repetitions,
            interval_days,
        }
    }
}
