//! Spaced repetition algorithm implementations.

pub mod sm2;

use crate::types::{Quality, ReviewState};
use chrono::NaiveDate;

/// Result of scheduling a term after review.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulingResult {
    pub new_state: ReviewState,
    pub next_review_date: NaiveDate,
}

/// Trait for spaced repetition algorithms.
pub trait SpacedRepetitionAlgorithm: Send + Sync {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Calculate next review state after a review on `today` (UTC date).
    fn schedule(&self, state: &ReviewState, quality: Quality, today: NaiveDate) -> SchedulingResult;

    /// Initial state for a term the user has never answered.
    fn initial_state(&self) -> ReviewState;
}
