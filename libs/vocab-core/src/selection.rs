//! Choosing the next term to review.
//!
//! Terms fall into three buckets for a user on a given day: due (review
//! date reached), unseen (never answered) and future. Overdue reviews come
//! before new material, and new material before reviews that are not yet
//! due.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{LearningStage, ProgressRecord, Term};

/// Review bucket of a term on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Due,
    Unseen,
    Future,
}

impl Bucket {
    pub fn of(record: Option<&ProgressRecord>, today: NaiveDate) -> Self {
        match record {
            None => Self::Unseen,
            Some(r) if r.is_due(today) => Self::Due,
            Some(_) => Self::Future,
        }
    }
}

/// Index progress records by term.
pub fn progress_by_term(records: Vec<ProgressRecord>) -> HashMap<Uuid, ProgressRecord> {
    records.into_iter().map(|r| (r.term_id, r)).collect()
}

/// Pick the next term to present.
///
/// Earliest-due term first, then the first unseen term in set order, then
/// the term with the earliest future review date. Ties keep set order.
pub fn select_next<'a>(
    terms: &'a [Term],
    progress: &HashMap<Uuid, ProgressRecord>,
    today: NaiveDate,
) -> Option<&'a Term> {
    let mut due: Option<(NaiveDate, &Term)> = None;
    let mut unseen: Option<&Term> = None;
    let mut future: Option<(NaiveDate, &Term)> = None;

    for term in terms {
        let record = progress.get(&term.id);
        match (Bucket::of(record, today), record) {
            (Bucket::Unseen, _) => {
                unseen.get_or_insert(term);
            }
            (Bucket::Due, Some(r)) => keep_earliest(&mut due, r.next_review_date, term),
            (Bucket::Future, Some(r)) => keep_earliest(&mut future, r.next_review_date, term),
            (_, None) => {}
        }
    }

    due.map(|(_, t)| t)
        .or(unseen)
        .or(future.map(|(_, t)| t))
}

fn keep_earliest<'a>(slot: &mut Option<(NaiveDate, &'a Term)>, date: NaiveDate, term: &'a Term) {
    if slot.map_or(true, |(best, _)| date < best) {
        *slot = Some((date, term));
    }
}

/// Counts of a set's terms per bucket and learning stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySummary {
    pub total: usize,
    pub due: usize,
    pub unseen: usize,
    pub future: usize,
    pub learning: usize,
    pub young: usize,
    pub mature: usize,
}

impl StudySummary {
    pub fn compute(
        terms: &[Term],
        progress: &HashMap<Uuid, ProgressRecord>,
        today: NaiveDate,
    ) -> Self {
        let mut summary = Self {
            total: terms.len(),
            ..Default::default()
        };

        for term in terms {
            let record = progress.get(&term.id);
            match Bucket::of(record, today) {
                Bucket::Due => summary.due += 1,
                Bucket::Unseen => summary.unseen += 1,
                Bucket::Future => summary.future += 1,
            }
            match LearningStage::of(record) {
                LearningStage::Unseen => {}
                LearningStage::Learning => summary.learning += 1,
                LearningStage::Young => summary.young += 1,
                LearningStage::Mature => summary.mature += 1,
            }
        }

        summary
    }
}
