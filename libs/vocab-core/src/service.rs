//! Review operations over a [`TermStore`].

use std::sync::Arc;

use rand::Rng;
use uuid::Uuid;

use crate::algorithm::sm2::Sm2;
use crate::algorithm::SpacedRepetitionAlgorithm;
use crate::clock::{Clock, SystemClock};
use crate::distractor::build_options;
use crate::error::ReviewError;
use crate::selection::{progress_by_term, select_next, StudySummary};
use crate::store::TermStore;
use crate::types::{AnswerOutcome, ChoiceQuestion, ProgressRecord, Quality, Term};

pub type Result<T> = std::result::Result<T, ReviewError>;

/// Scheduler entry points: pick the next term, record answers, build
/// multiple-choice questions.
pub struct ReviewService<S: ?Sized> {
    store: Arc<S>,
    algorithm: Sm2,
    clock: Arc<dyn Clock>,
}

impl<S: ?Sized> Clone for ReviewService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            algorithm: self.algorithm.clone(),
            clock: self.clock.clone(),
        }
    }
}

impl<S> ReviewService<S>
where
    S: TermStore + ?Sized,
{
    pub fn new(store: Arc<S>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            algorithm: Sm2::default(),
            clock,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Next term to present to `user_id`, or `None` for an empty set.
    pub async fn select_next(&self, set_id: Uuid, user_id: &str) -> Result<Option<Term>> {
        let (terms, progress) = self.load(set_id, user_id).await?;
        let progress = progress_by_term(progress);
        Ok(select_next(&terms, &progress, self.clock.today()).cloned())
    }

    /// Apply a quality rating and persist the new progress.
    ///
    /// The rating is validated before anything is read or written.
    pub async fn record_answer(
        &self,
        term_id: Uuid,
        user_id: &str,
        quality: i32,
    ) -> Result<AnswerOutcome> {
        let quality = Quality::new(quality)?;

        let state = self
            .store
            .get_progress(term_id, user_id)
            .await?
            .map(|p| p.state())
            .unwrap_or_else(|| self.algorithm.initial_state());

        let now = self.clock.now();
        let result = self.algorithm.schedule(&state, quality, now.date_naive());

        let record = ProgressRecord {
            term_id,
            user_id: user_id.to_string(),
            easiness: result.new_state.easiness,
            repetitions: result.new_state.repetitions,
            interval_days: result.new_state.interval_days,
            next_review_date: result.next_review_date,
            last_review_timestamp: now,
        };
        self.store.save_progress(&record).await?;

        tracing::debug!(
            %term_id,
            user_id,
            quality = quality.value(),
            easiness = record.easiness,
            repetitions = record.repetitions,
            interval_days = record.interval_days,
            next_review_date = %record.next_review_date,
            "recorded answer"
        );

        Ok(AnswerOutcome {
            next_review_date: record.next_review_date,
            interval_days: record.interval_days,
        })
    }

    /// Multiple-choice question for the next term, using the thread RNG.
    pub async fn build_choice_question(
        &self,
        set_id: Uuid,
        user_id: &str,
    ) -> Result<Option<ChoiceQuestion>> {
        let (terms, progress) = self.load(set_id, user_id).await?;
        Ok(self.question_from(&terms, progress, &mut rand::rng()))
    }

    /// Multiple-choice question for the next term, drawing from `rng`.
    pub async fn build_choice_question_with<R>(
        &self,
        set_id: Uuid,
        user_id: &str,
        rng: &mut R,
    ) -> Result<Option<ChoiceQuestion>>
    where
        R: Rng + ?Sized,
    {
        let (terms, progress) = self.load(set_id, user_id).await?;
        Ok(self.question_from(&terms, progress, rng))
    }

    /// Bucket and stage counts for a set.
    pub async fn summary(&self, set_id: Uuid, user_id: &str) -> Result<StudySummary> {
        let (terms, progress) = self.load(set_id, user_id).await?;
        let progress = progress_by_term(progress);
        Ok(StudySummary::compute(&terms, &progress, self.clock.today()))
    }

    async fn load(&self, set_id: Uuid, user_id: &str) -> Result<(Vec<Term>, Vec<ProgressRecord>)> {
        let terms = self.store.list_terms(set_id).await?;
        if terms.is_empty() {
            return Ok((terms, Vec::new()));
        }
        let progress = self.store.list_progress(set_id, user_id).await?;
        Ok((terms, progress))
    }

    fn question_from<R>(
        &self,
        terms: &[Term],
        progress: Vec<ProgressRecord>,
        rng: &mut R,
    ) -> Option<ChoiceQuestion>
    where
        R: Rng + ?Sized,
    {
        let progress = progress_by_term(progress);
        let chosen = select_next(terms, &progress, self.clock.today())?;
        let options = build_options(chosen, terms, rng);
        Some(ChoiceQuestion {
            term: chosen.clone(),
            options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::store::InMemoryStore;
    use crate::types::NewTerm;
    use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 1, 10, 30, 0).unwrap() + Duration::days(n)
    }

    fn service_on(store: &Arc<InMemoryStore>, n: i64) -> ReviewService<InMemoryStore> {
        ReviewService::with_clock(store.clone(), Arc::new(FixedClock(day(n))))
    }

    fn new_terms(words: &[&str]) -> Vec<NewTerm> {
        words
            .iter()
            .map(|w| NewTerm {
                word: w.to_string(),
                part_of_speech: None,
                meaning: format!("nghĩa của {}", w),
                pronunciation: None,
                example: None,
            })
            .collect()
    }

    #[tokio::test]
    async fn answer_sequence_updates_progress() {
        let store = Arc::new(InMemoryStore::new());
        let set_id = store.create_set();
        let term = store.add_terms(set_id, new_terms(&["apple"])).remove(0);

        let outcome = service_on(&store, 0).record_answer(term.id, "u1", 4).await.unwrap();
        assert_eq!(outcome.interval_days, 1);
        assert_eq!(outcome.next_review_date, NaiveDate::from_ymd_opt(2024, 9, 2).unwrap());
        let p = store.get_progress(term.id, "u1").await.unwrap().unwrap();
        assert_eq!(p.repetitions, 1);
        assert!((p.easiness - 2.5).abs() < 1e-9);

        let outcome = service_on(&store, 1).record_answer(term.id, "u1", 5).await.unwrap();
        assert_eq!(outcome.interval_days, 6);
        let p = store.get_progress(term.id, "u1").await.unwrap().unwrap();
        assert_eq!(p.repetitions, 2);
        assert_eq!(p.next_review_date, p.last_review_timestamp.date_naive() + Duration::days(6));

        let outcome = service_on(&store, 7).record_answer(term.id, "u1", 2).await.unwrap();
        assert_eq!(outcome.interval_days, 1);
        let p = store.get_progress(term.id, "u1").await.unwrap().unwrap();
        assert_eq!(p.repetitions, 0);
    }

    #[tokio::test]
    async fn repeated_perfect_answers_on_single_term_stay_schedulable() {
        let store = Arc::new(InMemoryStore::new());
        let set_id = store.create_set();
        store.add_terms(set_id, new_terms(&["only"]));

        let mut offset = 0;
        for _ in 0..50 {
            let service = service_on(&store, offset);
            let term = service.select_next(set_id, "u1").await.unwrap().unwrap();
            let outcome = service.record_answer(term.id, "u1", 5).await.unwrap();
            assert!(outcome.interval_days <= 36_500);
            assert_eq!(
                outcome.next_review_date,
                day(offset).date_naive() + Duration::days(i64::from(outcome.interval_days))
            );
            offset += i64::from(outcome.interval_days);
        }
    }

    #[tokio::test]
    async fn rating_bounds_are_enforced() {
        let store = Arc::new(InMemoryStore::new());
        let set_id = store.create_set();
        let term = store.add_terms(set_id, new_terms(&["apple"])).remove(0);
        let service = service_on(&store, 0);

        assert!(matches!(
            service.record_answer(term.id, "u1", 6).await,
            Err(ReviewError::InvalidRating(6))
        ));
        assert!(matches!(
            service.record_answer(term.id, "u1", -1).await,
            Err(ReviewError::InvalidRating(-1))
        ));
        assert!(store.get_progress(term.id, "u1").await.unwrap().is_none());
        assert!(service.record_answer(term.id, "u1", 5).await.is_ok());
    }

    #[tokio::test]
    async fn selection_prefers_due_then_unseen() {
        let store = Arc::new(InMemoryStore::new());
        let set_id = store.create_set();
        let terms = store.add_terms(set_id, new_terms(&["due", "unseen", "future"]));

        // "due" answered two days ago (interval 1 => due yesterday),
        // "future" answered today (due tomorrow).
        service_on(&store, -2).record_answer(terms[0].id, "u1", 4).await.unwrap();
        service_on(&store, 0).record_answer(terms[2].id, "u1", 4).await.unwrap();

        let today = service_on(&store, 0);
        let next = today.select_next(set_id, "u1").await.unwrap().unwrap();
        assert_eq!(next.word, "due");

        today.record_answer(next.id, "u1", 5).await.unwrap();
        let next = today.select_next(set_id, "u1").await.unwrap().unwrap();
        assert_eq!(next.word, "unseen");
    }

    #[tokio::test]
    async fn progress_is_per_user() {
        let store = Arc::new(InMemoryStore::new());
        let set_id = store.create_set();
        let terms = store.add_terms(set_id, new_terms(&["a", "b"]));
        let service = service_on(&store, 0);

        service.record_answer(terms[0].id, "alice", 5).await.unwrap();
        assert_eq!(service.select_next(set_id, "alice").await.unwrap().unwrap().word, "b");
        assert_eq!(service.select_next(set_id, "bob").await.unwrap().unwrap().word, "a");
    }

    #[tokio::test]
    async fn empty_set_has_no_question() {
        let store = Arc::new(InMemoryStore::new());
        let set_id = store.create_set();
        let service = service_on(&store, 0);
        assert!(service.select_next(set_id, "u1").await.unwrap().is_none());
        assert!(service.build_choice_question(set_id, "u1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn choice_question_has_four_options() {
        let store = Arc::new(InMemoryStore::new());
        let set_id = store.create_set();
        store.add_terms(set_id, new_terms(&["one", "two", "three", "four", "five"]));
        let service = service_on(&store, 0);

        let mut rng = StdRng::seed_from_u64(3);
        let question = service
            .build_choice_question_with(set_id, "u1", &mut rng)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(question.term.word, "one");
        assert_eq!(question.options.len(), 4);
        assert_eq!(
            question.options.iter().filter(|o| o.id == question.term.id).count(),
            1
        );
    }

    #[tokio::test]
    async fn summary_reflects_answers() {
        let store = Arc::new(InMemoryStore::new());
        let set_id = store.create_set();
        let terms = store.add_terms(set_id, new_terms(&["a", "b", "c"]));
        let service = service_on(&store, 0);
        service.record_answer(terms[0].id, "u1", 1).await.unwrap();

        let summary = service.summary(set_id, "u1").await.unwrap();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.unseen, 2);
        assert_eq!(summary.future, 1);
        assert_eq!(summary.learning, 1);
    }
}
