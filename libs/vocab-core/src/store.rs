//! Term and progress storage consumed by the review service.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::types::{NewTerm, ProgressRecord, Term};

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Persistence for terms and per-user progress.
///
/// `save_progress` upserts by `(term_id, user_id)`; concurrent writes to
/// the same key are last-write-wins.
#[async_trait]
pub trait TermStore: Send + Sync {
    /// Terms of a set in their original order.
    async fn list_terms(&self, set_id: Uuid) -> StoreResult<Vec<Term>>;

    async fn get_progress(&self, term_id: Uuid, user_id: &str) -> StoreResult<Option<ProgressRecord>>;

    /// Progress of `user_id` for every answered term of a set.
    async fn list_progress(&self, set_id: Uuid, user_id: &str) -> StoreResult<Vec<ProgressRecord>>;

    async fn save_progress(&self, record: &ProgressRecord) -> StoreResult<()>;
}

#[derive(Debug, Default)]
struct Inner {
    sets: HashMap<Uuid, Vec<Term>>,
    progress: HashMap<(Uuid, String), ProgressRecord>,
}

/// In-process store keyed by `(term_id, user_id)`.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an empty set and return its ID.
    pub fn create_set(&self) -> Uuid {
        let set_id = Uuid::new_v4();
        self.write().sets.insert(set_id, Vec::new());
        set_id
    }

    /// Append terms to a set (created on demand), preserving order.
    pub fn add_terms(&self, set_id: Uuid, terms: Vec<NewTerm>) -> Vec<Term> {
        let terms: Vec<Term> = terms.into_iter().map(|t| Term::from_new(set_id, t)).collect();
        self.write()
            .sets
            .entry(set_id)
            .or_default()
            .extend(terms.iter().cloned());
        terms
    }

    /// Delete a set with its terms and their progress.
    pub fn delete_set(&self, set_id: Uuid) -> bool {
        let mut inner = self.write();
        match inner.sets.remove(&set_id) {
            Some(terms) => {
                inner
                    .progress
                    .retain(|(term_id, _), _| !terms.iter().any(|t| t.id == *term_id));
                true
            }
            None => false,
        }
    }

    /// Delete one term and its progress.
    pub fn delete_term(&self, term_id: Uuid) -> bool {
        let mut inner = self.write();
        let mut removed = false;
        for terms in inner.sets.values_mut() {
            let before = terms.len();
            terms.retain(|t| t.id != term_id);
            removed |= terms.len() != before;
        }
        inner.progress.retain(|(id, _), _| *id != term_id);
        removed
    }

    pub fn contains_set(&self, set_id: Uuid) -> bool {
        self.read().sets.contains_key(&set_id)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl TermStore for InMemoryStore {
    async fn list_terms(&self, set_id: Uuid) -> StoreResult<Vec<Term>> {
        Ok(self.read().sets.get(&set_id).cloned().unwrap_or_default())
    }

    async fn get_progress(&self, term_id: Uuid, user_id: &str) -> StoreResult<Option<ProgressRecord>> {
        Ok(self
            .read()
            .progress
            .get(&(term_id, user_id.to_string()))
            .cloned())
    }

    async fn list_progress(&self, set_id: Uuid, user_id: &str) -> StoreResult<Vec<ProgressRecord>> {
        let inner = self.read();
        let Some(terms) = inner.sets.get(&set_id) else {
            return Ok(Vec::new());
        };
        Ok(terms
            .iter()
            .filter_map(|t| inner.progress.get(&(t.id, user_id.to_string())).cloned())
            .collect())
    }

    async fn save_progress(&self, record: &ProgressRecord) -> StoreResult<()> {
        self.write()
            .progress
            .insert((record.term_id, record.user_id.clone()), record.clone());
        Ok(())
    }
}
