//! Set and term persistence used by the import and export routes

use async_trait::async_trait;
use uuid::Uuid;
use vocab_core::store::StoreResult;
use vocab_core::{InMemoryStore, NewTerm, TermStore};

/// Default name for a set imported without one.
pub const DEFAULT_SET_NAME: &str = "Bộ từ";

/// Metadata for a new vocabulary set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVocabSet {
    pub name: String,
    pub description: Option<String>,
    pub language_from: String,
    pub language_to: String,
}

impl Default for NewVocabSet {
    fn default() -> Self {
        Self {
            name: DEFAULT_SET_NAME.to_string(),
            description: None,
            language_from: "en".to_string(),
            language_to: "vi".to_string(),
        }
    }
}

/// Storage for sets and terms on top of review progress.
#[async_trait]
pub trait VocabStore: TermStore {
    async fn create_set(&self, set: NewVocabSet) -> StoreResult<Uuid>;

    async fn set_exists(&self, set_id: Uuid) -> StoreResult<bool>;

    /// Append terms to an existing set and return how many were stored.
    async fn add_terms(&self, set_id: Uuid, terms: Vec<NewTerm>) -> StoreResult<usize>;
}

#[async_trait]
impl VocabStore for InMemoryStore {
    async fn create_set(&self, _set: NewVocabSet) -> StoreResult<Uuid> {
        Ok(InMemoryStore::create_set(self))
    }

    async fn set_exists(&self, set_id: Uuid) -> StoreResult<bool> {
        Ok(self.contains_set(set_id))
    }

    async fn add_terms(&self, set_id: Uuid, terms: Vec<NewTerm>) -> StoreResult<usize> {
        Ok(InMemoryStore::add_terms(self, set_id, terms).len())
    }
}
