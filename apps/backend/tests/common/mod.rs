//! Common test utilities and fixtures for integration tests.
//!
//! `TestContext::new` runs the full router over an in-memory store with a
//! fixed clock. `TestContext::with_database` needs PostgreSQL (set
//! DATABASE_URL) and is used by the ignored tests.

#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use vocab_core::{FixedClock, InMemoryStore, NewTerm, Term, TermStore};
use vocab_review_backend::db::Database;
use vocab_review_backend::services::vocab::{NewVocabSet, VocabStore};
use vocab_review_backend::{build_router, AppState};

/// Instant all in-memory tests run at.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 1, 9, 0, 0).unwrap()
}

/// Test context containing a store and the router built over it.
pub struct TestContext {
    pub store: Arc<dyn VocabStore>,
    app: Router,
}

impl TestContext {
    /// Create a context backed by an in-memory store.
    pub fn new() -> Self {
        let store: Arc<dyn VocabStore> = Arc::new(InMemoryStore::new());
        let state = AppState::with_clock(store.clone(), Arc::new(FixedClock(test_now())));
        Self {
            app: build_router(state),
            store,
        }
    }

    /// Create a context backed by PostgreSQL.
    ///
    /// # Panics
    /// Panics if DATABASE_URL is not set or database connection fails.
    pub async fn with_database() -> Self {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

        let db = Database::connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        db.run_migrations()
            .await
            .expect("Failed to run migrations");

        let store: Arc<dyn VocabStore> = Arc::new(db);
        Self {
            app: build_router(AppState::new(store.clone())),
            store,
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).unwrap()
    }

    /// Create a set holding one term per word and return it with its terms.
    pub async fn seed_set(&self, words: &[&str]) -> (Uuid, Vec<Term>) {
        let set_id = self
            .store
            .create_set(NewVocabSet::default())
            .await
            .expect("Failed to create set");
        let terms: Vec<NewTerm> = words.iter().map(|w| fixtures::new_term(w)).collect();
        self.store
            .add_terms(set_id, terms)
            .await
            .expect("Failed to add terms");
        let terms = self
            .store
            .list_terms(set_id)
            .await
            .expect("Failed to list terms");
        (set_id, terms)
    }
}
