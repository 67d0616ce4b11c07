//! PostgreSQL database operations

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;
use vocab_core::store::StoreResult;
use vocab_core::{StoreError, TermStore};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::services::vocab::{NewVocabSet, VocabStore};

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Database(e.into()))?;
        Ok(())
    }

    // === Set Repository ===

    pub async fn insert_set(&self, set: &NewVocabSet) -> Result<VocabSet> {
        let row = sqlx::query_as::<_, VocabSet>(
            r#"
            INSERT INTO vocab_sets (id, name, description, language_from, language_to)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, language_from, language_to, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&set.name)
        .bind(&set.description)
        .bind(&set.language_from)
        .bind(&set.language_to)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_set(&self, set_id: Uuid) -> Result<Option<VocabSet>> {
        let row = sqlx::query_as::<_, VocabSet>(
            r#"
            SELECT id, name, description, language_from, language_to, created_at
            FROM vocab_sets
            WHERE id = $1
            "#,
        )
        .bind(set_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    // === Term Repository ===

    /// Insert terms in one transaction, keeping their order.
    pub async fn insert_terms(&self, set_id: Uuid, terms: Vec<NewTerm>) -> Result<usize> {
        let mut tx = self.pool.begin().await?;
        let count = terms.len();

        for term in terms {
            sqlx::query(
                r#"
                INSERT INTO terms (id, set_id, word, part_of_speech, meaning, pronunciation, example)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(set_id)
            .bind(&term.word)
            .bind(&term.part_of_speech)
            .bind(&term.meaning)
            .bind(&term.pronunciation)
            .bind(&term.example)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(count)
    }

    pub async fn get_terms(&self, set_id: Uuid) -> Result<Vec<Term>> {
        let rows = sqlx::query_as::<_, DbTerm>(
            r#"
            SELECT id, set_id, word, part_of_speech, meaning, pronunciation, example
            FROM terms
            WHERE set_id = $1
            ORDER BY position
            "#,
        )
        .bind(set_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(DbTerm::into_term).collect())
    }

    // === Progress Repository ===

    pub async fn get_progress_row(&self, term_id: Uuid, user_id: &str) -> Result<Option<ProgressRecord>> {
        let row = sqlx::query_as::<_, DbProgress>(
            r#"
            SELECT term_id, user_id, easiness, repetitions, interval_days,
                   next_review_date, last_review_timestamp
            FROM progress
            WHERE term_id = $1 AND user_id = $2
            "#,
        )
        .bind(term_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(DbProgress::into_record))
    }

    pub async fn get_set_progress(&self, set_id: Uuid, user_id: &str) -> Result<Vec<ProgressRecord>> {
        let rows = sqlx::query_as::<_, DbProgress>(
            r#"
            SELECT p.term_id, p.user_id, p.easiness, p.repetitions, p.interval_days,
                   p.next_review_date, p.last_review_timestamp
            FROM progress p
            JOIN terms t ON t.id = p.term_id
            WHERE t.set_id = $1 AND p.user_id = $2
            "#,
        )
        .bind(set_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(DbProgress::into_record).collect())
    }

    /// Upsert progress by (term_id, user_id)
    pub async fn upsert_progress(&self, record: &ProgressRecord) -> Result<()> {
        let repetitions = to_db_int("repetitions", record.repetitions)?;
        let interval_days = to_db_int("interval_days", record.interval_days)?;

        sqlx::query(
            r#"
            INSERT INTO progress (term_id, user_id, easiness, repetitions, interval_days,
                                  next_review_date, last_review_timestamp)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (term_id, user_id) DO UPDATE SET
                easiness = EXCLUDED.easiness,
                repetitions = EXCLUDED.repetitions,
                interval_days = EXCLUDED.interval_days,
                next_review_date = EXCLUDED.next_review_date,
                last_review_timestamp = EXCLUDED.last_review_timestamp
            "#,
        )
        .bind(record.term_id)
        .bind(&record.user_id)
        .bind(record.easiness)
        .bind(repetitions)
        .bind(interval_days)
        .bind(record.next_review_date)
        .bind(record.last_review_timestamp)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Convert a progress counter to an INTEGER column value.
fn to_db_int(column: &str, value: u32) -> Result<i32> {
    i32::try_from(value)
        .map_err(|_| ApiError::Internal(format!("{} out of range for storage: {}", column, value)))
}

#[async_trait]
impl TermStore for Database {
    async fn list_terms(&self, set_id: Uuid) -> StoreResult<Vec<Term>> {
        self.get_terms(set_id).await.map_err(StoreError::new)
    }

    async fn get_progress(&self, term_id: Uuid, user_id: &str) -> StoreResult<Option<ProgressRecord>> {
        self.get_progress_row(term_id, user_id)
            .await
            .map_err(StoreError::new)
    }

    async fn list_progress(&self, set_id: Uuid, user_id: &str) -> StoreResult<Vec<ProgressRecord>> {
        self.get_set_progress(set_id, user_id)
            .await
            .map_err(StoreError::new)
    }

    async fn save_progress(&self, record: &ProgressRecord) -> StoreResult<()> {
        self.upsert_progress(record).await.map_err(StoreError::new)
    }
}

#[async_trait]
impl VocabStore for Database {
    async fn create_set(&self, set: NewVocabSet) -> StoreResult<Uuid> {
        let row = self.insert_set(&set).await.map_err(StoreError::new)?;
        tracing::info!(set_id = %row.id, name = %row.name, "created vocab set");
        Ok(row.id)
    }

    async fn set_exists(&self, set_id: Uuid) -> StoreResult<bool> {
        let set = self.get_set(set_id).await.map_err(StoreError::new)?;
        Ok(set.is_some())
    }

    async fn add_terms(&self, set_id: Uuid, terms: Vec<NewTerm>) -> StoreResult<usize> {
        self.insert_terms(set_id, terms).await.map_err(StoreError::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_within_range_convert() {
        assert_eq!(to_db_int("interval_days", 36_500).unwrap(), 36_500);
    }

    #[test]
    fn counters_beyond_integer_range_are_rejected() {
        let result = to_db_int("repetitions", u32::MAX);
        assert!(matches!(result, Err(ApiError::Internal(msg)) if msg.contains("repetitions")));
    }
}
