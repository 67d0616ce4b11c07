//! Database models and API types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Re-export shared types from vocab-core
pub use vocab_core::types::{
    AnswerOutcome, Category, ChoiceOption, ChoiceQuestion, ColumnMapping, NewTerm,
    ProgressRecord, Term,
};
pub use vocab_core::{ColumnOverrides, ImportPreview, StudySummary};

// === Database Entity Types ===

/// Vocabulary set stored in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VocabSet {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub language_from: String,
    pub language_to: String,
    pub created_at: DateTime<Utc>,
}

/// Term stored in PostgreSQL
#[derive(Debug, Clone, FromRow)]
pub struct DbTerm {
    pub id: Uuid,
    pub set_id: Uuid,
    pub word: String,
    pub part_of_speech: Option<String>,
    pub meaning: String,
    pub pronunciation: Option<String>,
    pub example: Option<String>,
}

impl DbTerm {
    /// Convert to vocab-core Term
    pub fn into_term(self) -> Term {
        Term {
            id: self.id,
            set_id: self.set_id,
            word: self.word,
            part_of_speech: self.part_of_speech,
            meaning: self.meaning,
            pronunciation: self.pronunciation,
            example: self.example,
        }
    }
}

/// Progress row in PostgreSQL
#[derive(Debug, Clone, FromRow)]
pub struct DbProgress {
    pub term_id: Uuid,
    pub user_id: String,
    pub easiness: f64,
    pub repetitions: i32,
    pub interval_days: i32,
    pub next_review_date: NaiveDate,
    pub last_review_timestamp: DateTime<Utc>,
}

impl DbProgress {
    /// Convert to vocab-core ProgressRecord
    pub fn into_record(self) -> ProgressRecord {
        ProgressRecord {
            term_id: self.term_id,
            user_id: self.user_id,
            easiness: self.easiness,
            repetitions: self.repetitions.max(0) as u32,
            interval_days: self.interval_days.max(0) as u32,
            next_review_date: self.next_review_date,
            last_review_timestamp: self.last_review_timestamp,
        }
    }
}

// === API Request/Response Types ===

/// Query string for POST /api/import
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportQuery {
    /// Append to an existing set instead of creating one
    pub set_id: Option<Uuid>,
    pub set_name: Option<String>,
    pub language_from: Option<String>,
    pub language_to: Option<String>,
    pub word_col: Option<String>,
    pub pos_col: Option<String>,
    pub meaning_col: Option<String>,
    pub pronunciation_col: Option<String>,
    pub example_col: Option<String>,
}

impl ImportQuery {
    pub fn overrides(&self) -> ColumnOverrides {
        ColumnOverrides {
            word: self.word_col.clone(),
            part_of_speech: self.pos_col.clone(),
            meaning: self.meaning_col.clone(),
            pronunciation: self.pronunciation_col.clone(),
            example: self.example_col.clone(),
        }
    }
}

/// Response for POST /api/import
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResponse {
    pub set_id: Uuid,
    pub mapping: ColumnMapping,
    pub inserted: usize,
    pub skipped: usize,
}

/// Request for POST /api/study/next and /api/study/choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyRequest {
    pub set_id: Uuid,
    pub user_id: String,
}

/// Response for POST /api/study/next
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextTermResponse {
    pub term: Option<Term>,
}

/// Request for POST /api/study/answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub term_id: Uuid,
    pub user_id: String,
    pub rating: i32,
}

/// Response for POST /api/study/choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceResponse {
    pub term: Option<Term>,
    pub options: Vec<ChoiceOption>,
}

impl From<Option<ChoiceQuestion>> for ChoiceResponse {
    fn from(question: Option<ChoiceQuestion>) -> Self {
        match question {
            Some(q) => Self {
                term: Some(q.term),
                options: q.options,
            },
            None => Self {
                term: None,
                options: Vec::new(),
            },
        }
    }
}

/// Query string for GET /api/sets/:set_id/export
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportQuery {
    /// `csv` (default) or `xlsx`
    pub format: Option<String>,
}

/// Query string for GET /api/sets/:set_id/summary
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryQuery {
    pub user_id: String,
}
