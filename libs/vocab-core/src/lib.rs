//! Core vocabulary library shared by the backend service.
//!
//! Provides:
//! - CSV and XLSX decoding, with encoding fallback for CSV
//! - Column classifier (word, part of speech, meaning, pronunciation, example)
//! - Import and CSV/XLSX export of terms
//! - SM-2 scheduler, due-term selection and multiple-choice distractors
//! - The `TermStore` seam plus an in-memory implementation

pub mod algorithm;
pub mod classifier;
pub mod clock;
pub mod decode;
pub mod distractor;
pub mod error;
pub mod export;
pub mod import;
pub mod selection;
pub mod service;
pub mod store;
pub mod types;

pub use algorithm::{SchedulingResult, SpacedRepetitionAlgorithm};
pub use classifier::{classify_columns, Classification};
pub use clock::{Clock, FixedClock, SystemClock};
pub use decode::{decode_rows, is_xlsx, CsvDecoder, Decoder, Table, XlsxDecoder};
pub use error::{ImportError, ReviewError, StoreError};
pub use export::{export_csv, export_xlsx};
pub use import::{build_terms, preview, ColumnOverrides, ImportBatch, ImportPreview};
pub use selection::{select_next, StudySummary};
pub use service::ReviewService;
pub use store::{InMemoryStore, TermStore};
pub use types::{
    AnswerOutcome, Category, ChoiceOption, ChoiceQuestion, ColumnMapping, LearningStage, NewTerm,
    ProgressRecord, Quality, ReviewState, Term,
};
