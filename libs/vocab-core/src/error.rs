//! Error types for vocab-core.

use thiserror::Error;

use crate::types::Category;

/// Result type alias for import operations.
pub type Result<T> = std::result::Result<T, ImportError>;

/// Errors that can occur while turning spreadsheet bytes into terms.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("unsupported format: no supported text encoding could parse the input")]
    Decoding,

    #[error("could not determine required columns: {}", format_categories(.missing))]
    MissingRequiredColumns { missing: Vec<Category> },

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::XlsxError),

    #[error("xlsx write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("column {header} is assigned to both {first} and {second}")]
    DuplicateOverride {
        header: String,
        first: Category,
        second: Category,
    },
}

/// Errors raised by the review scheduler.
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("invalid rating {0}: quality must be between 0 and 5")]
    InvalidRating(i32),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Opaque failure reported by a term/progress store implementation.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct StoreError(Box<dyn std::error::Error + Send + Sync>);

impl StoreError {
    pub fn new<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self(Box::new(error))
    }
}

fn format_categories(categories: &[Category]) -> String {
    categories
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
