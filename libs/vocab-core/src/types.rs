//! Core types for vocabulary import and review.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ReviewError;

/// Semantic meaning of a spreadsheet column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Word,
    PartOfSpeech,
    Meaning,
    Pronunciation,
    Example,
}

impl Category {
    /// Order in which categories claim headers during assignment.
    ///
    /// Part of speech goes first: its closed vocabulary is the strongest
    /// signal and short POS cells would otherwise score well as words.
    pub const ASSIGNMENT_ORDER: [Category; 5] = [
        Category::PartOfSpeech,
        Category::Word,
        Category::Meaning,
        Category::Pronunciation,
        Category::Example,
    ];

    /// Categories an import cannot proceed without.
    pub const REQUIRED: [Category; 2] = [Category::Word, Category::Meaning];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::PartOfSpeech => "part_of_speech",
            Self::Meaning => "meaning",
            Self::Pronunciation => "pronunciation",
            Self::Example => "example",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transient mapping from category to the header assigned to it.
///
/// A header appears at most once; categories may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMapping(BTreeMap<Category, String>);

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: Category) -> Option<&str> {
        self.0.get(&category).map(String::as_str)
    }

    /// Assign `header` to `category`, replacing any previous assignment.
    ///
    /// Returns false (and changes nothing) when the header is already
    /// taken by a different category.
    pub fn assign(&mut self, category: Category, header: impl Into<String>) -> bool {
        let header = header.into();
        if self
            .0
            .iter()
            .any(|(c, h)| *c != category && *h == header)
        {
            return false;
        }
        self.0.insert(category, header);
        true
    }

    pub fn contains_header(&self, header: &str) -> bool {
        self.0.values().any(|h| h == header)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &str)> {
        self.0.iter().map(|(c, h)| (*c, h.as_str()))
    }

    /// Required categories with no assigned header.
    pub fn missing_required(&self) -> Vec<Category> {
        Category::REQUIRED
            .into_iter()
            .filter(|c| !self.0.contains_key(c))
            .collect()
    }
}

/// One vocabulary entry belonging to a set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub id: Uuid,
    pub set_id: Uuid,
    pub word: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
    pub meaning: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl Term {
    /// Give an imported term an identity inside `set_id`.
    pub fn from_new(set_id: Uuid, new: NewTerm) -> Self {
        Self {
            id: Uuid::new_v4(),
            set_id,
            word: new.word,
            part_of_speech: new.part_of_speech,
            meaning: new.meaning,
            pronunciation: new.pronunciation,
            example: new.example,
        }
    }
}

/// Term content extracted from a spreadsheet row, before it has an ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTerm {
    pub word: String,
    pub part_of_speech: Option<String>,
    pub meaning: String,
    pub pronunciation: Option<String>,
    pub example: Option<String>,
}

/// Scheduling state carried between reviews.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReviewState {
    pub easiness: f64,
    pub repetitions: u32,
    pub interval_days: u32,
}

impl Default for ReviewState {
    fn default() -> Self {
        Self {
            easiness: 2.5,
            repetitions: 0,
            interval_days: 1,
        }
    }
}

/// Per-user review state for one term. Keyed by `(term_id, user_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub term_id: Uuid,
    pub user_id: String,
    pub easiness: f64,
    pub repetitions: u32,
    pub interval_days: u32,
    pub next_review_date: NaiveDate,
    pub last_review_timestamp: DateTime<Utc>,
}

impl ProgressRecord {
    pub fn state(&self) -> ReviewState {
        ReviewState {
            easiness: self.easiness,
            repetitions: self.repetitions,
            interval_days: self.interval_days,
        }
    }

    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.next_review_date <= today
    }
}

/// Self-assessed recall quality, 0 (blackout) to 5 (perfect).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Quality(u8);

impl Quality {
    pub const MAX: u8 = 5;

    /// Validate a raw rating. Out-of-range values are rejected, never clamped.
    pub fn new(value: i32) -> Result<Self, ReviewError> {
        match u8::try_from(value) {
            Ok(v) if v <= Self::MAX => Ok(Self(v)),
            _ => Err(ReviewError::InvalidRating(value)),
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Ratings below 3 count as a failed recall.
    pub fn is_lapse(self) -> bool {
        self.0 < 3
    }
}

impl TryFrom<i32> for Quality {
    type Error = ReviewError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Where a term sits in the review cycle for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningStage {
    Unseen,
    Learning,
    Young,
    Mature,
}

impl LearningStage {
    /// Interval (days) from which a term counts as mature.
    pub const MATURE_INTERVAL_DAYS: u32 = 21;

    pub fn of(record: Option<&ProgressRecord>) -> Self {
        match record {
            None => Self::Unseen,
            Some(r) if r.repetitions == 0 => Self::Learning,
            Some(r) if r.interval_days >= Self::MATURE_INTERVAL_DAYS => Self::Mature,
            Some(_) => Self::Young,
        }
    }
}

/// Result of recording an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub next_review_date: NaiveDate,
    pub interval_days: u32,
}

/// One answer option in a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: Uuid,
    pub meaning: String,
}

/// A term to quiz plus its shuffled answer options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceQuestion {
    pub term: Term,
    pub options: Vec<ChoiceOption>,
}
