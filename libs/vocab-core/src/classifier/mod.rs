//! Column classifier.
//!
//! Infers which spreadsheet column holds the word, part of speech,
//! meaning, pronunciation and example of each vocabulary row. Two scorers
//! run per header and category and their scores are summed:
//!
//! - header scorer: keyword substrings found in the header name
//! - content scorer: hit ratio of per-cell heuristics over a sample
//!
//! Categories then claim headers greedily in [`Category::ASSIGNMENT_ORDER`].
//! This is an intentional approximation of an optimal matching: resolving
//! part of speech first keeps its column from being taken by the word
//! scorer, which also rates short POS tokens highly.

pub mod content;
pub mod profile;

use serde::{Deserialize, Serialize};

use crate::decode::Table;
use crate::types::{Category, ColumnMapping};
use profile::{profile, CONTENT_SAMPLE_SIZE, HEADER_KEYWORD_SCORE, POS_BOOST_RATIO, POS_BOOST_SCORE};

/// Result of classifying a table's columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub mapping: ColumnMapping,
    pub headers: Vec<String>,
}

/// Per-category scores for one header.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderScores {
    pub header: String,
    scores: [f64; 5],
}

impl HeaderScores {
    fn new(header: &str) -> Self {
        Self {
            header: header.to_string(),
            scores: [0.0; 5],
        }
    }

    pub fn get(&self, category: Category) -> f64 {
        self.scores[slot(category)]
    }

    fn add(&mut self, category: Category, value: f64) {
        self.scores[slot(category)] += value;
    }
}

fn slot(category: Category) -> usize {
    match category {
        Category::Word => 0,
        Category::PartOfSpeech => 1,
        Category::Meaning => 2,
        Category::Pronunciation => 3,
        Category::Example => 4,
    }
}

/// Header-name score: [`HEADER_KEYWORD_SCORE`] per matching keyword.
pub fn header_score(header: &str, category: Category) -> f64 {
    let lower = header.to_lowercase();
    profile(category)
        .header_keywords
        .iter()
        .filter(|kw| lower.contains(*kw))
        .count() as f64
        * HEADER_KEYWORD_SCORE
}

/// Content score of one column for every category.
///
/// Samples up to [`CONTENT_SAMPLE_SIZE`] non-empty cells. A column with no
/// non-empty cells scores zero everywhere.
pub fn content_scores<'a>(cells: impl IntoIterator<Item = &'a str>) -> [f64; 5] {
    let sample: Vec<&str> = cells
        .into_iter()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .take(CONTENT_SAMPLE_SIZE)
        .collect();

    let mut scores = [0.0; 5];
    if sample.is_empty() {
        return scores;
    }

    let total = sample.len() as f64;
    for category in Category::ASSIGNMENT_ORDER {
        let hits = sample
            .iter()
            .filter(|cell| content::matches(category, cell))
            .count();
        let ratio = hits as f64 / total;

        scores[slot(category)] = match category {
            Category::PartOfSpeech if ratio >= POS_BOOST_RATIO => POS_BOOST_SCORE,
            _ => profile(category).content_weight * ratio,
        };
    }

    scores
}

/// Combined header and content scores for every column of `table`.
pub fn score_columns(table: &Table) -> Vec<HeaderScores> {
    table
        .headers()
        .iter()
        .enumerate()
        .map(|(index, header)| {
            let mut scores = HeaderScores::new(header);
            let content = content_scores(table.column(index));
            for category in Category::ASSIGNMENT_ORDER {
                scores.add(category, header_score(header, category));
                scores.add(category, content[slot(category)]);
            }
            scores
        })
        .collect()
}

/// Greedily assign headers to categories from precomputed scores.
///
/// For each category in priority order the unassigned header with the
/// highest score wins (first header on ties), provided the score reaches
/// the category threshold.
pub fn assign(scores: &[HeaderScores]) -> ColumnMapping {
    let mut mapping = ColumnMapping::new();

    for category in Category::ASSIGNMENT_ORDER {
        let mut best: Option<&HeaderScores> = None;
        let mut best_score = 0.0;

        for candidate in scores {
            if mapping.contains_header(&candidate.header) {
                continue;
            }
            let score = candidate.get(category);
            if score > best_score {
                best_score = score;
                best = Some(candidate);
            }
        }

        let threshold = profile(category).threshold;
        match best {
            Some(candidate) if best_score >= threshold => {
                tracing::debug!(
                    category = category.as_str(),
                    header = %candidate.header,
                    score = best_score,
                    "assigned column"
                );
                mapping.assign(category, candidate.header.clone());
            }
            _ => {
                tracing::debug!(
                    category = category.as_str(),
                    best_score,
                    threshold,
                    "left category unassigned"
                );
            }
        }
    }

    mapping
}

/// Classify the columns of `table`.
///
/// Never fails: ambiguous categories are simply left out of the mapping.
/// An empty table yields an empty mapping.
pub fn classify_columns(table: &Table) -> Classification {
    let headers = table.headers().to_vec();
    if table.is_empty() {
        return Classification {
            mapping: ColumnMapping::new(),
            headers,
        };
    }

    let scores = score_columns(table);
    Classification {
        mapping: assign(&scores),
        headers,
    }
}
