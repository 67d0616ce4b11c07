//! Building term records from a classified table.

use serde::{Deserialize, Serialize};

use crate::classifier::classify_columns;
use crate::decode::{Row, Table};
use crate::error::{ImportError, Result};
use crate::types::{Category, ColumnMapping, NewTerm};

/// Number of rows shown in an import preview.
pub const PREVIEW_ROWS: usize = 5;

/// Classifier output plus a few rows, for confirming a mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportPreview {
    pub mapping: ColumnMapping,
    pub headers: Vec<String>,
    /// First rows, each with one cell per entry of `headers`, in order.
    pub sample: Vec<Vec<String>>,
}

pub fn preview(table: &Table) -> ImportPreview {
    let classification = classify_columns(table);
    ImportPreview {
        mapping: classification.mapping,
        headers: classification.headers,
        sample: table.rows().take(PREVIEW_ROWS).map(|r| r.to_vec()).collect(),
    }
}

/// Headers chosen by the user, taking precedence over the classifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnOverrides {
    pub word: Option<String>,
    pub part_of_speech: Option<String>,
    pub meaning: Option<String>,
    pub pronunciation: Option<String>,
    pub example: Option<String>,
}

impl ColumnOverrides {
    fn get(&self, category: Category) -> Option<&str> {
        let value = match category {
            Category::Word => &self.word,
            Category::PartOfSpeech => &self.part_of_speech,
            Category::Meaning => &self.meaning,
            Category::Pronunciation => &self.pronunciation,
            Category::Example => &self.example,
        };
        value.as_deref().filter(|h| !h.trim().is_empty())
    }
}

/// Terms extracted from a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportBatch {
    pub mapping: ColumnMapping,
    pub terms: Vec<NewTerm>,
    /// Rows dropped for an empty word or meaning.
    pub skipped: usize,
}

/// Resolve the final mapping: overrides first, classifier for the rest.
///
/// An override wins even if the classifier gave its header to another
/// category; that category is then left unassigned. Two overrides naming
/// the same header are rejected.
pub fn resolve_mapping(table: &Table, overrides: &ColumnOverrides) -> Result<ColumnMapping> {
    let auto = classify_columns(table).mapping;
    let mut mapping = ColumnMapping::new();

    for category in Category::ASSIGNMENT_ORDER {
        if let Some(header) = overrides.get(category) {
            if table.header_index(header).is_none() {
                return Err(ImportError::UnknownColumn(header.to_string()));
            }
            if !mapping.assign(category, header) {
                let first = mapping
                    .iter()
                    .find(|(_, h)| *h == header)
                    .map(|(c, _)| c)
                    .unwrap_or(category);
                return Err(ImportError::DuplicateOverride {
                    header: header.to_string(),
                    first,
                    second: category,
                });
            }
        }
    }
    for category in Category::ASSIGNMENT_ORDER {
        if overrides.get(category).is_some() {
            continue;
        }
        if let Some(header) = auto.get(category) {
            mapping.assign(category, header);
        }
    }

    Ok(mapping)
}

/// Turn every usable row of `table` into a [`NewTerm`].
///
/// Fails with [`ImportError::MissingRequiredColumns`] when word or meaning
/// has no column.
pub fn build_terms(table: &Table, overrides: &ColumnOverrides) -> Result<ImportBatch> {
    let mapping = resolve_mapping(table, overrides)?;
    let missing = mapping.missing_required();
    if !missing.is_empty() {
        return Err(ImportError::MissingRequiredColumns { missing });
    }

    let mut terms = Vec::new();
    let mut skipped = 0;
    for row in table.rows() {
        match row_to_term(&row, &mapping) {
            Some(term) => terms.push(term),
            None => skipped += 1,
        }
    }

    tracing::info!(inserted = terms.len(), skipped, "built terms from table");
    Ok(ImportBatch {
        mapping,
        terms,
        skipped,
    })
}

fn row_to_term(row: &Row<'_>, mapping: &ColumnMapping) -> Option<NewTerm> {
    let cell = |category: Category| -> Option<String> {
        mapping
            .get(category)
            .and_then(|h| row.get(h))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    Some(NewTerm {
        word: cell(Category::Word)?,
        meaning: cell(Category::Meaning)?,
        part_of_speech: cell(Category::PartOfSpeech),
        pronunciation: cell(Category::Pronunciation),
        example: cell(Category::Example),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sheet() -> Table {
        Table::from_records(
            vec!["English", "Type", "Vietnamese", "Notes"],
            vec![
                vec!["cat", "n", "con mèo", ""],
                vec!["  run ", "v", " chạy ", "I run every day."],
                vec!["", "adj", "đẹp", ""],
                vec!["green", "adj", "", ""],
            ],
        )
    }

    #[test]
    fn builds_terms_and_skips_incomplete_rows() {
        let batch = build_terms(&sheet(), &ColumnOverrides::default()).unwrap();
        assert_eq!(batch.skipped, 2);
        assert_eq!(
            batch.terms,
            vec![
                NewTerm {
                    word: "cat".to_string(),
                    part_of_speech: Some("n".to_string()),
                    meaning: "con mèo".to_string(),
                    pronunciation: None,
                    example: None,
                },
                NewTerm {
                    word: "run".to_string(),
                    part_of_speech: Some("v".to_string()),
                    meaning: "chạy".to_string(),
                    pronunciation: None,
                    example: Some("I run every day.".to_string()),
                },
            ]
        );
    }

    #[test]
    fn override_beats_classifier() {
        let overrides = ColumnOverrides {
            example: Some("Type".to_string()),
            ..Default::default()
        };
        let mapping = resolve_mapping(&sheet(), &overrides).unwrap();
        assert_eq!(mapping.get(Category::Example), Some("Type"));
        assert_eq!(mapping.get(Category::PartOfSpeech), None);
        assert_eq!(mapping.get(Category::Word), Some("English"));
    }

    #[test]
    fn unknown_override_is_rejected() {
        let overrides = ColumnOverrides {
            word: Some("Nope".to_string()),
            ..Default::default()
        };
        let result = build_terms(&sheet(), &overrides);
        assert!(matches!(result, Err(ImportError::UnknownColumn(h)) if h == "Nope"));
    }

    #[test]
    fn two_overrides_on_one_header_are_rejected() {
        let overrides = ColumnOverrides {
            word: Some("English".to_string()),
            meaning: Some("English".to_string()),
            ..Default::default()
        };
        match resolve_mapping(&sheet(), &overrides) {
            Err(ImportError::DuplicateOverride { header, first, second }) => {
                assert_eq!(header, "English");
                assert_eq!(first, Category::Word);
                assert_eq!(second, Category::Meaning);
            }
            other => panic!("expected duplicate override, got {:?}", other),
        }
    }

    #[test]
    fn preview_keeps_header_order() {
        let preview = preview(&sheet());
        assert_eq!(preview.headers, vec!["English", "Type", "Vietnamese", "Notes"]);
        assert_eq!(preview.sample[1], vec!["  run ", "v", " chạy ", "I run every day."]);
    }

    #[test]
    fn blank_override_falls_back_to_classifier() {
        let overrides = ColumnOverrides {
            word: Some("  ".to_string()),
            ..Default::default()
        };
        let mapping = resolve_mapping(&sheet(), &overrides).unwrap();
        assert_eq!(mapping.get(Category::Word), Some("English"));
    }

    #[test]
    fn missing_meaning_fails_import() {
        let table = Table::from_records(vec!["id"], vec![vec!["1"], vec!["2"]]);
        let result = build_terms(&table, &ColumnOverrides::default());
        match result {
            Err(ImportError::MissingRequiredColumns { missing }) => {
                assert_eq!(missing, vec![Category::Meaning]);
            }
            other => panic!("expected missing columns, got {:?}", other),
        }
    }

    #[test]
    fn preview_samples_first_rows() {
        let rows: Vec<Vec<String>> = (0..8)
            .map(|i| vec![format!("word{}", i), format!("nghĩa {}", i)])
            .collect();
        let table = Table::from_records(vec!["Word", "Meaning"], rows);
        let preview = preview(&table);
        assert_eq!(preview.sample.len(), PREVIEW_ROWS);
        assert_eq!(preview.sample[0], vec!["word0", "nghĩa 0"]);
        assert_eq!(preview.mapping.get(Category::Meaning), Some("Meaning"));
    }
}
