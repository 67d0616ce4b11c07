//! Cell-level heuristics used by the content scorer.

use super::profile::{
    EXAMPLE_MARKERS, IPA_CHARS, PART_OF_SPEECH_VALUES, VIETNAMESE_DIACRITICS,
};
use crate::types::Category;

/// Whether `text` contains a Vietnamese diacritic letter (either case).
pub fn has_vietnamese_diacritics(text: &str) -> bool {
    text.chars()
        .flat_map(char::to_lowercase)
        .any(|c| VIETNAMESE_DIACRITICS.contains(c))
}

/// Cell is exactly a known part-of-speech token (`"n."`, `"Verb"`, `"tính từ"`).
pub fn is_part_of_speech(cell: &str) -> bool {
    let lower = cell.trim().to_lowercase();
    let token = lower.strip_suffix('.').unwrap_or(&lower);
    PART_OF_SPEECH_VALUES.contains(&token)
}

pub fn looks_like_pronunciation(cell: &str) -> bool {
    cell.contains(IPA_CHARS) || cell.starts_with('/') || cell.starts_with('[')
}

pub fn looks_like_example(cell: &str) -> bool {
    if token_count(cell) >= 5 {
        return true;
    }
    let lower = cell.to_lowercase();
    EXAMPLE_MARKERS.iter().any(|m| lower.contains(m))
}

pub fn looks_like_meaning(cell: &str) -> bool {
    has_vietnamese_diacritics(cell) || token_count(cell) >= 4 || cell.chars().count() > 30
}

pub fn looks_like_word(cell: &str) -> bool {
    token_count(cell) <= 3 && !has_vietnamese_diacritics(cell) && cell.chars().count() < 25
}

/// Run the heuristic for `category` on one trimmed, non-empty cell.
pub fn matches(category: Category, cell: &str) -> bool {
    match category {
        Category::Word => looks_like_word(cell),
        Category::PartOfSpeech => is_part_of_speech(cell),
        Category::Meaning => looks_like_meaning(cell),
        Category::Pronunciation => looks_like_pronunciation(cell),
        Category::Example => looks_like_example(cell),
    }
}

fn token_count(cell: &str) -> usize {
    cell.split_whitespace().count()
}
