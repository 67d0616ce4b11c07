//! Static scoring tables, one profile per category.

use crate::types::Category;

/// Score added for every header keyword found in a header name.
pub const HEADER_KEYWORD_SCORE: f64 = 2.0;

/// Maximum non-empty cells sampled per column by the content scorer.
pub const CONTENT_SAMPLE_SIZE: usize = 50;

/// Hit ratio from which a column is treated as a part-of-speech column.
pub const POS_BOOST_RATIO: f64 = 0.7;

/// Flat content score for a column past [`POS_BOOST_RATIO`].
pub const POS_BOOST_SCORE: f64 = 10.0;

/// How one category is recognized and when it is accepted.
#[derive(Debug)]
pub struct CategoryProfile {
    pub category: Category,
    /// Lower-case substrings looked for in header names (English and Vietnamese).
    pub header_keywords: &'static [&'static str],
    /// Multiplier applied to the content hit ratio.
    pub content_weight: f64,
    /// Minimum combined score to accept an assignment.
    pub threshold: f64,
}

pub static PROFILES: [CategoryProfile; 5] = [
    CategoryProfile {
        category: Category::Word,
        header_keywords: &[
            "từ",
            "từ vựng",
            "term",
            "word",
            "english",
            "vocabulary",
            "từ tiếng anh",
            "vocab",
        ],
        content_weight: 2.0,
        threshold: 0.8,
    },
    CategoryProfile {
        category: Category::PartOfSpeech,
        header_keywords: &[
            "loại từ",
            "từ loại",
            "pos",
            "part of speech",
            "word type",
            "type",
        ],
        content_weight: 3.0,
        threshold: 2.0,
    },
    CategoryProfile {
        category: Category::Meaning,
        header_keywords: &[
            "nghĩa",
            "định nghĩa",
            "definition",
            "meaning",
            "translation",
            "dịch",
            "tiếng việt",
            "vietnamese",
        ],
        content_weight: 2.5,
        threshold: 0.8,
    },
    CategoryProfile {
        category: Category::Pronunciation,
        header_keywords: &[
            "phiên âm",
            "phát âm",
            "pronunciation",
            "phonetic",
            "ipa",
            "transcription",
        ],
        content_weight: 2.5,
        threshold: 0.5,
    },
    CategoryProfile {
        category: Category::Example,
        header_keywords: &[
            "ví dụ",
            "ví du",
            "example",
            "sample",
            "sentence",
            "usage",
            "câu ví dụ",
        ],
        content_weight: 2.0,
        threshold: 0.5,
    },
];

pub fn profile(category: Category) -> &'static CategoryProfile {
    match category {
        Category::Word => &PROFILES[0],
        Category::PartOfSpeech => &PROFILES[1],
        Category::Meaning => &PROFILES[2],
        Category::Pronunciation => &PROFILES[3],
        Category::Example => &PROFILES[4],
    }
}

/// Closed part-of-speech vocabulary: English full words and abbreviations,
/// Vietnamese with and without diacritics. Trailing periods are stripped
/// before lookup.
#[rustfmt::skip]
pub static PART_OF_SPEECH_VALUES: &[&str] = &[
    "n", "noun", "danh từ", "danh tu",
    "v", "verb", "động từ", "dong tu",
    "adj", "adjective", "tính từ", "tinh tu",
    "adv", "adverb", "trạng từ", "trang tu",
    "prep", "preposition", "giới từ", "gioi tu",
    "conj", "conjunction", "liên từ", "lien tu",
    "pron", "pronoun", "đại từ", "dai tu",
    "num", "numeral", "số từ", "so tu",
    "phr", "phrase", "cụm từ", "cum tu",
];

/// Code points characteristic of IPA transcriptions.
pub static IPA_CHARS: &[char] = &[
    'ə', 'ɪ', 'ʊ', 'ɔ', 'ɑ', 'æ', 'ʌ', 'ɜ', 'θ', 'ð', 'ʃ', 'ʒ', 'ŋ',
];

/// Lower-case Vietnamese letters carrying diacritics.
pub static VIETNAMESE_DIACRITICS: &str = concat!(
    "àáảãạăằắẳẵặâầấẩẫậ",
    "đ",
    "èéẻẽẹêềếểễệ",
    "ìíỉĩị",
    "òóỏõọôồốổỗộơờớởỡợ",
    "ùúủũụưừứửữự",
    "ỳýỷỹỵ",
);

/// Lower-case substrings that mark a cell as an example sentence.
pub static EXAMPLE_MARKERS: &[&str] = &[".", "!", "?", "e.g", "ex:", "ví dụ"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_are_indexed_by_category() {
        for category in Category::ASSIGNMENT_ORDER {
            assert_eq!(profile(category).category, category);
        }
    }

    #[test]
    fn keywords_are_lowercase() {
        for p in &PROFILES {
            for kw in p.header_keywords {
                assert_eq!(kw.to_lowercase(), *kw);
            }
        }
    }
}
