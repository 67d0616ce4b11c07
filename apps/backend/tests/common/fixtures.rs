//! Test fixtures and factory functions for creating test data.

use serde_json::json;
use uuid::Uuid;

use vocab_core::{export_xlsx, NewTerm, Term};

/// A term whose meaning is derived from the word.
pub fn new_term(word: &str) -> NewTerm {
    NewTerm {
        word: word.to_string(),
        part_of_speech: Some("n".to_string()),
        meaning: format!("nghĩa của {}", word),
        pronunciation: None,
        example: None,
    }
}

/// English/Vietnamese sheet with two usable rows and two incomplete ones.
pub fn vocab_sheet_csv() -> Vec<u8> {
    "English,Type,Vietnamese,Notes\n\
     cat,n,con mèo,\n\
     run,v,chạy,I run every day.\n\
     ,adj,đẹp,\n\
     green,adj,,\n"
        .as_bytes()
        .to_vec()
}

/// Workbook with the standard export headers and two terms.
pub fn vocab_sheet_xlsx() -> Vec<u8> {
    let terms = [("cat", "n", "con mèo"), ("run", "v", "chạy")]
        .into_iter()
        .map(|(word, pos, meaning)| Term {
            id: Uuid::new_v4(),
            set_id: Uuid::nil(),
            word: word.to_string(),
            part_of_speech: Some(pos.to_string()),
            meaning: meaning.to_string(),
            pronunciation: None,
            example: None,
        })
        .collect::<Vec<_>>();
    export_xlsx(&terms).unwrap()
}

/// Sheet with no column recognizable as a meaning.
pub fn id_only_csv() -> Vec<u8> {
    b"id\n1\n2\n".to_vec()
}

/// Create a study request body.
pub fn study_request(set_id: Uuid, user_id: &str) -> serde_json::Value {
    json!({ "set_id": set_id, "user_id": user_id })
}

/// Create an answer request body.
pub fn answer_request(term_id: Uuid, user_id: &str, rating: i32) -> serde_json::Value {
    json!({ "term_id": term_id, "user_id": user_id, "rating": rating })
}
