//! Import endpoints

use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use vocab_core::{build_terms, decode_rows};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::services::vocab::{NewVocabSet, VocabStore};
use crate::AppState;

/// POST /api/import/preview
///
/// Body is the raw CSV or XLSX file content.
pub async fn preview(body: Bytes) -> Result<Json<ImportPreview>> {
    let table = decode_rows(&body)?;
    Ok(Json(vocab_core::preview(&table)))
}

/// POST /api/import
pub async fn import(
    State(state): State<AppState>,
    Query(query): Query<ImportQuery>,
    body: Bytes,
) -> Result<Json<ImportResponse>> {
    let table = decode_rows(&body)?;
    let batch = build_terms(&table, &query.overrides())?;

    let set_id = match query.set_id {
        Some(set_id) => {
            if !state.store.set_exists(set_id).await? {
                return Err(ApiError::NotFound(format!("Set {} not found", set_id)));
            }
            set_id
        }
        None => state.store.create_set(new_set(&query)).await?,
    };

    let inserted = state.store.add_terms(set_id, batch.terms).await?;
    tracing::info!(%set_id, inserted, skipped = batch.skipped, "imported terms");

    Ok(Json(ImportResponse {
        set_id,
        mapping: batch.mapping,
        inserted,
        skipped: batch.skipped,
    }))
}

fn new_set(query: &ImportQuery) -> NewVocabSet {
    let mut set = NewVocabSet::default();
    if let Some(name) = query.set_name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        set.name = name.to_string();
    }
    if let Some(from) = &query.language_from {
        set.language_from = from.clone();
    }
    if let Some(to) = &query.language_to {
        set.language_to = to.clone();
    }
    set
}
