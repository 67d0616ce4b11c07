//! Set endpoints

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;
use vocab_core::{export_csv, export_xlsx, TermStore};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::require_user_id;
use crate::services::vocab::VocabStore;
use crate::AppState;

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// GET /api/sets/:set_id/summary
pub async fn summary(
    State(state): State<AppState>,
    Path(set_id): Path<Uuid>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<StudySummary>> {
    require_user_id(&query.user_id)?;
    ensure_set(&state, set_id).await?;
    let summary = state.reviews.summary(set_id, &query.user_id).await?;
    Ok(Json(summary))
}

/// GET /api/sets/:set_id/export?format=csv|xlsx
pub async fn export(
    State(state): State<AppState>,
    Path(set_id): Path<Uuid>,
    Query(query): Query<ExportQuery>,
) -> Result<Response> {
    let format = query.format.as_deref().unwrap_or("csv");
    if !matches!(format, "csv" | "xlsx") {
        return Err(ApiError::BadRequest(format!("unsupported export format: {}", format)));
    }

    ensure_set(&state, set_id).await?;
    let terms = state.store.list_terms(set_id).await?;
    let disposition = format!("attachment; filename=\"{}.{}\"", set_id, format);

    let response = if format == "xlsx" {
        let bytes = export_xlsx(&terms)?;
        (
            [
                (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            bytes,
        )
            .into_response()
    } else {
        let csv = export_csv(&terms)?;
        (
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            csv,
        )
            .into_response()
    };

    Ok(response)
}

async fn ensure_set(state: &AppState, set_id: Uuid) -> Result<()> {
    if state.store.set_exists(set_id).await? {
        Ok(())
    } else {
        Err(ApiError::NotFound(format!("Set {} not found", set_id)))
    }
}
