//! Study endpoints

use axum::{extract::State, Json};

use crate::error::Result;
use crate::models::*;
use crate::routes::require_user_id;
use crate::AppState;

/// POST /api/study/next
pub async fn next(
    State(state): State<AppState>,
    Json(payload): Json<StudyRequest>,
) -> Result<Json<NextTermResponse>> {
    require_user_id(&payload.user_id)?;
    let term = state
        .reviews
        .select_next(payload.set_id, &payload.user_id)
        .await?;
    Ok(Json(NextTermResponse { term }))
}

/// POST /api/study/answer
pub async fn answer(
    State(state): State<AppState>,
    Json(payload): Json<AnswerRequest>,
) -> Result<Json<AnswerOutcome>> {
    require_user_id(&payload.user_id)?;
    let outcome = state
        .reviews
        .record_answer(payload.term_id, &payload.user_id, payload.rating)
        .await?;
    Ok(Json(outcome))
}

/// POST /api/study/choice
pub async fn choice(
    State(state): State<AppState>,
    Json(payload): Json<StudyRequest>,
) -> Result<Json<ChoiceResponse>> {
    require_user_id(&payload.user_id)?;
    let question = state
        .reviews
        .build_choice_question(payload.set_id, &payload.user_id)
        .await?;
    Ok(Json(question.into()))
}
