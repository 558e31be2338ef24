//! Feeding history routes.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use axum::Json;
use axum::extract::{Path, State};
use client::net::types::HistoryRecord;

use crate::error::{FeederError, ok};
use crate::services::history::{self, NewHistory};
use crate::state::AppState;

/// `GET /history`
pub async fn list_history(State(state): State<AppState>) -> Result<Json<Vec<HistoryRecord>>, FeederError> {
    Ok(Json(history::list_history(&state.pool, &state.display_offset).await?))
}

/// `POST /history`
pub async fn create_history(
    State(state): State<AppState>,
    Json(body): Json<NewHistory>,
) -> Result<Json<serde_json::Value>, FeederError> {
    let schedule_id = body.schedule_id.ok_or_else(|| FeederError::invalid("Missing schedule_id"))?;
    let history_id = history::insert_history(&state.pool, schedule_id).await?;
    Ok(Json(serde_json::json!({ "success": true, "history_id": history_id })))
}

/// `DELETE /history/{id}`
pub async fn delete_history(
    State(state): State<AppState>,
    Path(history_id): Path<i64>,
) -> Result<Json<serde_json::Value>, FeederError> {
    history::delete_history(&state.pool, history_id).await?;
    tracing::info!(history_id, "history entry deleted");
    Ok(ok())
}
