//! Analytics aggregate routes.

use axum::Json;
use axum::extract::State;
use client::net::types::{AnalyticsSummary, StatusCount, WeeklyPoint};

use crate::error::FeederError;
use crate::services::analytics;
use crate::state::AppState;

/// `GET /analytics/summary`
pub async fn summary(State(state): State<AppState>) -> Result<Json<AnalyticsSummary>, FeederError> {
    Ok(Json(analytics::summary(&state.pool, state.now()).await?))
}

/// `GET /analytics/weekly`
pub async fn weekly(State(state): State<AppState>) -> Result<Json<Vec<WeeklyPoint>>, FeederError> {
    Ok(Json(analytics::weekly(&state.pool, state.now()).await?))
}

/// `GET /analytics/module-status`
pub async fn module_status(State(state): State<AppState>) -> Result<Json<Vec<StatusCount>>, FeederError> {
    Ok(Json(analytics::module_status(&state.pool).await?))
}
