//! Schedule routes used by the dashboard editor.

#[cfg(test)]
#[path = "schedules_test.rs"]
mod schedules_test;

use axum::Json;
use axum::extract::{Path, Query, State};
use client::net::types::{RecurringScheduleResponse, Schedule};

use crate::error::{FeederError, ok};
use crate::services::schedules::{self, RecurringBody, ScheduleBody, ScheduleFilter};
use crate::state::AppState;

/// `GET /schedules?start_date&end_date&module_id`
pub async fn list_schedules(
    State(state): State<AppState>,
    Query(filter): Query<ScheduleFilter>,
) -> Result<Json<Vec<Schedule>>, FeederError> {
    Ok(Json(schedules::list_schedules(&state.pool, &filter).await?))
}

/// `POST /schedules`
pub async fn create_schedule(
    State(state): State<AppState>,
    Json(body): Json<ScheduleBody>,
) -> Result<Json<serde_json::Value>, FeederError> {
    let schedule = body.validate()?;
    let schedule_id = schedules::create_schedule(&state.pool, &schedule).await?;
    tracing::info!(schedule_id, module_id = %schedule.module_id, feed_date = %schedule.feed_date, "schedule created");
    Ok(Json(serde_json::json!({ "success": true, "schedule_id": schedule_id })))
}

/// `POST /schedules/recurring`
pub async fn create_recurring(
    State(state): State<AppState>,
    Json(body): Json<RecurringBody>,
) -> Result<Json<RecurringScheduleResponse>, FeederError> {
    let plan = body.validate()?;
    Ok(Json(schedules::create_recurring(&state.pool, &plan).await?))
}

/// `PUT /schedules/{id}`
pub async fn update_schedule(
    State(state): State<AppState>,
    Path(schedule_id): Path<i64>,
    Json(body): Json<ScheduleBody>,
) -> Result<Json<serde_json::Value>, FeederError> {
    let schedule = body.validate()?;
    schedules::update_schedule(&state.pool, schedule_id, &schedule).await?;
    Ok(ok())
}

/// `DELETE /schedules/{id}`
pub async fn delete_schedule(
    State(state): State<AppState>,
    Path(schedule_id): Path<i64>,
) -> Result<Json<serde_json::Value>, FeederError> {
    schedules::delete_schedule(&state.pool, schedule_id).await?;
    Ok(ok())
}
