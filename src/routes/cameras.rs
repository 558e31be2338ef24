//! Camera registry routes.

#[cfg(test)]
#[path = "cameras_test.rs"]
mod cameras_test;

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;

use crate::error::{FeederError, ok};
use crate::services::inventory::{self, Camera};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CameraBody {
    pub cam_id: Option<String>,
    pub status: Option<String>,
}

fn status_or_active(status: Option<String>) -> String {
    status
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| inventory::ACTIVE.to_owned())
}

/// `GET /cameras`
pub async fn list_cameras(State(state): State<AppState>) -> Result<Json<Vec<Camera>>, FeederError> {
    Ok(Json(inventory::list_cameras(&state.pool).await?))
}

/// `POST /cameras`
pub async fn create_camera(
    State(state): State<AppState>,
    Json(body): Json<CameraBody>,
) -> Result<Json<serde_json::Value>, FeederError> {
    let cam_id = inventory::require_id(body.cam_id.as_deref(), "cam_id")?;
    let camera = Camera { cam_id, status: status_or_active(body.status) };
    inventory::create_camera(&state.pool, &camera).await?;
    tracing::info!(cam_id = %camera.cam_id, "camera registered");
    Ok(ok())
}

/// `PUT /cameras/{id}`
pub async fn update_camera(
    State(state): State<AppState>,
    Path(cam_id): Path<String>,
    Json(body): Json<CameraBody>,
) -> Result<Json<serde_json::Value>, FeederError> {
    let status = inventory::require_id(body.status.as_deref(), "status")?;
    inventory::update_camera_status(&state.pool, &cam_id, &status).await?;
    Ok(ok())
}

/// `DELETE /cameras/{id}`
pub async fn delete_camera(
    State(state): State<AppState>,
    Path(cam_id): Path<String>,
) -> Result<Json<serde_json::Value>, FeederError> {
    inventory::delete_camera(&state.pool, &cam_id).await?;
    Ok(ok())
}
