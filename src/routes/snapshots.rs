//! Snapshot gallery routes. Image bytes themselves are served by the static
//! `/snapshots` service.

#[cfg(test)]
#[path = "snapshots_test.rs"]
mod snapshots_test;

use axum::Json;
use axum::extract::{Path, State};
use client::net::types::SnapshotList;
use serde::Serialize;
use serde_json::json;

use crate::error::FeederError;
use crate::services::snapshots;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CameraSnapshotList {
    pub success: bool,
    pub cam_id: String,
    pub images: Vec<client::net::types::Snapshot>,
}

/// `GET /api/snapshots`
pub async fn list_snapshots(State(state): State<AppState>) -> Result<Json<SnapshotList>, FeederError> {
    let images = snapshots::list_snapshots(&state.pool, None).await?;
    Ok(Json(SnapshotList { success: true, images, error: None }))
}

/// `GET /api/snapshots/{cam_id}`
pub async fn list_camera_snapshots(
    State(state): State<AppState>,
    Path(cam_id): Path<String>,
) -> Result<Json<CameraSnapshotList>, FeederError> {
    let images = snapshots::list_snapshots(&state.pool, Some(&cam_id)).await?;
    Ok(Json(CameraSnapshotList { success: true, cam_id, images }))
}

/// `DELETE /api/snapshots/{filename}`
pub async fn delete_snapshot(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Json<serde_json::Value>, FeederError> {
    snapshots::delete_snapshot(&state.pool, &state.images_dir, &filename).await?;
    Ok(Json(json!({ "success": true, "message": format!("Image {filename} deleted successfully") })))
}
