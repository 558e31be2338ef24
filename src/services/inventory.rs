//! Camera and feeder module registry.

#[cfg(test)]
#[path = "inventory_test.rs"]
mod inventory_test;

use client::net::types::Module;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::FeederError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Camera {
    pub cam_id: String,
    pub status: String,
}

/// Status value that lets cameras upload and modules receive schedules.
pub const ACTIVE: &str = "active";

/// Trim and require a non-empty identifier.
///
/// # Errors
///
/// Returns `Invalid` naming `field` when the value is missing or blank.
pub fn require_id(value: Option<&str>, field: &str) -> Result<String, FeederError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| FeederError::invalid(format!("Missing {field}")))
}

// =============================================================================
// CAMERAS
// =============================================================================

/// List all cameras.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_cameras(pool: &PgPool) -> Result<Vec<Camera>, FeederError> {
    let rows = sqlx::query_as::<_, (String, String)>("SELECT cam_id, status FROM cameras ORDER BY cam_id")
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|(cam_id, status)| Camera { cam_id, status }).collect())
}

/// Register a camera.
///
/// # Errors
///
/// Returns `Conflict` if the id is taken, or a database error.
pub async fn create_camera(pool: &PgPool, camera: &Camera) -> Result<(), FeederError> {
    sqlx::query("INSERT INTO cameras (cam_id, status) VALUES ($1, $2)")
        .bind(&camera.cam_id)
        .bind(&camera.status)
        .execute(pool)
        .await
        .map_err(|e| FeederError::from_write(e, "camera"))?;
    Ok(())
}

/// Change a camera's status.
///
/// # Errors
///
/// Returns `NotFound` if no camera has `cam_id`, or a database error.
pub async fn update_camera_status(pool: &PgPool, cam_id: &str, status: &str) -> Result<(), FeederError> {
    let result = sqlx::query("UPDATE cameras SET status = $1 WHERE cam_id = $2")
        .bind(status)
        .bind(cam_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(FeederError::not_found(format!("Camera {cam_id} not found")));
    }
    Ok(())
}

/// Remove a camera. Deleting an unknown id is not an error.
///
/// # Errors
///
/// Returns `Invalid` if modules still reference the camera, or a database error.
pub async fn delete_camera(pool: &PgPool, cam_id: &str) -> Result<(), FeederError> {
    sqlx::query("DELETE FROM cameras WHERE cam_id = $1")
        .bind(cam_id)
        .execute(pool)
        .await
        .map_err(|e| FeederError::from_write(e, "camera"))?;
    Ok(())
}

/// Whether `cam_id` exists with status `active`.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn camera_is_active(pool: &PgPool, cam_id: &str) -> Result<bool, FeederError> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM cameras WHERE cam_id = $1 AND status = $2)")
            .bind(cam_id)
            .bind(ACTIVE)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}

// =============================================================================
// MODULES
// =============================================================================

/// List all modules.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_modules(pool: &PgPool) -> Result<Vec<Module>, FeederError> {
    let rows = sqlx::query_as::<_, (String, String, String, Option<f64>)>(
        "SELECT module_id, cam_id, status, weight FROM modules ORDER BY module_id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows
        .into_iter()
        .map(|(module_id, cam_id, status, weight)| Module { module_id, cam_id, status, weight })
        .collect())
}

/// Register a module.
///
/// # Errors
///
/// Returns `Conflict` for a duplicate id, `Invalid` for an unknown camera, or
/// a database error.
pub async fn create_module(pool: &PgPool, module: &Module) -> Result<(), FeederError> {
    sqlx::query("INSERT INTO modules (module_id, cam_id, status, weight) VALUES ($1, $2, $3, $4)")
        .bind(&module.module_id)
        .bind(&module.cam_id)
        .bind(&module.status)
        .bind(module.weight)
        .execute(pool)
        .await
        .map_err(|e| FeederError::from_write(e, "module"))?;
    Ok(())
}

/// Replace a module's camera, status, and weight.
///
/// # Errors
///
/// Returns `NotFound` if the module does not exist, `Invalid` for an unknown
/// camera, or a database error.
pub async fn update_module(pool: &PgPool, module: &Module) -> Result<(), FeederError> {
    let result = sqlx::query("UPDATE modules SET cam_id = $1, status = $2, weight = $3 WHERE module_id = $4")
        .bind(&module.cam_id)
        .bind(&module.status)
        .bind(module.weight)
        .bind(&module.module_id)
        .execute(pool)
        .await
        .map_err(|e| FeederError::from_write(e, "module"))?;
    if result.rows_affected() == 0 {
        return Err(FeederError::not_found(format!("Module {} not found", module.module_id)));
    }
    Ok(())
}

/// Remove a module and, by cascade, its schedules.
///
/// # Errors
///
/// Returns a database error if the delete fails.
pub async fn delete_module(pool: &PgPool, module_id: &str) -> Result<(), FeederError> {
    sqlx::query("DELETE FROM modules WHERE module_id = $1")
        .bind(module_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Look up a module's status, `None` if unregistered.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn module_status(pool: &PgPool, module_id: &str) -> Result<Option<String>, FeederError> {
    let status = sqlx::query_scalar::<_, String>("SELECT status FROM modules WHERE module_id = $1")
        .bind(module_id)
        .fetch_optional(pool)
        .await?;
    Ok(status)
}

/// Store a device weight reading.
///
/// # Errors
///
/// Returns a database error if the update fails.
pub async fn set_module_weight(pool: &PgPool, module_id: &str, weight: f64) -> Result<(), FeederError> {
    sqlx::query("UPDATE modules SET weight = $1 WHERE module_id = $2")
        .bind(weight)
        .bind(module_id)
        .execute(pool)
        .await?;
    Ok(())
}
