//! Feeder module registry routes.

#[cfg(test)]
#[path = "modules_test.rs"]
mod modules_test;

use axum::Json;
use axum::extract::{Path, State};
use client::net::types::Module;
use serde::Deserialize;

use crate::error::{FeederError, ok};
use crate::services::inventory;
use crate::state::AppState;

/// Body of `POST /modules`. `PUT /modules/{id}` takes the id from the path.
#[derive(Debug, Default, Deserialize)]
pub struct ModuleBody {
    pub module_id: Option<String>,
    pub cam_id: Option<String>,
    pub status: Option<String>,
    pub weight: Option<f64>,
}

impl ModuleBody {
    fn into_module(self, module_id: Option<&str>) -> Result<Module, FeederError> {
        let module_id = inventory::require_id(module_id.or(self.module_id.as_deref()), "module_id")?;
        let cam_id = inventory::require_id(self.cam_id.as_deref(), "cam_id")?;
        let status = self
            .status
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| inventory::ACTIVE.to_owned());
        Ok(Module { module_id, cam_id, status, weight: self.weight })
    }
}

/// `GET /modules`
pub async fn list_modules(State(state): State<AppState>) -> Result<Json<Vec<Module>>, FeederError> {
    Ok(Json(inventory::list_modules(&state.pool).await?))
}

/// `POST /modules`
pub async fn create_module(
    State(state): State<AppState>,
    Json(body): Json<ModuleBody>,
) -> Result<Json<serde_json::Value>, FeederError> {
    let module = body.into_module(None)?;
    inventory::create_module(&state.pool, &module).await?;
    tracing::info!(module_id = %module.module_id, cam_id = %module.cam_id, "module registered");
    Ok(ok())
}

/// `PUT /modules/{id}`
pub async fn update_module(
    State(state): State<AppState>,
    Path(module_id): Path<String>,
    Json(body): Json<ModuleBody>,
) -> Result<Json<serde_json::Value>, FeederError> {
    let module = body.into_module(Some(&module_id))?;
    inventory::update_module(&state.pool, &module).await?;
    Ok(ok())
}

/// `DELETE /modules/{id}`
pub async fn delete_module(
    State(state): State<AppState>,
    Path(module_id): Path<String>,
) -> Result<Json<serde_json::Value>, FeederError> {
    inventory::delete_module(&state.pool, &module_id).await?;
    Ok(ok())
}
