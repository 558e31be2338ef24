//! Endpoints called by the feeder hardware.
//!
//! DESIGN
//! ======
//! Devices post `application/x-www-form-urlencoded` bodies (multipart for
//! image upload) and read small JSON replies. Every field is optional at the
//! extractor level so missing fields produce the same 400 messages the
//! firmware already logs.

#[cfg(test)]
#[path = "device_test.rs"]
mod device_test;

use axum::extract::{Multipart, State};
use axum::{Form, Json};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::FeederError;
use crate::services::{inventory, schedules, snapshots};
use crate::state::AppState;

/// Accepted hopper weight range in grams.
pub const MAX_WEIGHT_GRAMS: f64 = 10_000.0;

#[derive(Debug, Default, Deserialize)]
pub struct CheckForm {
    pub module_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CompleteForm {
    pub schedule_id: Option<String>,
    pub module_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WeightForm {
    pub module_id: Option<String>,
    pub weight: Option<String>,
}

/// Validate a weight report into `(module_id, grams)`.
///
/// # Errors
///
/// Returns `Invalid` when either field is missing, the weight is not a
/// number, or it falls outside `0..=10000`.
pub fn parse_weight(form: &WeightForm) -> Result<(String, f64), FeederError> {
    let (Some(module_id), Some(raw)) = (form.module_id.as_deref().filter(|m| !m.is_empty()), form.weight.as_deref())
    else {
        return Err(FeederError::invalid("Missing module_id or weight"));
    };
    let weight: f64 = raw.trim().parse().map_err(|_| FeederError::invalid("Weight must be a number"))?;
    if !weight.is_finite() || !(0.0..=MAX_WEIGHT_GRAMS).contains(&weight) {
        return Err(FeederError::invalid("Invalid weight value"));
    }
    Ok((module_id.to_owned(), weight))
}

/// `GET /health`
pub async fn health() -> &'static str {
    "mDNS OK"
}

/// `POST /check_schedule`: tell a module whether to dispense now.
pub async fn check_schedule(State(state): State<AppState>, Form(form): Form<CheckForm>) -> Result<Json<Value>, FeederError> {
    let module_id = form
        .module_id
        .filter(|m| !m.is_empty())
        .ok_or_else(|| FeederError::invalid("Missing module_id"))?;
    let status = inventory::module_status(&state.pool, &module_id).await?;
    if status.as_deref() != Some(inventory::ACTIVE) {
        return Err(FeederError::not_found("Invalid or inactive module_id"));
    }

    let now = state.now();
    let time = now.format("%H:%M").to_string();
    let due = schedules::due_schedule(&state.pool, &module_id, now.date_naive(), &time).await?;
    Ok(Json(match due {
        Some(due) => json!({
            "dispense": true,
            "amount": due.amount,
            "schedule_id": due.schedule_id,
            "scheduled_date": due.feed_date,
            "scheduled_time": due.feed_time,
        }),
        None => json!({ "dispense": false }),
    }))
}

/// `POST /complete_schedule`: a module reports it dispensed a schedule.
pub async fn complete_schedule(
    State(state): State<AppState>,
    Form(form): Form<CompleteForm>,
) -> Result<Json<Value>, FeederError> {
    let schedule_id = schedules::parse_schedule_id(form.schedule_id.as_deref())?;
    schedules::complete_schedule(&state.pool, schedule_id, form.module_id.as_deref()).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Schedule completed successfully",
        "schedule_id": schedule_id,
    })))
}

/// `POST /weight_update`: store a hopper weight reading.
pub async fn weight_update(State(state): State<AppState>, Form(form): Form<WeightForm>) -> Result<Json<Value>, FeederError> {
    let (module_id, weight) = parse_weight(&form)?;
    tracing::debug!(%module_id, weight, "weight update");

    let Some(status) = inventory::module_status(&state.pool, &module_id).await? else {
        return Err(FeederError::Forbidden("Module not registered. Please register module first.".to_owned()));
    };
    inventory::set_module_weight(&state.pool, &module_id, weight).await?;
    Ok(Json(json!({
        "success": true,
        "message": format!("Weight updated for {module_id}: {weight}g"),
        "current_status": status,
    })))
}

/// Fields collected from an upload's multipart body.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub camera_id: Option<String>,
    pub category: Option<String>,
    pub image: Option<Vec<u8>>,
}

async fn read_upload(mut multipart: Multipart) -> Result<UploadForm, FeederError> {
    let mut form = UploadForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| FeederError::invalid(format!("Malformed upload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "camera_id" => form.camera_id = Some(field.text().await.map_err(|e| FeederError::invalid(e.to_string()))?),
            "category" => form.category = Some(field.text().await.map_err(|e| FeederError::invalid(e.to_string()))?),
            "image" => {
                let bytes = field.bytes().await.map_err(|e| FeederError::invalid(e.to_string()))?;
                form.image = Some(bytes.to_vec());
            }
            _ => {}
        }
    }
    Ok(form)
}

/// `POST /upload_image`: store a camera snapshot.
pub async fn upload_image(State(state): State<AppState>, multipart: Multipart) -> Result<Json<snapshots::StoredImage>, FeederError> {
    let form = read_upload(multipart).await?;
    let camera_id = inventory::require_id(form.camera_id.as_deref(), "camera_id")?;
    let category = snapshots::parse_category(form.category.as_deref())?;
    if !inventory::camera_is_active(&state.pool, &camera_id).await? {
        return Err(FeederError::not_found("Invalid or inactive camera_id"));
    }
    let image = form
        .image
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| FeederError::invalid("No image data"))?;

    let stored = snapshots::store_upload(
        &state.pool,
        &state.images_dir,
        &camera_id,
        category,
        state.now().timestamp(),
        &image,
    )
    .await?;
    Ok(Json(stored))
}
