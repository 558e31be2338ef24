//! Camera snapshot storage: image files on disk plus a metadata row each.
//!
//! DESIGN
//! ======
//! Files live flat under the configured images directory and are named
//! `{camera_id}_{unix_seconds}.jpg`. The metadata table is the listing
//! source; the directory is only touched on upload and delete.
//!
//! ERROR HANDLING
//! ==============
//! Filenames from the URL are validated before any filesystem access so a
//! crafted name can never escape the images directory.

#[cfg(test)]
#[path = "snapshots_test.rs"]
mod snapshots_test;

use std::path::{Path, PathBuf};

use client::net::types::{Snapshot, SnapshotCategory};
use serde::Serialize;
use sqlx::PgPool;
use tracing::info;

use crate::error::FeederError;

/// Category assumed when a device omits one.
pub const DEFAULT_CATEGORY: SnapshotCategory = SnapshotCategory::During;

/// Result of a stored upload, echoed back to the device.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredImage {
    pub success: bool,
    pub filename: String,
    pub size: u64,
    pub camera_id: String,
    pub category: SnapshotCategory,
}

/// Reject names that could address anything outside the images directory.
///
/// # Errors
///
/// Returns `Invalid("Invalid filename")` for empty names or names containing
/// `..`, `/`, or `\`.
pub fn validate_filename(filename: &str) -> Result<(), FeederError> {
    if filename.is_empty() || filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return Err(FeederError::invalid("Invalid filename"));
    }
    Ok(())
}

/// Filename for an upload from `camera_id` at `timestamp`.
#[must_use]
pub fn upload_filename(camera_id: &str, timestamp: i64) -> String {
    format!("{camera_id}_{timestamp}.jpg")
}

/// Parse the device's `category` field, defaulting when absent.
///
/// # Errors
///
/// Returns `Invalid` for anything other than `during` or `after`.
pub fn parse_category(raw: Option<&str>) -> Result<SnapshotCategory, FeederError> {
    match raw.map(str::trim).filter(|c| !c.is_empty()) {
        None => Ok(DEFAULT_CATEGORY),
        Some(c) => SnapshotCategory::parse(c).ok_or_else(|| FeederError::invalid(format!("Invalid category: {c}"))),
    }
}

fn snapshot_from_row((filename, camera_id, timestamp, category): (String, String, i64, String)) -> Snapshot {
    Snapshot {
        filename,
        camera_id: Some(camera_id),
        timestamp: Some(timestamp),
        category: SnapshotCategory::parse(&category).unwrap_or_default(),
    }
}

/// List snapshot metadata newest first, optionally for one camera.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_snapshots(pool: &PgPool, camera_id: Option<&str>) -> Result<Vec<Snapshot>, FeederError> {
    let rows = sqlx::query_as::<_, (String, String, i64, String)>(
        "SELECT filename, camera_id, timestamp, category FROM image_metadata \
         WHERE ($1::text IS NULL OR camera_id = $1) \
         ORDER BY timestamp DESC, filename DESC",
    )
    .bind(camera_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(snapshot_from_row).collect())
}

fn image_path(images_dir: &Path, filename: &str) -> Result<PathBuf, FeederError> {
    validate_filename(filename)?;
    Ok(images_dir.join(filename))
}

/// Delete an image file and its metadata row.
///
/// # Errors
///
/// - `Invalid` for a malformed filename.
/// - `NotFound` when no such file exists.
/// - `Io` or `Database` when removal fails.
pub async fn delete_snapshot(pool: &PgPool, images_dir: &Path, filename: &str) -> Result<(), FeederError> {
    let path = image_path(images_dir, filename)?;
    if !tokio::fs::try_exists(&path).await? {
        return Err(FeederError::not_found("File not found"));
    }
    tokio::fs::remove_file(&path).await?;
    sqlx::query("DELETE FROM image_metadata WHERE filename = $1")
        .bind(filename)
        .execute(pool)
        .await?;
    info!(filename, "snapshot deleted");
    Ok(())
}

/// Write uploaded bytes to disk and upsert the metadata row.
///
/// # Errors
///
/// Returns `Invalid` when `camera_id` cannot form a safe filename, or an I/O
/// or database error.
pub async fn store_upload(
    pool: &PgPool,
    images_dir: &Path,
    camera_id: &str,
    category: SnapshotCategory,
    timestamp: i64,
    bytes: &[u8],
) -> Result<StoredImage, FeederError> {
    let filename = upload_filename(camera_id, timestamp);
    let path = image_path(images_dir, &filename)?;
    tokio::fs::create_dir_all(images_dir).await?;
    tokio::fs::write(&path, bytes).await?;
    let size = tokio::fs::metadata(&path).await?.len();

    sqlx::query(
        "INSERT INTO image_metadata (filename, camera_id, timestamp, category) VALUES ($1, $2, $3, $4) \
         ON CONFLICT (filename) DO UPDATE SET camera_id = EXCLUDED.camera_id, \
             timestamp = EXCLUDED.timestamp, category = EXCLUDED.category",
    )
    .bind(&filename)
    .bind(camera_id)
    .bind(timestamp)
    .bind(category.as_str())
    .execute(pool)
    .await?;

    info!(%filename, size, camera_id, category = category.as_str(), "snapshot stored");
    Ok(StoredImage { success: true, filename, size, camera_id: camera_id.to_owned(), category })
}
