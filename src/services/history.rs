//! Feeding history log.
//!
//! History rows only carry a schedule reference and a completion time; the
//! listing joins the schedule back in, so rows whose schedule was deleted
//! come back with every schedule field null.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use client::net::types::{HistoryRecord, ScheduleStatus};
use serde::Deserialize;
use sqlx::PgPool;

use crate::error::FeederError;

/// Wire format of `created_at` in `GET /history`.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Body of `POST /history`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewHistory {
    pub schedule_id: Option<i64>,
}

type HistoryRow = (
    i64,
    DateTime<Utc>,
    Option<i64>,
    Option<String>,
    Option<NaiveDate>,
    Option<String>,
    Option<f64>,
    Option<String>,
);

/// Render a stored UTC timestamp in the display zone.
#[must_use]
pub fn format_created_at(created_at: DateTime<Utc>, offset: &FixedOffset) -> String {
    created_at.with_timezone(offset).format(CREATED_AT_FORMAT).to_string()
}

fn record_from_row(row: HistoryRow, offset: &FixedOffset) -> HistoryRecord {
    let (history_id, created_at, schedule_id, module_id, feed_date, feed_time, amount, status) = row;
    HistoryRecord {
        history_id,
        created_at: Some(format_created_at(created_at, offset)),
        schedule_id,
        module_id,
        feed_date,
        feed_time,
        amount,
        status: status.as_deref().and_then(ScheduleStatus::parse),
    }
}

/// List history, newest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_history(pool: &PgPool, offset: &FixedOffset) -> Result<Vec<HistoryRecord>, FeederError> {
    let rows = sqlx::query_as::<_, HistoryRow>(
        "SELECT h.history_id, h.created_at, s.schedule_id, s.module_id, s.feed_date, s.feed_time, s.amount, s.status \
         FROM history h \
         LEFT JOIN schedules s ON h.schedule_id = s.schedule_id \
         ORDER BY h.created_at DESC, h.history_id DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(|row| record_from_row(row, offset)).collect())
}

/// Append a history row for `schedule_id` and return its id.
///
/// # Errors
///
/// Returns `Invalid` if the schedule does not exist, or a database error.
pub async fn insert_history(pool: &PgPool, schedule_id: i64) -> Result<i64, FeederError> {
    let id = sqlx::query_scalar::<_, i64>("INSERT INTO history (schedule_id) VALUES ($1) RETURNING history_id")
        .bind(schedule_id)
        .fetch_one(pool)
        .await
        .map_err(|e| FeederError::from_write(e, "history entry"))?;
    Ok(id)
}

/// Delete a history row. Unknown ids are a no-op.
///
/// # Errors
///
/// Returns a database error if the delete fails.
pub async fn delete_history(pool: &PgPool, history_id: i64) -> Result<(), FeederError> {
    sqlx::query("DELETE FROM history WHERE history_id = $1")
        .bind(history_id)
        .execute(pool)
        .await?;
    Ok(())
}
