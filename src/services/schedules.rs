//! Feeding schedule service: dashboard CRUD plus the device check/complete
//! handshake.
//!
//! DESIGN
//! ======
//! Request bodies arrive with every field optional so validation can name
//! the missing field in the 400 body. Validated input is converted to the
//! shared `NewSchedule` DTO before it touches the database.
//!
//! ERROR HANDLING
//! ==============
//! Completion runs the status update and the history insert in one
//! transaction with the schedule row locked, so two devices reporting the
//! same schedule cannot both write history.

#[cfg(test)]
#[path = "schedules_test.rs"]
mod schedules_test;

use chrono::{Days, NaiveDate};
use client::net::types::{NewSchedule, RecurringScheduleResponse, Schedule, ScheduleStatus};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;

use crate::error::FeederError;

/// Days generated by a recurring request that omits `days_ahead`.
pub const DEFAULT_DAYS_AHEAD: u32 = 7;
/// Upper bound on `days_ahead`; keeps one request from writing years of rows.
pub const MAX_DAYS_AHEAD: u32 = 366;

// =============================================================================
// TYPES
// =============================================================================

/// Loosely typed body of `POST /schedules` and `PUT /schedules/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleBody {
    pub module_id: Option<String>,
    pub feed_date: Option<String>,
    pub feed_time: Option<String>,
    pub amount: Option<f64>,
    pub status: Option<String>,
}

/// Loosely typed body of `POST /schedules/recurring`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecurringBody {
    pub module_id: Option<String>,
    pub start_date: Option<String>,
    pub feed_time: Option<String>,
    pub amount: Option<f64>,
    pub days_ahead: Option<u32>,
}

/// Validated recurring request.
#[derive(Debug, Clone, PartialEq)]
pub struct RecurringPlan {
    pub module_id: String,
    pub start_date: NaiveDate,
    pub feed_time: String,
    pub amount: f64,
    pub days_ahead: u32,
}

/// Query filters of `GET /schedules`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub module_id: Option<String>,
}

/// Earliest due pending schedule for a module, as reported to the device.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DueSchedule {
    pub schedule_id: i64,
    pub amount: f64,
    pub feed_date: NaiveDate,
    pub feed_time: String,
}

// =============================================================================
// VALIDATION
// =============================================================================

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn parse_date(raw: &str, field: &str) -> Result<NaiveDate, FeederError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| FeederError::invalid(format!("Invalid {field} format. Use YYYY-MM-DD")))
}

/// Accept `HH:MM`, normalising single-digit hours.
///
/// # Errors
///
/// Returns `Invalid` when the value is not a 24h clock time.
pub fn normalize_feed_time(raw: &str) -> Result<String, FeederError> {
    chrono::NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .map(|t| t.format("%H:%M").to_string())
        .map_err(|_| FeederError::invalid("Invalid feed_time format. Use HH:MM"))
}

fn positive_amount(amount: Option<f64>) -> Result<f64, FeederError> {
    match amount {
        None => Err(FeederError::invalid("amount is required")),
        Some(a) if a.is_finite() && a > 0.0 => Ok(a),
        Some(_) => Err(FeederError::invalid("amount must be greater than 0")),
    }
}

impl ScheduleBody {
    /// Validate into a `NewSchedule`. Status defaults to `pending`.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` naming the first missing or malformed field.
    pub fn validate(&self) -> Result<NewSchedule, FeederError> {
        let feed_date = non_blank(self.feed_date.as_ref()).ok_or_else(|| FeederError::invalid("feed_date is required"))?;
        let feed_date = parse_date(feed_date, "feed_date")?;
        let module_id = non_blank(self.module_id.as_ref()).ok_or_else(|| FeederError::invalid("module_id is required"))?;
        let feed_time = non_blank(self.feed_time.as_ref()).ok_or_else(|| FeederError::invalid("feed_time is required"))?;
        let feed_time = normalize_feed_time(feed_time)?;
        let amount = positive_amount(self.amount)?;
        let status = match non_blank(self.status.as_ref()) {
            None => ScheduleStatus::Pending,
            Some(raw) => ScheduleStatus::parse(raw).ok_or_else(|| FeederError::invalid(format!("Invalid status: {raw}")))?,
        };
        Ok(NewSchedule { module_id: module_id.to_owned(), feed_date, feed_time, amount, status })
    }
}

impl RecurringBody {
    /// Validate into a `RecurringPlan`.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` naming the first missing or malformed field.
    pub fn validate(&self) -> Result<RecurringPlan, FeederError> {
        let feed_time = non_blank(self.feed_time.as_ref()).ok_or_else(|| FeederError::invalid("feed_time is required"))?;
        let amount = positive_amount(self.amount)?;
        let start_date =
            non_blank(self.start_date.as_ref()).ok_or_else(|| FeederError::invalid("start_date is required"))?;
        let start_date = parse_date(start_date, "start_date")?;
        let module_id = non_blank(self.module_id.as_ref()).ok_or_else(|| FeederError::invalid("module_id is required"))?;
        let days_ahead = self.days_ahead.unwrap_or(DEFAULT_DAYS_AHEAD);
        if days_ahead > MAX_DAYS_AHEAD {
            return Err(FeederError::invalid(format!("days_ahead must be at most {MAX_DAYS_AHEAD}")));
        }
        Ok(RecurringPlan {
            module_id: module_id.to_owned(),
            start_date,
            feed_time: normalize_feed_time(feed_time)?,
            amount,
            days_ahead,
        })
    }
}

impl RecurringPlan {
    /// Consecutive dates starting at `start_date`, `days_ahead` long.
    #[must_use]
    pub fn dates(&self) -> Vec<NaiveDate> {
        (0..self.days_ahead)
            .filter_map(|offset| self.start_date.checked_add_days(Days::new(u64::from(offset))))
            .collect()
    }
}

/// Parse the `schedule_id` form field sent by devices.
///
/// # Errors
///
/// Returns `Invalid` when the field is absent, blank, or not an integer.
pub fn parse_schedule_id(raw: Option<&str>) -> Result<i64, FeederError> {
    let raw = raw.map(str::trim).filter(|v| !v.is_empty()).ok_or_else(|| FeederError::invalid("Missing schedule_id"))?;
    raw.parse().map_err(|_| FeederError::invalid("schedule_id must be an integer"))
}

// =============================================================================
// CRUD
// =============================================================================

type ScheduleRow = (i64, String, NaiveDate, String, f64, String);

fn schedule_from_row((schedule_id, module_id, feed_date, feed_time, amount, status): ScheduleRow) -> Schedule {
    Schedule {
        schedule_id,
        module_id,
        feed_date,
        feed_time,
        amount,
        status: ScheduleStatus::parse(&status).unwrap_or_default(),
    }
}

/// List schedules matching the optional filters, ordered by date then time.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_schedules(pool: &PgPool, filter: &ScheduleFilter) -> Result<Vec<Schedule>, FeederError> {
    let rows = sqlx::query_as::<_, ScheduleRow>(
        "SELECT schedule_id, module_id, feed_date, feed_time, amount, status \
         FROM schedules \
         WHERE ($1::text IS NULL OR module_id = $1) \
           AND ($2::date IS NULL OR feed_date >= $2) \
           AND ($3::date IS NULL OR feed_date <= $3) \
         ORDER BY feed_date, feed_time, schedule_id",
    )
    .bind(filter.module_id.as_deref())
    .bind(filter.start_date)
    .bind(filter.end_date)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(schedule_from_row).collect())
}

/// Insert one schedule and return its id.
///
/// # Errors
///
/// Returns `Invalid` for an unknown module, or a database error.
pub async fn create_schedule(pool: &PgPool, schedule: &NewSchedule) -> Result<i64, FeederError> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO schedules (module_id, feed_date, feed_time, amount, status) \
         VALUES ($1, $2, $3, $4, $5) RETURNING schedule_id",
    )
    .bind(&schedule.module_id)
    .bind(schedule.feed_date)
    .bind(&schedule.feed_time)
    .bind(schedule.amount)
    .bind(schedule.status.as_str())
    .fetch_one(pool)
    .await
    .map_err(|e| FeederError::from_write(e, "schedule"))?;
    Ok(id)
}

/// Create one pending schedule per day of `plan`, skipping days that already
/// have a schedule for the same module and time.
///
/// # Errors
///
/// Returns `Invalid` for an unknown module, or a database error. Rows created
/// before the failure are rolled back.
pub async fn create_recurring(pool: &PgPool, plan: &RecurringPlan) -> Result<RecurringScheduleResponse, FeederError> {
    let mut tx = pool.begin().await?;
    let mut created = Vec::new();
    for date in plan.dates() {
        let inserted = sqlx::query(
            "INSERT INTO schedules (module_id, feed_date, feed_time, amount, status) \
             SELECT $1, $2, $3, $4, 'pending' \
             WHERE NOT EXISTS ( \
                 SELECT 1 FROM schedules WHERE module_id = $1 AND feed_date = $2 AND feed_time = $3 \
             )",
        )
        .bind(&plan.module_id)
        .bind(date)
        .bind(&plan.feed_time)
        .bind(plan.amount)
        .execute(&mut *tx)
        .await
        .map_err(|e| FeederError::from_write(e, "schedule"))?;
        if inserted.rows_affected() > 0 {
            created.push(date);
        }
    }
    tx.commit().await?;

    info!(module_id = %plan.module_id, created = created.len(), requested = plan.days_ahead, "recurring schedules created");
    Ok(RecurringScheduleResponse { success: true, created_count: created.len(), dates: created })
}

/// Replace every field of a schedule.
///
/// # Errors
///
/// Returns `NotFound` if the schedule does not exist, `Invalid` for an
/// unknown module, or a database error.
pub async fn update_schedule(pool: &PgPool, schedule_id: i64, schedule: &NewSchedule) -> Result<(), FeederError> {
    let result = sqlx::query(
        "UPDATE schedules SET module_id = $1, feed_date = $2, feed_time = $3, amount = $4, status = $5 \
         WHERE schedule_id = $6",
    )
    .bind(&schedule.module_id)
    .bind(schedule.feed_date)
    .bind(&schedule.feed_time)
    .bind(schedule.amount)
    .bind(schedule.status.as_str())
    .bind(schedule_id)
    .execute(pool)
    .await
    .map_err(|e| FeederError::from_write(e, "schedule"))?;
    if result.rows_affected() == 0 {
        return Err(FeederError::not_found("Schedule not found"));
    }
    Ok(())
}

/// Delete a schedule. History rows keep their entry with a null schedule.
///
/// # Errors
///
/// Returns a database error if the delete fails.
pub async fn delete_schedule(pool: &PgPool, schedule_id: i64) -> Result<(), FeederError> {
    sqlx::query("DELETE FROM schedules WHERE schedule_id = $1")
        .bind(schedule_id)
        .execute(pool)
        .await?;
    Ok(())
}

// =============================================================================
// DEVICE HANDSHAKE
// =============================================================================

/// Earliest pending schedule for `module_id` on `date` whose time is at or
/// before `time` (`HH:MM`).
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn due_schedule(
    pool: &PgPool,
    module_id: &str,
    date: NaiveDate,
    time: &str,
) -> Result<Option<DueSchedule>, FeederError> {
    let row = sqlx::query_as::<_, (i64, f64, NaiveDate, String)>(
        "SELECT schedule_id, amount, feed_date, feed_time FROM schedules \
         WHERE module_id = $1 AND feed_date = $2 AND feed_time <= $3 AND status = 'pending' \
         ORDER BY feed_time ASC, schedule_id ASC LIMIT 1",
    )
    .bind(module_id)
    .bind(date)
    .bind(time)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|(schedule_id, amount, feed_date, feed_time)| DueSchedule { schedule_id, amount, feed_date, feed_time }))
}

/// Mark a schedule done and append a history row.
///
/// When `module_id` is given it must own the schedule.
///
/// # Errors
///
/// - `NotFound` if the schedule does not exist.
/// - `Invalid` if it is already done.
/// - `Forbidden` on module mismatch.
pub async fn complete_schedule(pool: &PgPool, schedule_id: i64, module_id: Option<&str>) -> Result<(), FeederError> {
    let mut tx = pool.begin().await?;
    let row = sqlx::query_as::<_, (String, String)>(
        "SELECT module_id, status FROM schedules WHERE schedule_id = $1 FOR UPDATE",
    )
    .bind(schedule_id)
    .fetch_optional(&mut *tx)
    .await?;
    let Some((owner, status)) = row else {
        return Err(FeederError::not_found("Schedule not found"));
    };
    if status == ScheduleStatus::Done.as_str() {
        return Err(FeederError::invalid("Schedule already completed"));
    }
    if let Some(claimed) = module_id.filter(|m| !m.is_empty())
        && claimed != owner
    {
        return Err(FeederError::Forbidden("Module ID mismatch".to_owned()));
    }

    sqlx::query("UPDATE schedules SET status = 'done' WHERE schedule_id = $1")
        .bind(schedule_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("INSERT INTO history (schedule_id) VALUES ($1)")
        .bind(schedule_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    info!(schedule_id, module_id = %owner, "schedule completed");
    Ok(())
}
