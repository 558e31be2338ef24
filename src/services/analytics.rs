//! Dashboard aggregates: today's total, the last week by weekday, and module
//! status counts.
//!
//! "Today" and weekday buckets are computed in the display zone, not UTC.

#[cfg(test)]
#[path = "analytics_test.rs"]
mod analytics_test;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use client::net::types::{AnalyticsSummary, StatusCount, WeeklyPoint};
use sqlx::PgPool;

use crate::error::FeederError;

const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Short weekday name for a Postgres `DOW` value (0 = Sunday).
#[must_use]
pub fn weekday_name(dow: i32) -> Option<&'static str> {
    usize::try_from(dow).ok().and_then(|i| WEEKDAY_NAMES.get(i).copied())
}

/// UTC half-open range `[start, end)` covering `date` in `offset`.
#[must_use]
pub fn day_bounds(date: NaiveDate, offset: &FixedOffset) -> (DateTime<Utc>, DateTime<Utc>) {
    let midnight = date.and_time(NaiveTime::MIN);
    let start = offset
        .from_local_datetime(&midnight)
        .single()
        .map_or_else(|| Utc.from_utc_datetime(&midnight), |dt| dt.with_timezone(&Utc));
    (start, start + Duration::days(1))
}

/// Totals for the summary cards.
///
/// # Errors
///
/// Returns a database error if any query fails.
pub async fn summary(pool: &PgPool, now: DateTime<FixedOffset>) -> Result<AnalyticsSummary, FeederError> {
    let (start, end) = day_bounds(now.date_naive(), now.offset());
    let total_fed_today: f64 = sqlx::query_scalar(
        "SELECT COALESCE(SUM(s.amount), 0)::float8 FROM history h \
         JOIN schedules s ON h.schedule_id = s.schedule_id \
         WHERE h.created_at >= $1 AND h.created_at < $2",
    )
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await?;

    let (active_modules, total_modules) = sqlx::query_as::<_, (i64, i64)>(
        "SELECT COUNT(*) FILTER (WHERE status = 'active'), COUNT(*) FROM modules",
    )
    .fetch_one(pool)
    .await?;

    Ok(AnalyticsSummary { total_fed_today, active_modules, total_modules })
}

/// Amount fed per weekday over the last seven days, Sunday first. Days with
/// no feedings are omitted.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn weekly(pool: &PgPool, now: DateTime<FixedOffset>) -> Result<Vec<WeeklyPoint>, FeederError> {
    let since = now.with_timezone(&Utc) - Duration::days(7);
    let offset_secs = f64::from(now.offset().local_minus_utc());
    let rows = sqlx::query_as::<_, (i32, f64)>(
        "SELECT EXTRACT(DOW FROM (h.created_at AT TIME ZONE 'UTC') + $2::float8 * INTERVAL '1 second')::int AS dow, \
                COALESCE(SUM(s.amount), 0)::float8 AS amount \
         FROM history h \
         JOIN schedules s ON h.schedule_id = s.schedule_id \
         WHERE h.created_at >= $1 \
         GROUP BY dow ORDER BY dow",
    )
    .bind(since)
    .bind(offset_secs)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(dow, amount)| weekday_name(dow).map(|day| WeeklyPoint { day: day.to_owned(), amount }))
        .collect())
}

/// Module counts grouped by status.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn module_status(pool: &PgPool) -> Result<Vec<StatusCount>, FeederError> {
    let rows = sqlx::query_as::<_, (String, i64)>("SELECT status, COUNT(*) FROM modules GROUP BY status ORDER BY status")
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|(status, count)| StatusCount { status, count }).collect())
}
