//! Display formatting for dates, times, and weights.
//!
//! Every helper takes its reference point ("today", the time zone) as an
//! argument instead of reading the clock, so the views and their tests see
//! the same output for the same input.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use std::fmt::Display;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

/// Render grams without a trailing `.0` (`1000g`, `12.5g`).
#[must_use]
pub fn format_grams(value: f64) -> String {
    format!("{value}g")
}

/// Render an optional weight reading, `N/A` when the device never reported.
#[must_use]
pub fn format_weight(weight: Option<f64>) -> String {
    weight.map_or_else(|| "N/A".to_owned(), format_grams)
}

/// Convert `HH:MM` to a 12-hour clock (`15:00` -> `3:00 PM`).
///
/// Unparseable input is returned unchanged.
#[must_use]
pub fn format_feed_time(time: &str) -> String {
    if time.is_empty() {
        return "Not set".to_owned();
    }
    let Some((hours, minutes)) = time.split_once(':') else {
        return time.to_owned();
    };
    let Ok(hour) = hours.trim().parse::<u32>() else {
        return time.to_owned();
    };
    let meridiem = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display_hour}:{minutes} {meridiem}")
}

/// Relative label for a schedule date: `Today`, `Tomorrow`, or `Wed, Oct 21`
/// (with the year appended when it differs from `today`'s).
#[must_use]
pub fn feed_date_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        return "Today".to_owned();
    }
    if today.succ_opt() == Some(date) {
        return "Tomorrow".to_owned();
    }
    if date.format("%Y").to_string() == today.format("%Y").to_string() {
        date.format("%a, %b %-d").to_string()
    } else {
        date.format("%a, %b %-d, %Y").to_string()
    }
}

/// Format a snapshot capture time (epoch seconds) as `MM/DD/YYYY, hh:mm:ss AM`.
#[must_use]
pub fn format_snapshot_timestamp<Tz>(timestamp: Option<i64>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let Some(ts) = timestamp else {
        return "Unknown Time".to_owned();
    };
    match DateTime::from_timestamp(ts, 0) {
        Some(utc) => utc.with_timezone(tz).format("%m/%d/%Y, %I:%M:%S %p").to_string(),
        None => format!("ID: {ts}"),
    }
}

/// Format a history `created_at` (`YYYY-MM-DD HH:MM:SS`) as `Oct 16, 2026, 02:03:00 PM`.
#[must_use]
pub fn format_history_datetime(created_at: Option<&str>) -> String {
    let Some(raw) = created_at else {
        return "N/A".to_owned();
    };
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.format("%b %-d, %Y, %I:%M:%S %p").to_string())
        .unwrap_or_else(|_| raw.to_owned())
}

/// Format a calendar date as `Oct 16, 2026`.
#[must_use]
pub fn format_history_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "N/A".to_owned(), |d| d.format("%b %-d, %Y").to_string())
}

/// Uppercase the first character (`active` -> `Active`).
#[must_use]
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
