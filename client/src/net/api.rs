//! REST API helpers for communicating with the feeder backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, same-origin paths.
//! Server-side (SSR): stubs returning an error since polling only happens in
//! the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every helper returns `Result<_, String>`; the string is user-presentable.
//! Network failures, non-2xx statuses, and malformed JSON all collapse into
//! that error so views can degrade to an inline message without panicking.

#![allow(clippy::unused_async)]
#![cfg_attr(not(feature = "hydrate"), allow(dead_code))]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use chrono::NaiveDate;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

#[cfg(feature = "hydrate")]
use super::types::MutationResponse;
use super::types::{
    AnalyticsSummary, HistoryRecord, Module, NewSchedule, RecurringScheduleRequest, RecurringScheduleResponse,
    Schedule, Snapshot, StatusCount, WeeklyPoint,
};
#[cfg(feature = "hydrate")]
use super::types::SnapshotList;

const SNAPSHOTS_ENDPOINT: &str = "/api/snapshots";
const MODULES_ENDPOINT: &str = "/modules";
const SCHEDULES_ENDPOINT: &str = "/schedules";
const HISTORY_ENDPOINT: &str = "/history";

/// Characters escaped when a filename becomes a single URL path segment.
const SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

fn path_segment(raw: &str) -> String {
    utf8_percent_encode(raw, SEGMENT_ENCODE_SET).to_string()
}

/// URL of a stored snapshot image.
#[must_use]
pub fn snapshot_image_url(filename: &str) -> String {
    format!("/snapshots/{}", path_segment(filename))
}

#[cfg(any(test, feature = "hydrate"))]
fn snapshot_endpoint(filename: &str) -> String {
    format!("{SNAPSHOTS_ENDPOINT}/{}", path_segment(filename))
}

#[cfg(any(test, feature = "hydrate"))]
fn schedules_in_range_endpoint(start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "{SCHEDULES_ENDPOINT}?start_date={}&end_date={}",
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d")
    )
}

#[cfg(any(test, feature = "hydrate"))]
fn recurring_schedules_endpoint() -> String {
    format!("{SCHEDULES_ENDPOINT}/recurring")
}

#[cfg(any(test, feature = "hydrate"))]
fn schedule_endpoint(schedule_id: i64) -> String {
    format!("{SCHEDULES_ENDPOINT}/{schedule_id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn history_entry_endpoint(history_id: i64) -> String {
    format!("{HISTORY_ENDPOINT}/{history_id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn request_failed_message(status: u16) -> String {
    format!("HTTP error! status: {status}")
}

#[cfg(not(feature = "hydrate"))]
fn unavailable<T>() -> Result<T, String> {
    Err("not available on server".to_owned())
}

#[cfg(feature = "hydrate")]
async fn get_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, String> {
    let resp = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(request_failed_message(resp.status()));
    }
    resp.json::<T>().await.map_err(|e| e.to_string())
}

#[cfg(feature = "hydrate")]
async fn send_json<B, T>(builder: gloo_net::http::RequestBuilder, body: &B) -> Result<T, String>
where
    B: serde::Serialize,
    T: serde::de::DeserializeOwned,
{
    let resp = builder
        .json(body)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(request_failed_message(resp.status()));
    }
    resp.json::<T>().await.map_err(|e| e.to_string())
}

#[cfg(feature = "hydrate")]
async fn send_delete(url: &str, require_ok_status: bool) -> Result<MutationResponse, String> {
    let resp = gloo_net::http::Request::delete(url)
        .header("Content-Type", "application/json")
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if require_ok_status && !resp.ok() {
        return Err(request_failed_message(resp.status()));
    }
    let status = resp.status();
    match resp.json::<MutationResponse>().await {
        Ok(body) => Ok(body),
        Err(_) if !(200..300).contains(&status) => Err(request_failed_message(status)),
        Err(e) => Err(e.to_string()),
    }
}

// =============================================================================
// SNAPSHOTS
// =============================================================================

/// Fetch all snapshots, newest first, from `GET /api/snapshots`.
///
/// # Errors
///
/// Returns an error string on transport failure or when the backend reports
/// `success: false`.
pub async fn fetch_snapshots() -> Result<Vec<Snapshot>, String> {
    #[cfg(feature = "hydrate")]
    {
        let body: SnapshotList = get_json(SNAPSHOTS_ENDPOINT).await?;
        if !body.success {
            return Err(body.error.unwrap_or_else(|| "snapshot listing failed".to_owned()));
        }
        Ok(body.images)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        unavailable()
    }
}

/// Delete one snapshot via `DELETE /api/snapshots/{filename}`.
///
/// The backend reports failures in the JSON body (including on 4xx), so the
/// body is inspected regardless of status.
///
/// # Errors
///
/// Returns the backend's failure reason, or a transport error string.
pub async fn delete_snapshot(filename: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let body = send_delete(&snapshot_endpoint(filename), false).await?;
        if body.success { Ok(()) } else { Err(body.failure_reason()) }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = filename;
        unavailable()
    }
}

// =============================================================================
// MODULES
// =============================================================================

/// Fetch every registered module from `GET /modules`.
///
/// # Errors
///
/// Returns an error string if the request fails.
pub async fn fetch_modules() -> Result<Vec<Module>, String> {
    #[cfg(feature = "hydrate")]
    {
        get_json(MODULES_ENDPOINT).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        unavailable()
    }
}

// =============================================================================
// SCHEDULES
// =============================================================================

/// Fetch schedules with `feed_date` in `[start, end]`.
///
/// # Errors
///
/// Returns an error string if the request fails.
pub async fn fetch_schedules(start: NaiveDate, end: NaiveDate) -> Result<Vec<Schedule>, String> {
    #[cfg(feature = "hydrate")]
    {
        get_json(&schedules_in_range_endpoint(start, end)).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (start, end);
        unavailable()
    }
}

/// Create a single schedule via `POST /schedules`.
///
/// # Errors
///
/// Returns an error string if the request fails.
pub async fn create_schedule(body: &NewSchedule) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let _: MutationResponse = send_json(gloo_net::http::Request::post(SCHEDULES_ENDPOINT), body).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = body;
        unavailable()
    }
}

/// Create consecutive daily schedules via `POST /schedules/recurring`.
///
/// # Errors
///
/// Returns an error string if the request fails.
pub async fn create_recurring_schedules(body: &RecurringScheduleRequest) -> Result<RecurringScheduleResponse, String> {
    #[cfg(feature = "hydrate")]
    {
        send_json(gloo_net::http::Request::post(&recurring_schedules_endpoint()), body).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = body;
        unavailable()
    }
}

/// Replace a schedule via `PUT /schedules/{id}`.
///
/// # Errors
///
/// Returns an error string if the request fails.
pub async fn update_schedule(schedule_id: i64, body: &NewSchedule) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let _: MutationResponse =
            send_json(gloo_net::http::Request::put(&schedule_endpoint(schedule_id)), body).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (schedule_id, body);
        unavailable()
    }
}

/// Delete a schedule via `DELETE /schedules/{id}`.
///
/// # Errors
///
/// Returns an error string if the request fails.
pub async fn delete_schedule(schedule_id: i64) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        send_delete(&schedule_endpoint(schedule_id), true).await.map(|_| ())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = schedule_id;
        unavailable()
    }
}

// =============================================================================
// HISTORY
// =============================================================================

/// Fetch feeding history, newest first, from `GET /history`.
///
/// # Errors
///
/// Returns an error string if the request fails.
pub async fn fetch_history() -> Result<Vec<HistoryRecord>, String> {
    #[cfg(feature = "hydrate")]
    {
        get_json(HISTORY_ENDPOINT).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        unavailable()
    }
}

/// Delete a history row via `DELETE /history/{id}`.
///
/// # Errors
///
/// Returns an error string on non-2xx status or when the body reports
/// `success: false`.
pub async fn delete_history(history_id: i64) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let body = send_delete(&history_entry_endpoint(history_id), true).await?;
        if body.success { Ok(()) } else { Err(body.failure_reason()) }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = history_id;
        unavailable()
    }
}

// =============================================================================
// ANALYTICS
// =============================================================================

/// Fetch `GET /analytics/summary`.
///
/// # Errors
///
/// Returns an error string if the request fails.
pub async fn fetch_analytics_summary() -> Result<AnalyticsSummary, String> {
    #[cfg(feature = "hydrate")]
    {
        get_json("/analytics/summary").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        unavailable()
    }
}

/// Fetch `GET /analytics/weekly`.
///
/// # Errors
///
/// Returns an error string if the request fails.
pub async fn fetch_weekly_feeding() -> Result<Vec<WeeklyPoint>, String> {
    #[cfg(feature = "hydrate")]
    {
        get_json("/analytics/weekly").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        unavailable()
    }
}

/// Fetch `GET /analytics/module-status`.
///
/// # Errors
///
/// Returns an error string if the request fails.
pub async fn fetch_module_status() -> Result<Vec<StatusCount>, String> {
    #[cfg(feature = "hydrate")]
    {
        get_json("/analytics/module-status").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        unavailable()
    }
}
