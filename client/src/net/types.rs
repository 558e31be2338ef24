//! Shared wire DTOs for the dashboard/backend boundary.
//!
//! DESIGN
//! ======
//! These types mirror the JSON emitted by the feeder REST API so serde
//! round-trips stay lossless. Fields the backend may omit or null out (left
//! joins, legacy rows) are modelled as `Option` rather than defaulted, so the
//! views can render "N/A"/"Unknown" explicitly.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Feeding phase a camera snapshot was captured in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotCategory {
    /// Captured while food was being dispensed.
    During,
    /// Captured after the feeding completed.
    After,
    /// Missing or unrecognised category; rendered in neither gallery.
    #[default]
    #[serde(other)]
    Unknown,
}

impl SnapshotCategory {
    /// Parse a stored category; only `during` and `after` are valid.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "during" => Some(Self::During),
            "after" => Some(Self::After),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::During => "during",
            Self::After => "after",
            Self::Unknown => "unknown",
        }
    }
}

/// A camera snapshot as listed by `GET /api/snapshots`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Image filename under `/snapshots/`.
    pub filename: String,
    #[serde(default)]
    pub camera_id: Option<String>,
    /// Capture time in seconds since the Unix epoch.
    #[serde(default, deserialize_with = "deserialize_opt_i64_from_number")]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub category: SnapshotCategory,
}

/// Envelope returned by `GET /api/snapshots`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapshotList {
    pub success: bool,
    #[serde(default)]
    pub images: Vec<Snapshot>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Lifecycle status of a feeding schedule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    #[default]
    Pending,
    Done,
    Cancelled,
}

impl ScheduleStatus {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(Self::Pending),
            "done" => Some(Self::Done),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
        }
    }
}

/// A planned feeding event for one module.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub schedule_id: i64,
    pub module_id: String,
    pub feed_date: NaiveDate,
    /// Wall-clock feeding time, `HH:MM`.
    pub feed_time: String,
    /// Grams to dispense.
    pub amount: f64,
    #[serde(default)]
    pub status: ScheduleStatus,
}

/// A feeding history row joined with its (possibly deleted) schedule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub history_id: i64,
    /// Completion time, `YYYY-MM-DD HH:MM:SS` in the backend's display zone.
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_i64_from_number")]
    pub schedule_id: Option<i64>,
    #[serde(default)]
    pub module_id: Option<String>,
    #[serde(default)]
    pub feed_date: Option<NaiveDate>,
    #[serde(default)]
    pub feed_time: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub status: Option<ScheduleStatus>,
}

/// A physical feeder unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub module_id: String,
    pub cam_id: String,
    pub status: String,
    /// Current hopper weight in grams, if the device has reported one.
    #[serde(default)]
    pub weight: Option<f64>,
}

impl Module {
    /// Whether the module accepts schedules (status `active`, case-insensitive).
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status.eq_ignore_ascii_case("active")
    }
}

/// Body for `POST /schedules` and `PUT /schedules/{id}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewSchedule {
    pub module_id: String,
    pub feed_date: NaiveDate,
    pub feed_time: String,
    pub amount: f64,
    pub status: ScheduleStatus,
}

/// Body for `POST /schedules/recurring`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecurringScheduleRequest {
    pub module_id: String,
    pub start_date: NaiveDate,
    pub feed_time: String,
    pub amount: f64,
    pub days_ahead: u32,
}

/// Response of `POST /schedules/recurring`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecurringScheduleResponse {
    pub success: bool,
    #[serde(default)]
    pub created_count: usize,
    #[serde(default)]
    pub dates: Vec<NaiveDate>,
}

/// Generic `{success, error?, message?}` envelope for mutating endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl MutationResponse {
    /// Human-readable reason for a failed mutation.
    #[must_use]
    pub fn failure_reason(&self) -> String {
        self.message
            .clone()
            .or_else(|| self.error.clone())
            .unwrap_or_else(|| "Unknown error".to_owned())
    }
}

/// Response of `GET /analytics/summary`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_fed_today: f64,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub active_modules: i64,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub total_modules: i64,
}

/// One day of `GET /analytics/weekly`. Days without feedings are omitted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPoint {
    /// Short weekday name, `Sun`..`Sat`.
    pub day: String,
    pub amount: f64,
}

/// One bucket of `GET /analytics/module-status`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: String,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub count: i64,
}

fn deserialize_opt_i64_from_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    number_to_i64(&value).map(Some).map_err(D::Error::custom)
}

fn deserialize_i64_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    number_to_i64(&value).map_err(D::Error::custom)
}

fn number_to_i64(value: &serde_json::Value) -> Result<i64, &'static str> {
    match value {
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.fract() == 0.0
                && float >= i64::MIN as f64
                && float <= i64::MAX as f64
            {
                return Ok(float as i64);
            }
            Err("expected integer-compatible number")
        }
        serde_json::Value::String(text) => text.trim().parse::<i64>().map_err(|_| "expected numeric string"),
        _ => Err("expected number"),
    }
}
