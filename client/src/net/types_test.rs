use super::*;

// =============================================================
// Snapshot
// =============================================================

#[test]
fn snapshot_category_parses_known_values() {
    let during: Snapshot =
        serde_json::from_str(r#"{"filename":"cam1_1.jpg","camera_id":"cam1","timestamp":1,"category":"during"}"#)
            .unwrap();
    let after: Snapshot =
        serde_json::from_str(r#"{"filename":"cam1_2.jpg","camera_id":"cam1","timestamp":2,"category":"after"}"#)
            .unwrap();
    assert_eq!(during.category, SnapshotCategory::During);
    assert_eq!(after.category, SnapshotCategory::After);
}

#[test]
fn snapshot_unknown_or_missing_category_is_unknown() {
    let other: Snapshot = serde_json::from_str(r#"{"filename":"x.jpg","category":"before"}"#).unwrap();
    let missing: Snapshot = serde_json::from_str(r#"{"filename":"y.jpg"}"#).unwrap();
    assert_eq!(other.category, SnapshotCategory::Unknown);
    assert_eq!(missing.category, SnapshotCategory::Unknown);
    assert_eq!(missing.camera_id, None);
    assert_eq!(missing.timestamp, None);
}

#[test]
fn snapshot_timestamp_accepts_null_float_and_string() {
    let null_ts: Snapshot = serde_json::from_str(r#"{"filename":"a.jpg","timestamp":null}"#).unwrap();
    let float_ts: Snapshot = serde_json::from_str(r#"{"filename":"a.jpg","timestamp":1700000000.0}"#).unwrap();
    let string_ts: Snapshot = serde_json::from_str(r#"{"filename":"a.jpg","timestamp":"1700000000"}"#).unwrap();
    assert_eq!(null_ts.timestamp, None);
    assert_eq!(float_ts.timestamp, Some(1_700_000_000));
    assert_eq!(string_ts.timestamp, Some(1_700_000_000));
}

#[test]
fn snapshot_list_defaults_images_when_missing() {
    let list: SnapshotList = serde_json::from_str(r#"{"success":false,"error":"db down"}"#).unwrap();
    assert!(!list.success);
    assert!(list.images.is_empty());
    assert_eq!(list.error.as_deref(), Some("db down"));
}

// =============================================================
// Schedule / history
// =============================================================

#[test]
fn schedule_parses_backend_row() {
    let row: Schedule = serde_json::from_str(
        r#"{"schedule_id":7,"module_id":"M1","feed_date":"2026-10-16","feed_time":"15:00","amount":250.5,"status":"done"}"#,
    )
    .unwrap();
    assert_eq!(row.schedule_id, 7);
    assert_eq!(row.feed_date, NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
    assert_eq!(row.status, ScheduleStatus::Done);
    assert!((row.amount - 250.5).abs() < f64::EPSILON);
}

#[test]
fn schedule_status_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&ScheduleStatus::Pending).unwrap(), "\"pending\"");
    assert_eq!(serde_json::to_string(&ScheduleStatus::Cancelled).unwrap(), "\"cancelled\"");
    assert_eq!(ScheduleStatus::Done.as_str(), "done");
}

#[test]
fn status_and_category_parse_stored_values() {
    assert_eq!(ScheduleStatus::parse("done"), Some(ScheduleStatus::Done));
    assert_eq!(ScheduleStatus::parse("DONE"), None);
    assert_eq!(SnapshotCategory::parse("after"), Some(SnapshotCategory::After));
    assert_eq!(SnapshotCategory::parse("unknown"), None);
}

#[test]
fn history_record_tolerates_orphaned_schedule() {
    let row: HistoryRecord = serde_json::from_str(
        r#"{"history_id":3,"created_at":"2026-10-16 08:00:00","schedule_id":null,"module_id":null,"feed_date":null,"feed_time":null,"amount":null,"status":null}"#,
    )
    .unwrap();
    assert_eq!(row.history_id, 3);
    assert_eq!(row.schedule_id, None);
    assert_eq!(row.module_id, None);
    assert_eq!(row.status, None);
}

// =============================================================
// Module
// =============================================================

#[test]
fn module_is_active_ignores_case() {
    let mut module: Module =
        serde_json::from_str(r#"{"module_id":"M1","cam_id":"C1","status":"Active","weight":null}"#).unwrap();
    assert!(module.is_active());
    module.status = "inactive".to_owned();
    assert!(!module.is_active());
    assert_eq!(module.weight, None);
}

// =============================================================
// Requests / responses
// =============================================================

#[test]
fn recurring_request_serializes_expected_shape() {
    let body = RecurringScheduleRequest {
        module_id: "M1".to_owned(),
        start_date: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
        feed_time: "07:30".to_owned(),
        amount: 100.0,
        days_ahead: 7,
    };
    assert_eq!(
        serde_json::to_value(&body).unwrap(),
        serde_json::json!({
            "module_id": "M1",
            "start_date": "2026-10-20",
            "feed_time": "07:30",
            "amount": 100.0,
            "days_ahead": 7
        })
    );
}

#[test]
fn mutation_response_failure_reason_prefers_message_then_error() {
    let with_message = MutationResponse { success: false, error: Some("e".into()), message: Some("m".into()) };
    let with_error = MutationResponse { success: false, error: Some("e".into()), message: None };
    let bare = MutationResponse::default();
    assert_eq!(with_message.failure_reason(), "m");
    assert_eq!(with_error.failure_reason(), "e");
    assert_eq!(bare.failure_reason(), "Unknown error");
}

#[test]
fn analytics_summary_accepts_float_counts() {
    let summary: AnalyticsSummary =
        serde_json::from_str(r#"{"total_fed_today":1250.0,"active_modules":2.0,"total_modules":3}"#).unwrap();
    assert_eq!(summary.active_modules, 2);
    assert_eq!(summary.total_modules, 3);
}
