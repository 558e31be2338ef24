use chrono::TimeZone;

use super::*;

fn plus_eight() -> FixedOffset {
    FixedOffset::east_opt(8 * 3600).unwrap()
}

#[test]
fn created_at_is_shifted_into_display_zone() {
    let stored = Utc.with_ymd_and_hms(2026, 10, 15, 20, 30, 5).unwrap();
    assert_eq!(format_created_at(stored, &plus_eight()), "2026-10-16 04:30:05");
}

#[test]
fn orphaned_row_keeps_null_schedule_fields() {
    let stored = Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).unwrap();
    let record = record_from_row((4, stored, None, None, None, None, None, None), &plus_eight());
    assert_eq!(record.history_id, 4);
    assert_eq!(record.created_at.as_deref(), Some("2026-10-16 08:00:00"));
    assert_eq!(record.schedule_id, None);
    assert_eq!(record.status, None);
}

#[test]
fn joined_row_parses_status() {
    let stored = Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).unwrap();
    let row = (
        1,
        stored,
        Some(7),
        Some("M1".to_owned()),
        NaiveDate::from_ymd_opt(2026, 10, 16),
        Some("08:00".to_owned()),
        Some(150.0),
        Some("done".to_owned()),
    );
    let record = record_from_row(row, &plus_eight());
    assert_eq!(record.status, Some(ScheduleStatus::Done));
    assert_eq!(record.amount, Some(150.0));
}

#[test]
fn new_history_accepts_missing_schedule_id() {
    let body: NewHistory = serde_json::from_str("{}").unwrap();
    assert_eq!(body.schedule_id, None);
}
