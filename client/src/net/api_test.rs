use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn snapshot_image_url_points_at_static_route() {
    assert_eq!(snapshot_image_url("cam1_1700000000.jpg"), "/snapshots/cam1_1700000000.jpg");
}

#[test]
fn snapshot_endpoint_formats_expected_path() {
    assert_eq!(snapshot_endpoint("cam1_1.jpg"), "/api/snapshots/cam1_1.jpg");
}

#[test]
fn snapshot_paths_escape_reserved_characters() {
    assert_eq!(snapshot_endpoint("front door#2?_1.jpg"), "/api/snapshots/front%20door%232%3F_1.jpg");
    assert_eq!(snapshot_image_url("a/b%_1.jpg"), "/snapshots/a%2Fb%25_1.jpg");
}

#[test]
fn schedules_in_range_endpoint_uses_iso_dates() {
    assert_eq!(
        schedules_in_range_endpoint(date(2026, 10, 16), date(2026, 11, 15)),
        "/schedules?start_date=2026-10-16&end_date=2026-11-15"
    );
}

#[test]
fn recurring_schedules_endpoint_formats_expected_path() {
    assert_eq!(recurring_schedules_endpoint(), "/schedules/recurring");
}

#[test]
fn schedule_and_history_endpoints_embed_ids() {
    assert_eq!(schedule_endpoint(42), "/schedules/42");
    assert_eq!(history_entry_endpoint(9), "/history/9");
}

#[test]
fn request_failed_message_formats_status() {
    assert_eq!(request_failed_message(500), "HTTP error! status: 500");
}
