use super::*;

#[test]
fn weekday_name_maps_postgres_dow() {
    assert_eq!(weekday_name(0), Some("Sun"));
    assert_eq!(weekday_name(6), Some("Sat"));
    assert_eq!(weekday_name(7), None);
    assert_eq!(weekday_name(-1), None);
}

#[test]
fn day_bounds_shift_midnight_by_offset() {
    let offset = FixedOffset::east_opt(8 * 3600).unwrap();
    let (start, end) = day_bounds(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(), &offset);
    assert_eq!(start, Utc.with_ymd_and_hms(2026, 10, 15, 16, 0, 0).unwrap());
    assert_eq!(end - start, Duration::days(1));
}

#[test]
fn day_bounds_in_utc_are_calendar_midnights() {
    let utc = FixedOffset::east_opt(0).unwrap();
    let (start, end) = day_bounds(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(), &utc);
    assert_eq!(start, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
    assert_eq!(end, Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap());
}
