use super::*;

#[test]
fn weekly_series_fills_all_days_in_order() {
    let series = weekly_series(&[
        WeeklyPoint { day: "Wed".into(), amount: 300.0 },
        WeeklyPoint { day: "Sun".into(), amount: 120.0 },
    ]);
    let days: Vec<&str> = series.iter().map(|(d, _)| d.as_str()).collect();
    assert_eq!(days, WEEKDAYS.to_vec());
    assert_eq!(series[0].1, 120.0);
    assert_eq!(series[3].1, 300.0);
    assert_eq!(series[6].1, 0.0);
}

#[test]
fn status_entries_capitalize_and_color() {
    let entries = status_entries(&[
        StatusCount { status: "active".into(), count: 3 },
        StatusCount { status: "inactive".into(), count: 1 },
        StatusCount { status: "maintenance".into(), count: 2 },
    ]);
    assert_eq!(entries[0], ("Active".to_owned(), 3.0, ACTIVE_COLOR.to_owned()));
    assert_eq!(entries[1].0, "Inactive");
    assert_eq!(entries[1].2, INACTIVE_COLOR);
    assert_eq!(entries[2].2, INACTIVE_COLOR);
}

#[test]
fn summary_labels_round_and_ratio() {
    let mut state = AnalyticsState::default();
    assert_eq!(state.total_fed_label(), "0g");
    state.summary = Some(AnalyticsSummary { total_fed_today: 1249.6, active_modules: 2, total_modules: 3 });
    assert_eq!(state.total_fed_label(), "1250g");
    assert_eq!(state.active_modules_label(), "2/3");
}
