use super::*;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

#[test]
fn report_filenames_embed_date() {
    assert_eq!(ReportKind::Camera.filename(day()), "camera-monitoring-2026-10-16.pdf");
    assert_eq!(ReportKind::History.filename(day()), "feeding-history-2026-10-16.pdf");
    assert_eq!(ReportKind::Analytics.filename(day()), "analytics-report-2026-10-16.pdf");
}

#[test]
fn history_report_is_landscape() {
    assert_eq!(ReportKind::History.orientation(), Orientation::Landscape);
    assert_eq!(ReportKind::Camera.orientation(), Orientation::Portrait);
    assert_eq!(ReportKind::Analytics.orientation(), Orientation::Portrait);
}

#[test]
fn report_titles_match_views() {
    assert_eq!(ReportKind::Camera.title(), "Camera Monitoring Report");
    assert_eq!(ReportKind::History.title(), "Feeding History Report");
    assert_eq!(ReportKind::Analytics.title(), "Analytics Report");
}

#[test]
fn options_serialize_to_converter_shape() {
    let value = serde_json::to_value(ReportKind::Analytics.options(day())).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "margin": 10.0,
            "filename": "analytics-report-2026-10-16.pdf",
            "image": { "type": "jpeg", "quality": 0.95 },
            "html2canvas": { "scale": 1.5, "useCORS": true },
            "jsPDF": { "unit": "mm", "format": "a4", "orientation": "portrait" }
        })
    );
}

#[test]
fn camera_options_use_higher_scale() {
    let options = ReportKind::Camera.options(day());
    assert_eq!(options.html2canvas.scale, 2.0);
    assert_eq!(options.image.quality, 0.98);
}
