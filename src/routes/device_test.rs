use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::*;
use crate::state::test_helpers::test_app_state;

fn weight(module_id: Option<&str>, raw: Option<&str>) -> WeightForm {
    WeightForm { module_id: module_id.map(str::to_owned), weight: raw.map(str::to_owned) }
}

#[test]
fn parse_weight_accepts_range_bounds() {
    assert_eq!(parse_weight(&weight(Some("M1"), Some("0"))).unwrap(), ("M1".to_owned(), 0.0));
    assert_eq!(parse_weight(&weight(Some("M1"), Some(" 10000 "))).unwrap().1, 10_000.0);
}

#[test]
fn parse_weight_error_messages() {
    let cases = [
        (weight(None, Some("5")), "Missing module_id or weight"),
        (weight(Some("M1"), None), "Missing module_id or weight"),
        (weight(Some("M1"), Some("heavy")), "Weight must be a number"),
        (weight(Some("M1"), Some("-1")), "Invalid weight value"),
        (weight(Some("M1"), Some("10000.5")), "Invalid weight value"),
        (weight(Some("M1"), Some("NaN")), "Invalid weight value"),
    ];
    for (form, expected) in cases {
        assert_eq!(parse_weight(&form).unwrap_err().to_string(), expected);
    }
}

#[tokio::test]
async fn health_reports_mdns_ok() {
    assert_eq!(health().await, "mDNS OK");
}

#[tokio::test]
async fn check_schedule_without_module_is_bad_request() {
    let err = check_schedule(State(test_app_state()), Form(CheckForm::default())).await.unwrap_err();
    assert_eq!(err.to_string(), "Missing module_id");
    assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn complete_schedule_without_id_is_bad_request() {
    let form = CompleteForm { schedule_id: None, module_id: Some("M1".into()) };
    let err = complete_schedule(State(test_app_state()), Form(form)).await.unwrap_err();
    assert_eq!(err.to_string(), "Missing schedule_id");
}

#[tokio::test]
async fn weight_update_rejects_bad_value_before_db() {
    let err = weight_update(State(test_app_state()), Form(weight(Some("M1"), Some("abc")))).await.unwrap_err();
    assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
}
