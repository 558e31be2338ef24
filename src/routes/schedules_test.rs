use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::*;
use crate::state::test_helpers::test_app_state;

#[tokio::test]
async fn create_without_feed_date_is_bad_request() {
    let err = create_schedule(State(test_app_state()), Json(ScheduleBody::default())).await.unwrap_err();
    assert_eq!(err.to_string(), "feed_date is required");
    assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn recurring_with_bad_start_date_is_bad_request() {
    let body = RecurringBody {
        module_id: Some("M1".into()),
        start_date: Some("10/16/2026".into()),
        feed_time: Some("15:00".into()),
        amount: Some(1000.0),
        days_ahead: None,
    };
    let err = create_recurring(State(test_app_state()), Json(body)).await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid start_date format. Use YYYY-MM-DD");
}

#[tokio::test]
async fn update_validates_body_before_db() {
    let body = ScheduleBody {
        module_id: Some("M1".into()),
        feed_date: Some("2026-10-16".into()),
        feed_time: Some("15:00".into()),
        amount: Some(-5.0),
        status: Some("pending".into()),
    };
    let err = update_schedule(State(test_app_state()), Path(3), Json(body)).await.unwrap_err();
    assert_eq!(err.to_string(), "amount must be greater than 0");
}
