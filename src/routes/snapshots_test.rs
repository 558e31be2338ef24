use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::*;
use crate::state::test_helpers::test_app_state_with_images;

#[tokio::test]
async fn delete_traversal_is_bad_request() {
    let state = test_app_state_with_images(std::env::temp_dir());
    let err = delete_snapshot(State(state), Path("..\\boot.ini".into())).await.unwrap_err();
    assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_unknown_file_is_not_found() {
    let dir = std::env::temp_dir().join(format!("smartfeeder-route-snap-{}", std::process::id()));
    let state = test_app_state_with_images(dir);
    let err = delete_snapshot(State(state), Path("cam1_1.jpg".into())).await.unwrap_err();
    assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
}
