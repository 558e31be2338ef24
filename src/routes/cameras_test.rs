use super::*;
use crate::state::test_helpers::test_app_state;

#[test]
fn blank_status_falls_back_to_active() {
    assert_eq!(status_or_active(None), "active");
    assert_eq!(status_or_active(Some(" ".into())), "active");
    assert_eq!(status_or_active(Some("inactive".into())), "inactive");
}

#[tokio::test]
async fn create_requires_cam_id() {
    let err = create_camera(State(test_app_state()), Json(CameraBody::default())).await.unwrap_err();
    assert_eq!(err.to_string(), "Missing cam_id");
}

#[tokio::test]
async fn update_requires_status() {
    let err = update_camera(State(test_app_state()), Path("C1".into()), Json(CameraBody::default()))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Missing status");
}
