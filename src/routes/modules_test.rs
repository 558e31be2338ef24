use super::*;
use crate::state::test_helpers::test_app_state;

#[test]
fn body_defaults_status_to_active() {
    let body = ModuleBody { module_id: Some("M1".into()), cam_id: Some("C1".into()), ..ModuleBody::default() };
    let module = body.into_module(None).unwrap();
    assert_eq!(module.status, "active");
    assert_eq!(module.weight, None);
}

#[test]
fn path_id_wins_over_body_id() {
    let body = ModuleBody { module_id: Some("other".into()), cam_id: Some("C1".into()), ..ModuleBody::default() };
    assert_eq!(body.into_module(Some("M9")).unwrap().module_id, "M9");
}

#[tokio::test]
async fn create_without_cam_id_is_rejected_before_db() {
    let body = ModuleBody { module_id: Some("M1".into()), ..ModuleBody::default() };
    let err = create_module(State(test_app_state()), Json(body)).await.unwrap_err();
    assert_eq!(err.to_string(), "Missing cam_id");
}
