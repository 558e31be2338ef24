use super::*;

#[test]
fn status_codes_match_variants() {
    assert_eq!(FeederError::not_found("x").status_code(), StatusCode::NOT_FOUND);
    assert_eq!(FeederError::invalid("x").status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(FeederError::Forbidden("x".into()).status_code(), StatusCode::FORBIDDEN);
    assert_eq!(FeederError::Conflict("x".into()).status_code(), StatusCode::CONFLICT);
    assert_eq!(FeederError::Database(sqlx::Error::RowNotFound).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        FeederError::Io(std::io::Error::other("disk")).status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn client_errors_display_bare_message() {
    assert_eq!(FeederError::invalid("Missing module_id").to_string(), "Missing module_id");
}

#[tokio::test]
async fn into_response_writes_failure_envelope() {
    let response = FeederError::not_found("Schedule not found").into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, serde_json::json!({ "success": false, "error": "Schedule not found" }));
}
