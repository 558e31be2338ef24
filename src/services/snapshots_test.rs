use super::*;
use crate::state::test_helpers::test_app_state_with_images;

#[test]
fn validate_filename_rejects_traversal() {
    assert!(validate_filename("cam1_1700000000.jpg").is_ok());
    for bad in ["", "../secret", "a/b.jpg", "a\\b.jpg", "x..jpg"] {
        let err = validate_filename(bad).unwrap_err();
        assert_eq!(err.to_string(), "Invalid filename", "{bad}");
    }
}

#[test]
fn upload_filename_uses_camera_and_seconds() {
    assert_eq!(upload_filename("cam1", 1_700_000_000), "cam1_1700000000.jpg");
}

#[test]
fn parse_category_defaults_to_during() {
    assert_eq!(parse_category(None).unwrap(), SnapshotCategory::During);
    assert_eq!(parse_category(Some("  ")).unwrap(), SnapshotCategory::During);
    assert_eq!(parse_category(Some("after")).unwrap(), SnapshotCategory::After);
    assert_eq!(parse_category(Some("before")).unwrap_err().to_string(), "Invalid category: before");
}

#[test]
fn stored_row_with_unknown_category_maps_to_unknown() {
    let snap = snapshot_from_row(("a.jpg".into(), "cam1".into(), 5, "legacy".into()));
    assert_eq!(snap.category, SnapshotCategory::Unknown);
    assert_eq!(snap.timestamp, Some(5));
}

#[tokio::test]
async fn delete_missing_file_is_not_found_without_touching_db() {
    let dir = std::env::temp_dir().join(format!("smartfeeder-snap-missing-{}", std::process::id()));
    let state = test_app_state_with_images(dir.clone());
    let err = delete_snapshot(&state.pool, &dir, "nope_1.jpg").await.unwrap_err();
    assert!(matches!(err, FeederError::NotFound(_)));
    assert_eq!(err.to_string(), "File not found");
}

#[tokio::test]
async fn delete_rejects_traversal_before_filesystem() {
    let dir = std::env::temp_dir();
    let state = test_app_state_with_images(dir.clone());
    let err = delete_snapshot(&state.pool, &dir, "../etc").await.unwrap_err();
    assert!(matches!(err, FeederError::Invalid(_)));
}

#[tokio::test]
async fn upload_with_unsafe_camera_id_is_rejected() {
    let dir = std::env::temp_dir();
    let state = test_app_state_with_images(dir.clone());
    let err = store_upload(&state.pool, &dir, "../cam", SnapshotCategory::During, 1, b"x").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid filename");
}
