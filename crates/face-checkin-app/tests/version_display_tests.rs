//! Integration tests for build-time version sourcing.

use face_checkin_app::app_version;

#[test]
fn version_display_tests_version_is_sourced_from_root_file() {
    let version = app_version();
    assert!(!version.trim().is_empty());
    assert_eq!(version, version.trim());
}
