//! Integration tests for the rejected submission path.

mod common;

use std::sync::Arc;

use common::MockTransport;
use face_checkin_app::{CheckInOutcome, WorkflowState};
use face_checkin_client::GENERIC_FAILURE_DETAIL;
use face_checkin_ui::{NoticeLevel, StatusTone};

#[test]
fn submission_failure_tests_surfaces_last_diagnostic_line() {
    let diagnostic = "Traceback (most recent call last):\n  frame\nFaceNotRecognized";
    let transport = Arc::new(MockTransport::new(Err(diagnostic.to_string())));
    let mut controller = common::active_controller(transport.clone());

    controller.drain_notices();
    let outcome = controller.capture_and_check_in();
    assert_eq!(outcome, CheckInOutcome::Rejected("FaceNotRecognized".to_string()));

    assert_eq!(controller.ui().status_line, "FaceNotRecognized");
    assert_eq!(controller.ui().status_tone, StatusTone::Danger);

    let notices = controller.drain_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert!(notices[0].blocking);
    assert_eq!(notices[0].title, "Check-In Failed");
    assert_eq!(notices[0].message, "FaceNotRecognized");
}

#[test]
fn submission_failure_tests_generic_detail_for_blank_diagnostic() {
    let transport = Arc::new(MockTransport::new(Err("  \n".to_string())));
    let mut controller = common::active_controller(transport);

    controller.drain_notices();
    let outcome = controller.capture_and_check_in();
    assert_eq!(
        outcome,
        CheckInOutcome::Rejected(GENERIC_FAILURE_DETAIL.to_string())
    );
}

#[test]
fn submission_failure_tests_releases_lock_and_stops_camera() {
    let transport = Arc::new(MockTransport::new(Err("FaceNotRecognized".to_string())));
    let mut controller = common::active_controller(transport.clone());

    controller.capture_and_check_in();

    assert!(!controller.camera_active());
    assert!(!controller.lock_held());
    assert_eq!(controller.state(), WorkflowState::Idle);
    // Failure must not trigger a status re-fetch.
    assert_eq!(transport.status_calls(), 0);
    assert_eq!(transport.submit_calls(), 1);
}

#[test]
fn submission_failure_tests_malformed_response_is_rejected() {
    let response = Ok(r#"{"log_type": "IN", "time": "not-a-time"}"#.to_string());
    let transport = Arc::new(MockTransport::new(response));
    let mut controller = common::active_controller(transport.clone());

    let outcome = controller.capture_and_check_in();
    assert!(matches!(outcome, CheckInOutcome::Rejected(_)));
    assert!(!controller.camera_active());
    assert!(!controller.lock_held());
    assert_eq!(transport.status_calls(), 0);
}
