//! Integration tests for capture preconditions.

mod common;

use std::sync::Arc;

use common::MockTransport;
use face_checkin_app::{CheckInOutcome, CheckinController, WorkflowState};
use face_checkin_capture::SyntheticCameraBackend;
use face_checkin_client::AttendanceClient;
use face_checkin_ui::{NoticeLevel, StatusTone};

#[test]
fn capture_guard_tests_no_session_never_issues_submission() {
    let transport = Arc::new(MockTransport::succeeding());
    let mut controller = common::controller_with(transport.clone());

    let outcome = controller.capture_and_check_in();
    assert_eq!(outcome, CheckInOutcome::CameraInactive);
    assert_eq!(transport.submit_calls(), 0);
    assert_eq!(controller.state(), WorkflowState::Idle);

    let notices = controller.drain_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Warning);
    assert_eq!(notices[0].message, "Start your camera before capturing.");
}

#[test]
fn capture_guard_tests_frame_failure_aborts_before_submission() {
    let transport = Arc::new(MockTransport::succeeding());
    let client = AttendanceClient::new(common::TEST_ENDPOINT, transport.clone())
        .expect("endpoint should pass policy");
    // Warming-up stream never reports geometry, so capture fails NotReady.
    let mut controller =
        CheckinController::new(client, Box::new(SyntheticCameraBackend::warming_up(4, 4)));
    controller
        .start_camera()
        .expect("camera start should succeed");

    let outcome = controller.capture_and_check_in();
    assert_eq!(outcome, CheckInOutcome::CaptureFailed);
    assert_eq!(transport.submit_calls(), 0);
    assert_eq!(controller.state(), WorkflowState::Idle);
    assert!(!controller.camera_active());
    assert!(!controller.lock_held());

    // The session is gone, so the camera-ready status must not survive.
    assert_eq!(
        controller.ui().status_line,
        "Unable to capture an image from your camera."
    );
    assert_eq!(controller.ui().status_tone, StatusTone::Danger);
    assert!(controller.ui().controls.start_enabled);

    let notices = controller.drain_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].title, "Capture Failed");
    assert!(notices[0].blocking);
}
