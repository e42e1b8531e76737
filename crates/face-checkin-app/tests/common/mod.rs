//! Shared fixtures for app integration tests.

use std::sync::{Arc, Mutex};

use face_checkin_app::CheckinController;
use face_checkin_capture::SyntheticCameraBackend;
use face_checkin_client::{AttendanceClient, AttendanceTransport, CheckInRequest, ClientError};

/// Endpoint accepted by the client policy in every test.
pub const TEST_ENDPOINT: &str = "https://hr.example.test/api/attendance";

/// Status fixture: next action IN for Jamie Smith, day shift 09:00–17:00,
/// polled at 08:45.
pub fn status_json() -> String {
    r#"{
        "employee_name": "Jamie Smith",
        "last_log": {"log_type": "OUT", "time": "2026-08-21T17:04:00Z"},
        "next_log_type": "IN",
        "shift": {
            "name": "Day",
            "start": "2026-08-24T09:00:00Z",
            "end": "2026-08-24T17:00:00Z"
        },
        "server_time": "2026-08-24T08:45:00Z"
    }"#
    .to_string()
}

/// Submission fixture: IN recorded at 08:46:12 with distance 0.1234.
#[allow(dead_code)]
pub fn submission_json() -> String {
    r#"{"log_type": "IN", "time": "2026-08-24T08:46:12Z", "distance": 0.1234}"#.to_string()
}

/// Counting transport with a scripted submission response.
///
/// `Err` submission responses carry the raw server diagnostic.
pub struct MockTransport {
    status_calls: Mutex<u32>,
    submit_calls: Mutex<u32>,
    submission_response: Result<String, String>,
}

impl MockTransport {
    pub fn new(submission_response: Result<String, String>) -> Self {
        Self {
            status_calls: Mutex::new(0),
            submit_calls: Mutex::new(0),
            submission_response,
        }
    }

    #[allow(dead_code)]
    pub fn succeeding() -> Self {
        Self::new(Ok(submission_json()))
    }

    #[allow(dead_code)]
    pub fn status_calls(&self) -> u32 {
        *self.status_calls.lock().expect("status counter should lock")
    }

    #[allow(dead_code)]
    pub fn submit_calls(&self) -> u32 {
        *self.submit_calls.lock().expect("submit counter should lock")
    }
}

impl AttendanceTransport for MockTransport {
    fn get_check_in_status(&self, _endpoint: &str) -> Result<String, ClientError> {
        *self.status_calls.lock().expect("status counter should lock") += 1;
        Ok(status_json())
    }

    fn check_in_with_face(
        &self,
        _endpoint: &str,
        _request: &CheckInRequest,
    ) -> Result<String, ClientError> {
        *self.submit_calls.lock().expect("submit counter should lock") += 1;
        self.submission_response
            .clone()
            .map_err(ClientError::Transport)
    }
}

/// Builds a controller over the given transport and a ready synthetic
/// camera.
#[allow(dead_code)]
pub fn controller_with(transport: Arc<MockTransport>) -> CheckinController {
    let client =
        AttendanceClient::new(TEST_ENDPOINT, transport).expect("endpoint should pass policy");
    CheckinController::new(client, Box::new(SyntheticCameraBackend::new(4, 4)))
}

/// Builds a controller with the camera already started.
#[allow(dead_code)]
pub fn active_controller(transport: Arc<MockTransport>) -> CheckinController {
    let mut controller = controller_with(transport);
    controller
        .start_camera()
        .expect("camera start should succeed");
    controller
}
