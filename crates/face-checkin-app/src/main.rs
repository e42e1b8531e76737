#![warn(missing_docs)]
//! # face-checkin-app binary
//!
//! Demo entry point: walks one refresh → start camera → capture → check-in
//! cycle against a synthetic camera and a scripted transport, printing the
//! resulting UI state.

use std::sync::{Arc, Mutex};

use face_checkin_app::{CheckInOutcome, CheckinController, app_version};
use face_checkin_capture::SyntheticCameraBackend;
use face_checkin_client::{AttendanceClient, AttendanceTransport, CheckInRequest, ClientError};
use face_checkin_ui::Notice;

const DEMO_ENDPOINT: &str = "https://hr.example.test/api/attendance";

const STATUS_BEFORE: &str = r#"{
    "employee_name": "Jamie Smith",
    "last_log": {"log_type": "OUT", "time": "2026-08-21T17:04:00Z"},
    "next_log_type": "IN",
    "shift": {
        "name": "Day",
        "start": "2026-08-24T09:00:00Z",
        "end": "2026-08-24T17:00:00Z"
    },
    "server_time": "2026-08-24T08:45:00Z"
}"#;

const STATUS_AFTER: &str = r#"{
    "employee_name": "Jamie Smith",
    "last_log": {"log_type": "IN", "time": "2026-08-24T08:46:12Z", "shift": "Day"},
    "next_log_type": "OUT",
    "shift": {
        "name": "Day",
        "start": "2026-08-24T09:00:00Z",
        "end": "2026-08-24T17:00:00Z"
    },
    "server_time": "2026-08-24T08:46:12Z"
}"#;

const SUBMISSION_OK: &str =
    r#"{"log_type": "IN", "time": "2026-08-24T08:46:12Z", "distance": 0.1234}"#;

/// Scripted transport returning canned responses in call order.
struct ScriptedTransport {
    status_responses: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    fn new() -> Self {
        // Responses are popped front-to-back: first poll, post-submit poll.
        Self {
            status_responses: Mutex::new(vec![
                STATUS_BEFORE.to_string(),
                STATUS_AFTER.to_string(),
            ]),
        }
    }
}

impl AttendanceTransport for ScriptedTransport {
    fn get_check_in_status(&self, _endpoint: &str) -> Result<String, ClientError> {
        let mut responses = self
            .status_responses
            .lock()
            .map_err(|_| ClientError::Transport("scripted response lock poisoned".to_string()))?;
        if responses.is_empty() {
            return Ok(STATUS_AFTER.to_string());
        }
        Ok(responses.remove(0))
    }

    fn check_in_with_face(
        &self,
        _endpoint: &str,
        _request: &CheckInRequest,
    ) -> Result<String, ClientError> {
        Ok(SUBMISSION_OK.to_string())
    }
}

fn print_ui(label: &str, controller: &CheckinController) {
    let ui = controller.ui();
    println!("--- {label} ---");
    println!(
        "status   [{}] {}",
        ui.status_tone.class_name(),
        ui.status_line
    );
    println!("next     {}", ui.next_action);
    println!("last log {}", ui.last_log_detail);
    println!("shift    {}", ui.shift_window_text);
    println!("progress {}", ui.shift_progress_text);
    println!(
        "controls start={} capture={} stop={}",
        ui.controls.start_enabled, ui.controls.capture_enabled, ui.controls.stop_enabled
    );
}

fn print_notices(notices: &[Notice]) {
    for notice in notices {
        println!(
            "notice   [{:?}{}] {}: {}",
            notice.level,
            if notice.blocking { ", blocking" } else { "" },
            notice.title,
            notice.message
        );
    }
}

fn main() {
    env_logger::init();
    println!("face-checkin-app {}", app_version());

    let client = match AttendanceClient::new(DEMO_ENDPOINT, Arc::new(ScriptedTransport::new())) {
        Ok(client) => client,
        Err(error) => {
            eprintln!("failed to configure attendance client: {error}");
            std::process::exit(1);
        }
    };

    let mut controller =
        CheckinController::new(client, Box::new(SyntheticCameraBackend::new(640, 480)));

    if let Err(error) = controller.refresh_status(true) {
        eprintln!("initial status poll failed: {error}");
        std::process::exit(1);
    }
    print_ui("after initial poll", &controller);

    if let Err(error) = controller.start_camera() {
        eprintln!("camera start failed: {error}");
        std::process::exit(1);
    }
    print_ui("camera active", &controller);

    let outcome = controller.capture_and_check_in();
    match &outcome {
        CheckInOutcome::Recorded(result) => {
            println!("recorded {} (distance {:?})", result.log_type, result.match_distance);
        }
        other => println!("check-in did not complete: {other:?}"),
    }
    print_notices(&controller.drain_notices());
    print_ui("after submission", &controller);

    controller.teardown();
}
