#![warn(missing_docs)]
//! # face-checkin-app
//!
//! ## Purpose
//! Orchestrates camera lifecycle, status polling, and the
//! capture→verify→record round trip for `face-checkin`.
//!
//! ## Responsibilities
//! - Drive the workflow state machine across submission cycles.
//! - Enforce the single workflow lock serializing capture/submit cycles.
//! - Guarantee lock release and camera teardown on every completion path.
//! - Project poll results and submission outcomes into UI state.
//!
//! ## Data flow
//! Status poll -> UI projection; user capture request -> camera frame ->
//! checksum-stamped submission -> response handling -> status re-fetch.
//!
//! ## Ownership and lifetimes
//! [`CheckinController`] is constructed once per view activation and owns its
//! camera session, client, UI state, and workflow lock; [`teardown`] stops
//! any live camera on deactivation.
//!
//! ## Error model
//! Subsystem failures are wrapped in [`AppError`]. Every failure is terminal
//! for the attempt but non-fatal for the session: the user can always retry
//! by restarting the camera.
//!
//! ## Security and privacy notes
//! The controller never logs image payloads; log lines carry state
//! transitions and failure categories only.
//!
//! [`teardown`]: CheckinController::teardown

use face_checkin_capture::{CameraBackend, CameraError, CameraSessionManager, StartOutcome};
use face_checkin_client::{AttendanceClient, ClientError};
use face_checkin_core::{CheckInStatus, SubmissionResult, format_timestamp};
use face_checkin_ui::{ControlAffordances, Notice, NoticeLevel, StatusTone, UiState};
use thiserror::Error;

/// Build-time application version loaded from root `VERSION` file.
pub const APP_VERSION: &str = env!("FACE_CHECKIN_VERSION");

/// Returns the app version sourced from root `VERSION`.
pub fn app_version() -> &'static str {
    APP_VERSION
}

/// Workflow controller states.
///
/// `CameraStarting` and `Reacting` are pass-through states observed only
/// while the corresponding operation is in progress; the controller never
/// rests in them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    /// No camera session and no submission in flight.
    Idle,
    /// Camera acquisition in progress.
    CameraStarting,
    /// Camera session live, ready for capture.
    CameraActive,
    /// Frame capture in progress.
    Capturing,
    /// Submission awaiting the remote response.
    Submitting,
    /// Response handling in progress.
    Reacting,
}

/// Outcome of one capture-and-check-in request.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckInOutcome {
    /// No active camera session; nothing was submitted.
    CameraInactive,
    /// Another capture/submit cycle holds the workflow lock.
    Busy,
    /// Frame capture failed before any submission was issued.
    CaptureFailed,
    /// Submission accepted and recorded.
    Recorded(SubmissionResult),
    /// Submission rejected; carries the user-facing detail.
    Rejected(String),
}

/// Client-side check-in workflow controller.
///
/// Owns the single camera session, the workflow lock, and the last polled
/// status. Constructed once per view activation; [`teardown`] releases the
/// camera on deactivation.
///
/// [`teardown`]: CheckinController::teardown
pub struct CheckinController {
    camera: CameraSessionManager,
    client: AttendanceClient,
    ui: UiState,
    state: WorkflowState,
    // Workflow lock: held only between submission start and completion of
    // its response handling.
    submission_in_flight: bool,
    last_status: Option<CheckInStatus>,
}

impl CheckinController {
    /// Creates a controller with no active camera session.
    pub fn new(client: AttendanceClient, camera_backend: Box<dyn CameraBackend>) -> Self {
        Self {
            camera: CameraSessionManager::new(camera_backend),
            client,
            ui: UiState::new(),
            state: WorkflowState::Idle,
            submission_in_flight: false,
            last_status: None,
        }
    }

    /// Returns the current workflow state.
    pub fn state(&self) -> WorkflowState {
        self.state
    }

    /// Returns the UI state snapshot.
    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Drains notices queued since the last call.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.ui.drain_notices()
    }

    /// Returns the last polled status, when any poll has succeeded.
    pub fn last_status(&self) -> Option<&CheckInStatus> {
        self.last_status.as_ref()
    }

    /// Returns `true` while the workflow lock is held.
    pub fn lock_held(&self) -> bool {
        self.submission_in_flight
    }

    /// Returns `true` while a camera session is live.
    pub fn camera_active(&self) -> bool {
        self.camera.is_active()
    }

    /// Fetches current status and re-renders next-action, last-log, and
    /// shift texts.
    ///
    /// `blocking` marks the refresh as interaction-blocking for the hosting
    /// shell (manual refresh); automatic post-submit refreshes pass `false`.
    ///
    /// # Errors
    /// Returns [`AppError::Client`] when the poll fails; the status line is
    /// updated before returning.
    pub fn refresh_status(&mut self, blocking: bool) -> Result<(), AppError> {
        self.ui.blocking_refresh = blocking;
        let result = self.client.fetch_status();
        self.ui.blocking_refresh = false;

        match result {
            Ok(status) => {
                self.ui.apply_status(&status);
                self.last_status = Some(status);
                Ok(())
            }
            Err(error) => {
                log::warn!("status poll failed: {error}");
                self.ui
                    .set_status("Unable to load check-in status.", StatusTone::Danger);
                Err(AppError::Client(error))
            }
        }
    }

    /// Starts the camera session.
    ///
    /// A second start while a session is live is a guarded no-op surfaced as
    /// a warning, not an error.
    ///
    /// # Errors
    /// Returns [`AppError::Camera`] on access denial or device failure; no
    /// session is stored and the denial is surfaced inline plus as a
    /// blocking notice.
    pub fn start_camera(&mut self) -> Result<StartOutcome, AppError> {
        let prior = self.state;
        self.state = WorkflowState::CameraStarting;

        match self.camera.start() {
            Ok(StartOutcome::Started) => {
                self.state = WorkflowState::CameraActive;
                self.ui.set_status(
                    "Camera ready. Position your face within the frame.",
                    StatusTone::Info,
                );
                self.reconcile_controls();
                log::info!("camera session started");
                Ok(StartOutcome::Started)
            }
            Ok(StartOutcome::AlreadyActive) => {
                self.state = prior;
                self.ui
                    .set_status("Camera already running.", StatusTone::Warning);
                Ok(StartOutcome::AlreadyActive)
            }
            Err(error) => {
                self.state = WorkflowState::Idle;
                log::error!("camera acquisition failed: {error}");
                self.ui.set_status(
                    "Camera access denied. Please allow permissions and retry.",
                    StatusTone::Danger,
                );
                self.ui.push_notice(Notice {
                    level: NoticeLevel::Error,
                    title: "Camera Access Denied".to_string(),
                    message: "We were unable to access your camera. Please grant permission and try again."
                        .to_string(),
                    blocking: true,
                });
                self.reconcile_controls();
                Err(AppError::Camera(error))
            }
        }
    }

    /// Stops the camera session. Safe to call when none exists.
    pub fn stop_camera(&mut self) {
        if !self.camera.is_active() {
            return;
        }

        self.camera.stop();
        self.state = WorkflowState::Idle;
        self.ui.set_status("Camera stopped.", StatusTone::Muted);
        self.reconcile_controls();
        log::info!("camera session stopped by user");
    }

    /// Runs one capture→submit→react cycle.
    ///
    /// Guards: an active camera session must exist and the workflow lock
    /// must be free; otherwise the request aborts without issuing any
    /// transport call. Every completed submission (success or failure)
    /// releases the lock and ends the camera session.
    pub fn capture_and_check_in(&mut self) -> CheckInOutcome {
        if !self.camera.is_active() {
            self.ui.push_notice(Notice {
                level: NoticeLevel::Warning,
                title: "Camera not active".to_string(),
                message: "Start your camera before capturing.".to_string(),
                blocking: true,
            });
            return CheckInOutcome::CameraInactive;
        }

        if self.submission_in_flight {
            return CheckInOutcome::Busy;
        }

        self.state = WorkflowState::Capturing;
        let frame = match self.camera.capture() {
            Ok(frame) => frame,
            Err(error) => {
                log::error!("frame capture failed: {error}");
                // Capture failure ends the camera session, so the inline
                // status must stop claiming the camera is ready.
                self.ui.set_status(
                    "Unable to capture an image from your camera.",
                    StatusTone::Danger,
                );
                self.ui.push_notice(Notice {
                    level: NoticeLevel::Error,
                    title: "Capture Failed".to_string(),
                    message: "Unable to capture an image from your camera.".to_string(),
                    blocking: true,
                });
                self.state = WorkflowState::Idle;
                self.reconcile_controls();
                return CheckInOutcome::CaptureFailed;
            }
        };

        self.submission_in_flight = true;
        self.ui.set_status("Matching face data…", StatusTone::Info);
        self.reconcile_controls();

        self.state = WorkflowState::Submitting;
        let response = self.client.check_in_with_face(&frame.data_url);
        self.state = WorkflowState::Reacting;

        let outcome = match response {
            Ok(result) => {
                let time_text = format_timestamp(result.time);
                self.ui.set_status(
                    format!("{} recorded at {}", result.log_type, time_text),
                    StatusTone::Success,
                );
                let score = result
                    .match_distance
                    .map(|distance| format!("{distance:.3}"))
                    .unwrap_or_else(|| "--".to_string());
                self.ui.push_notice(Notice {
                    level: NoticeLevel::Success,
                    title: "Attendance recorded".to_string(),
                    message: format!(
                        "Recorded {} at {} (match score: {})",
                        result.log_type, time_text, score
                    ),
                    blocking: false,
                });
                log::info!("submission recorded: {}", result.log_type);
                CheckInOutcome::Recorded(result)
            }
            Err(error) => {
                let detail = error.user_detail();
                log::error!("check-in submission failed: {error}");
                self.ui.set_status(detail.clone(), StatusTone::Danger);
                self.ui.push_notice(Notice {
                    level: NoticeLevel::Error,
                    title: "Check-In Failed".to_string(),
                    message: detail.clone(),
                    blocking: true,
                });
                CheckInOutcome::Rejected(detail)
            }
        };

        // Finalizer: every exit from a submission releases the lock, ends
        // the camera session, and reconciles control affordances.
        self.submission_in_flight = false;
        self.camera.stop();
        self.state = WorkflowState::Idle;
        self.reconcile_controls();

        // Post-submit refresh only starts after the response is fully
        // processed, so the UI never shows pre-submission status.
        if matches!(outcome, CheckInOutcome::Recorded(_))
            && let Err(error) = self.refresh_status(false)
        {
            log::warn!("post-submit status refresh failed: {error}");
        }

        outcome
    }

    /// Tears the controller down on view deactivation, stopping any live
    /// camera session.
    pub fn teardown(&mut self) {
        self.camera.stop();
        self.submission_in_flight = false;
        self.state = WorkflowState::Idle;
        self.reconcile_controls();
    }

    fn reconcile_controls(&mut self) {
        self.ui.controls =
            ControlAffordances::for_camera(self.camera.is_active(), self.submission_in_flight);
    }
}

/// App integration error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Camera subsystem error.
    #[error("camera error: {0}")]
    Camera(#[from] CameraError),
    /// Attendance client error.
    #[error("client error: {0}")]
    Client(#[from] ClientError),
}
