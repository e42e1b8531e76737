#![warn(missing_docs)]
//! # face-checkin-ui
//!
//! ## Purpose
//! Defines the UI-facing runtime state model for `face-checkin`.
//!
//! ## Responsibilities
//! - Represent the live status line with exactly one severity tone.
//! - Model control affordances for the camera buttons.
//! - Project poll results into next-action, last-log, and shift text.
//! - Queue transient and blocking notices for the hosting shell.
//!
//! ## Data flow
//! Controller events mutate [`UiState`], which drives rendered status in the
//! hosting page shell.
//!
//! ## Ownership and lifetimes
//! `UiState` owns all string/status values to simplify event reducers.
//!
//! ## Error model
//! This crate favors explicit state over recoverable errors; invalid
//! combinations are prevented by constructor helpers.
//!
//! ## Security and privacy notes
//! UI state intentionally excludes image payloads and transport internals.

use face_checkin_core::{CheckInStatus, LogType, format_timestamp};
use face_checkin_shift::present_shift;

/// Detail text shown when no prior log exists.
pub const NO_PREVIOUS_LOGS_TEXT: &str = "No previous check-ins found.";

/// Severity tone of the live status line.
///
/// Exactly one tone is active at a time; setting a status replaces the
/// previous tone rather than accumulating classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    /// Neutral progress information.
    Info,
    /// Completed action confirmation.
    Success,
    /// Benign anomaly.
    Warning,
    /// Failed attempt.
    Danger,
    /// Inactive/idle detail.
    Muted,
}

impl StatusTone {
    /// Returns the deterministic style class for this tone.
    pub fn class_name(self) -> &'static str {
        match self {
            StatusTone::Info => "alert-info",
            StatusTone::Success => "alert-success",
            StatusTone::Warning => "alert-warning",
            StatusTone::Danger => "alert-danger",
            StatusTone::Muted => "alert-secondary",
        }
    }
}

/// Color accent of the next-action label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionAccent {
    /// Green-ish accent for an upcoming check-in.
    Positive,
    /// Amber-ish accent for an upcoming check-out.
    Attention,
}

/// Returns the deterministic accent for a log direction.
pub fn accent_for(log_type: LogType) -> ActionAccent {
    match log_type {
        LogType::In => ActionAccent::Positive,
        LogType::Out => ActionAccent::Attention,
    }
}

/// Severity of one queued notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Transient confirmation.
    Success,
    /// Benign warning.
    Warning,
    /// Attention-grabbing failure.
    Error,
}

/// One notification queued for the hosting shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Notice severity.
    pub level: NoticeLevel,
    /// Short title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Whether the shell should block interaction until dismissed.
    pub blocking: bool,
}

/// Enabled/disabled state of the three camera controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlAffordances {
    /// Start-camera button.
    pub start_enabled: bool,
    /// Capture-and-check-in button.
    pub capture_enabled: bool,
    /// Stop-camera button.
    pub stop_enabled: bool,
}

impl ControlAffordances {
    /// Computes affordances from session and workflow-lock state.
    ///
    /// Capture is enabled only while a session is active and no submission
    /// holds the workflow lock.
    pub fn for_camera(session_active: bool, submission_in_flight: bool) -> Self {
        Self {
            start_enabled: !session_active,
            capture_enabled: session_active && !submission_in_flight,
            stop_enabled: session_active,
        }
    }
}

/// Aggregate UI runtime state.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    /// Live status line text.
    pub status_line: String,
    /// Active tone of the status line.
    pub status_tone: StatusTone,
    /// Next-action label text.
    pub next_action: String,
    /// Accent of the next-action label; `None` before the first poll.
    pub next_action_accent: Option<ActionAccent>,
    /// Last-log detail text.
    pub last_log_detail: String,
    /// Shift window label text.
    pub shift_window_text: String,
    /// Shift progress detail text.
    pub shift_progress_text: String,
    /// Camera control affordances.
    pub controls: ControlAffordances,
    /// Whether the hosting shell should block interaction during the
    /// in-flight status refresh.
    pub blocking_refresh: bool,
    notices: Vec<Notice>,
}

impl UiState {
    /// Creates the pre-poll UI state.
    pub fn new() -> Self {
        Self {
            status_line: "Initializing…".to_string(),
            status_tone: StatusTone::Muted,
            next_action: "Loading...".to_string(),
            next_action_accent: None,
            last_log_detail: String::new(),
            shift_window_text: "Checking assignments...".to_string(),
            shift_progress_text: String::new(),
            controls: ControlAffordances::for_camera(false, false),
            blocking_refresh: false,
            notices: Vec::new(),
        }
    }

    /// Sets the status line, replacing the previous tone.
    pub fn set_status(&mut self, message: impl Into<String>, tone: StatusTone) {
        self.status_line = message.into();
        self.status_tone = tone;
    }

    /// Queues one notice for the hosting shell.
    pub fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// Drains all queued notices in arrival order.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Returns queued notices without draining them.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Re-renders next-action, last-log, and shift texts from one poll
    /// result.
    pub fn apply_status(&mut self, status: &CheckInStatus) {
        self.next_action = format!(
            "{} ({})",
            status.next_log_type,
            status.employee_name.as_deref().unwrap_or_default()
        );
        self.next_action_accent = Some(accent_for(status.next_log_type));

        self.last_log_detail = match &status.last_log {
            Some(last) => {
                let shift_suffix = last
                    .shift
                    .as_deref()
                    .map(|shift| format!(" (Shift: {shift})"))
                    .unwrap_or_default();
                format!(
                    "Last {} at {}{}",
                    last.log_type,
                    format_timestamp(last.time),
                    shift_suffix
                )
            }
            None => NO_PREVIOUS_LOGS_TEXT.to_string(),
        };

        let presentation = present_shift(status.shift.as_ref(), status.server_time);
        self.shift_window_text = presentation.window_text;
        self.shift_progress_text = presentation.progress_text;
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
