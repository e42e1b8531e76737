#![warn(missing_docs)]
//! # face-checkin-core
//!
//! ## Purpose
//! Defines the pure data model used across the `face-checkin` workspace.
//!
//! ## Responsibilities
//! - Represent check-in/out log types and their wire form.
//! - Model shift windows with scheduled and actual bounds.
//! - Model poll results and submission confirmations.
//!
//! ## Data flow
//! The status poller decodes remote payloads into [`CheckInStatus`] values.
//! A successful submission yields a transient [`SubmissionResult`] consumed
//! only while rendering the post-submit confirmation.
//!
//! ## Ownership and lifetimes
//! All model values own their data (`String`, `OffsetDateTime`) to decouple
//! poll responses from the UI state that renders them.
//!
//! ## Error model
//! Validation failures (inverted shift window, negative match distance)
//! return [`CoreError`] variants with caller-actionable categorization.
//!
//! ## Security and privacy notes
//! This crate never holds raw frame bytes or credentials; it models only
//! attendance metadata.
//!
//! ## Example
//! ```rust
//! use face_checkin_core::LogType;
//!
//! assert_eq!(LogType::In.toggled(), LogType::Out);
//! assert_eq!(LogType::Out.to_string(), "OUT");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Direction of one attendance log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogType {
    /// Employee entering.
    In,
    /// Employee leaving.
    Out,
}

impl LogType {
    /// Returns the opposite log direction.
    pub fn toggled(self) -> Self {
        match self {
            LogType::In => LogType::Out,
            LogType::Out => LogType::In,
        }
    }
}

impl fmt::Display for LogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogType::In => f.write_str("IN"),
            LogType::Out => f.write_str("OUT"),
        }
    }
}

/// Scheduled (or actual) start/end interval an employee is expected to be
/// present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftWindow {
    /// Shift type name, when assigned.
    pub name: Option<String>,
    /// Scheduled start.
    pub start: OffsetDateTime,
    /// Scheduled end.
    pub end: OffsetDateTime,
    /// Actual start, when the roster recorded one.
    pub actual_start: Option<OffsetDateTime>,
    /// Actual end, when the roster recorded one.
    pub actual_end: Option<OffsetDateTime>,
}

impl ShiftWindow {
    /// Constructs a validated shift window.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidShiftWindow`] when the effective end
    /// precedes the effective start.
    pub fn new(
        name: Option<String>,
        start: OffsetDateTime,
        end: OffsetDateTime,
        actual_start: Option<OffsetDateTime>,
        actual_end: Option<OffsetDateTime>,
    ) -> Result<Self, CoreError> {
        let window = Self {
            name,
            start,
            end,
            actual_start,
            actual_end,
        };

        if window.effective_end() < window.effective_start() {
            return Err(CoreError::InvalidShiftWindow(
                "effective end precedes effective start".to_string(),
            ));
        }

        Ok(window)
    }

    /// Returns actual start when present, else scheduled start.
    pub fn effective_start(&self) -> OffsetDateTime {
        self.actual_start.unwrap_or(self.start)
    }

    /// Returns actual end when present, else scheduled end.
    pub fn effective_end(&self) -> OffsetDateTime {
        self.actual_end.unwrap_or(self.end)
    }
}

/// Most recent attendance log recorded for the employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastLog {
    /// Direction of the recorded log.
    pub log_type: LogType,
    /// Time the log was recorded.
    pub time: OffsetDateTime,
    /// Shift the log was attributed to, when known.
    pub shift: Option<String>,
}

/// Current check-in state reported by the remote attendance service.
///
/// Produced only by the status poller and replaced wholesale on each poll.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckInStatus {
    /// Display name of the resolved employee.
    pub employee_name: Option<String>,
    /// Most recent recorded log, when any exists.
    pub last_log: Option<LastLog>,
    /// Direction the next submission will record.
    pub next_log_type: LogType,
    /// Shift window assigned for the reference day, when any.
    pub shift: Option<ShiftWindow>,
    /// Server clock at poll time; reference for shift progress.
    pub server_time: OffsetDateTime,
}

/// Confirmation of one recorded submission.
///
/// Transient: exists only while the post-submit confirmation is rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionResult {
    /// Direction that was recorded.
    pub log_type: LogType,
    /// Time the log was recorded.
    pub time: OffsetDateTime,
    /// Dissimilarity score from the face matcher; lower is better.
    pub match_distance: Option<f64>,
}

impl SubmissionResult {
    /// Constructs a validated submission result.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidMatchDistance`] when the reported distance
    /// is negative or not a number.
    pub fn new(
        log_type: LogType,
        time: OffsetDateTime,
        match_distance: Option<f64>,
    ) -> Result<Self, CoreError> {
        if let Some(distance) = match_distance
            && !(distance >= 0.0)
        {
            return Err(CoreError::InvalidMatchDistance(distance));
        }

        Ok(Self {
            log_type,
            time,
            match_distance,
        })
    }
}

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Formats a timestamp for user-visible status and notice text.
///
/// Falls back to the RFC 3339 rendering when the fixed format cannot be
/// produced.
pub fn format_timestamp(timestamp: OffsetDateTime) -> String {
    timestamp
        .format(&TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| timestamp.to_string())
}

/// Error type for core domain validation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Shift window bounds are inverted.
    #[error("invalid shift window: {0}")]
    InvalidShiftWindow(String),
    /// Match distance must be a non-negative number.
    #[error("invalid match distance: {0}")]
    InvalidMatchDistance(f64),
}

#[cfg(test)]
mod tests {
    //! Unit tests for model validation and wire forms.

    use time::macros::datetime;

    use super::*;

    #[test]
    fn log_type_toggles_and_displays_wire_form() {
        assert_eq!(LogType::In.toggled(), LogType::Out);
        assert_eq!(LogType::Out.toggled(), LogType::In);
        assert_eq!(LogType::In.to_string(), "IN");
        assert_eq!(LogType::Out.to_string(), "OUT");
    }

    #[test]
    fn shift_window_rejects_inverted_effective_bounds() {
        let result = ShiftWindow::new(
            None,
            datetime!(2026-08-24 09:00 UTC),
            datetime!(2026-08-24 17:00 UTC),
            Some(datetime!(2026-08-24 18:00 UTC)),
            Some(datetime!(2026-08-24 08:00 UTC)),
        );
        assert!(matches!(result, Err(CoreError::InvalidShiftWindow(_))));
    }

    #[test]
    fn shift_window_prefers_actual_bounds() {
        let window = ShiftWindow::new(
            Some("Day".to_string()),
            datetime!(2026-08-24 09:00 UTC),
            datetime!(2026-08-24 17:00 UTC),
            Some(datetime!(2026-08-24 09:10 UTC)),
            None,
        )
        .expect("window should be valid");

        assert_eq!(window.effective_start(), datetime!(2026-08-24 09:10 UTC));
        assert_eq!(window.effective_end(), datetime!(2026-08-24 17:00 UTC));
    }

    #[test]
    fn submission_result_rejects_negative_distance() {
        let result =
            SubmissionResult::new(LogType::In, datetime!(2026-08-24 09:00 UTC), Some(-0.5));
        assert!(matches!(result, Err(CoreError::InvalidMatchDistance(_))));
    }

    #[test]
    fn format_timestamp_uses_fixed_layout() {
        let text = format_timestamp(datetime!(2026-08-24 09:05:07 UTC));
        assert_eq!(text, "2026-08-24 09:05:07");
    }
}
