#![warn(missing_docs)]
//! # face-checkin-contract
//!
//! ## Purpose
//! Defines the remote attendance service response schema and validated
//! client-side decoding.
//!
//! ## Responsibilities
//! - Decode check-in status and submission response payloads.
//! - Enforce contract invariants before values reach the controller.
//! - Extract the user-facing line from server failure diagnostics.
//!
//! ## Data flow
//! Raw JSON response -> [`parse_status_response`] /
//! [`parse_submission_response`] -> validated core model values consumed by
//! the workflow controller.
//!
//! ## Ownership and lifetimes
//! Parsed values are owned structs to avoid borrowing from transient network
//! buffers.
//!
//! ## Error model
//! Invalid JSON or contract-violating payloads return [`ContractError`];
//! malformed responses are rejected rather than trusted.
//!
//! ## Security and privacy notes
//! This crate processes attendance metadata only; image payloads never pass
//! through it.

use face_checkin_core::{CheckInStatus, LastLog, LogType, ShiftWindow, SubmissionResult};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;

/// Wire record for `getCheckInStatus` responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusRecord {
    /// Display name of the resolved employee.
    #[serde(default)]
    pub employee_name: Option<String>,
    /// Most recent recorded log, when any exists.
    #[serde(default)]
    pub last_log: Option<LastLogRecord>,
    /// Direction the next submission will record.
    pub next_log_type: LogType,
    /// Shift window assigned for the reference day.
    #[serde(default)]
    pub shift: Option<ShiftRecord>,
    /// Server clock at poll time.
    #[serde(with = "time::serde::rfc3339")]
    pub server_time: OffsetDateTime,
}

/// Wire record for the `last_log` status field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastLogRecord {
    /// Direction of the recorded log.
    pub log_type: LogType,
    /// Time the log was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
    /// Shift the log was attributed to.
    #[serde(default)]
    pub shift: Option<String>,
}

/// Wire record for the `shift` status field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftRecord {
    /// Shift type name.
    #[serde(default)]
    pub name: Option<String>,
    /// Scheduled start.
    #[serde(with = "time::serde::rfc3339")]
    pub start: OffsetDateTime,
    /// Scheduled end.
    #[serde(with = "time::serde::rfc3339")]
    pub end: OffsetDateTime,
    /// Actual start recorded by the roster.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub actual_start: Option<OffsetDateTime>,
    /// Actual end recorded by the roster.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub actual_end: Option<OffsetDateTime>,
}

/// Wire record for `checkInWithFace` responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    /// Direction that was recorded.
    pub log_type: LogType,
    /// Time the log was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
    /// Dissimilarity score from the face matcher.
    #[serde(default)]
    pub distance: Option<f64>,
}

/// Parses and validates one check-in status response.
///
/// # Errors
/// Returns [`ContractError::Decode`] for invalid JSON and
/// [`ContractError::InvalidContract`] when a decoded shift window is
/// incoherent.
pub fn parse_status_response(raw: &str) -> Result<CheckInStatus, ContractError> {
    let record: StatusRecord = serde_json::from_str(raw)?;

    let shift = record
        .shift
        .map(|shift| {
            ShiftWindow::new(
                shift.name,
                shift.start,
                shift.end,
                shift.actual_start,
                shift.actual_end,
            )
        })
        .transpose()
        .map_err(|error| ContractError::InvalidContract(error.to_string()))?;

    Ok(CheckInStatus {
        employee_name: record.employee_name,
        last_log: record.last_log.map(|last| LastLog {
            log_type: last.log_type,
            time: last.time,
            shift: last.shift,
        }),
        next_log_type: record.next_log_type,
        shift,
        server_time: record.server_time,
    })
}

/// Parses and validates one submission response.
///
/// # Errors
/// Returns [`ContractError::Decode`] for invalid JSON and
/// [`ContractError::InvalidContract`] for negative match distances.
pub fn parse_submission_response(raw: &str) -> Result<SubmissionResult, ContractError> {
    let record: SubmissionRecord = serde_json::from_str(raw)?;

    SubmissionResult::new(record.log_type, record.time, record.distance)
        .map_err(|error| ContractError::InvalidContract(error.to_string()))
}

/// Extracts the user-facing detail from a server diagnostic: the last
/// non-empty line. Returns `None` for blank diagnostics.
pub fn failure_detail(diagnostic: &str) -> Option<String> {
    diagnostic
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

/// Wire contract errors.
#[derive(Debug, Error)]
pub enum ContractError {
    /// JSON decode failure.
    #[error("response decode failure: {0}")]
    Decode(#[from] serde_json::Error),
    /// Decoded payload violates contract invariants.
    #[error("response contract violation: {0}")]
    InvalidContract(String),
}
