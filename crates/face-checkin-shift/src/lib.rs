#![warn(missing_docs)]
//! # face-checkin-shift
//!
//! ## Purpose
//! Computes human-readable shift-window progress from a shift assignment and
//! a reference time.
//!
//! ## Responsibilities
//! - Classify a reference instant against the effective shift window.
//! - Render the window label and progress detail strings.
//! - Apply the asymmetric minute rounding the progress text requires.
//!
//! ## Data flow
//! Status poll result -> [`present_shift`] -> [`ShiftPresentation`] consumed
//! by UI state projection.
//!
//! ## Ownership and lifetimes
//! Presentation output owns its strings; nothing borrows from the polled
//! shift window.
//!
//! ## Error model
//! Classification and rendering are total over validated
//! [`face_checkin_core::ShiftWindow`] values; no runtime errors.
//!
//! ## Security and privacy notes
//! Operates only on schedule metadata; no biometric or credential data.

use face_checkin_core::{ShiftWindow, format_timestamp};
use time::{Duration, OffsetDateTime};

/// Window text shown when no shift is assigned for the reference day.
pub const NO_SHIFT_TEXT: &str = "No active shift assigned today.";

/// Fallback shift label when the assignment has no name.
pub const DEFAULT_SHIFT_LABEL: &str = "Shift";

/// Position of a reference instant relative to the effective shift window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftPhase {
    /// Reference is strictly before the effective start.
    NotStarted {
        /// Whole minutes until start, rounded up; always >= 1.
        minutes_until: i64,
    },
    /// Reference is within `[effective_start, effective_end)`.
    InProgress {
        /// Whole minutes since start, rounded down.
        minutes_elapsed: i64,
        /// Whole minutes until end, rounded up, floored at zero.
        minutes_remaining: i64,
    },
    /// Reference is at or after the effective end.
    Ended {
        /// Whole minutes since end, rounded up.
        minutes_ago: i64,
    },
}

/// Rendered window label and progress detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftPresentation {
    /// Shift name and formatted effective bounds, or the no-shift message.
    pub window_text: String,
    /// Progress detail line; empty when no shift is assigned.
    pub progress_text: String,
}

/// Classifies `reference` against the effective window of `shift`.
///
/// # Semantics
/// The lower bound is inclusive and the upper bound is strict: a reference
/// exactly at the effective end is `Ended`, exactly at the effective start is
/// `InProgress`. Rounding is asymmetric on purpose so an in-progress shift
/// never overstates elapsed time or understates remaining time.
pub fn classify_shift(shift: &ShiftWindow, reference: OffsetDateTime) -> ShiftPhase {
    let start = shift.effective_start();
    let end = shift.effective_end();

    if reference < start {
        ShiftPhase::NotStarted {
            minutes_until: minutes_ceil(start - reference),
        }
    } else if reference < end {
        ShiftPhase::InProgress {
            minutes_elapsed: minutes_floor(reference - start),
            minutes_remaining: minutes_ceil(end - reference).max(0),
        }
    } else {
        ShiftPhase::Ended {
            minutes_ago: minutes_ceil(reference - end),
        }
    }
}

/// Renders window and progress text for an optional shift assignment.
pub fn present_shift(shift: Option<&ShiftWindow>, reference: OffsetDateTime) -> ShiftPresentation {
    let Some(shift) = shift else {
        return ShiftPresentation {
            window_text: NO_SHIFT_TEXT.to_string(),
            progress_text: String::new(),
        };
    };

    let label = shift.name.as_deref().unwrap_or(DEFAULT_SHIFT_LABEL);
    let window_text = format!(
        "{label}: {} – {}",
        format_timestamp(shift.effective_start()),
        format_timestamp(shift.effective_end()),
    );

    let progress_text = match classify_shift(shift, reference) {
        ShiftPhase::NotStarted { minutes_until } => {
            format!("Starts in {minutes_until} minutes")
        }
        ShiftPhase::InProgress {
            minutes_elapsed,
            minutes_remaining,
        } => {
            format!("{minutes_elapsed} minutes elapsed • {minutes_remaining} minutes remaining")
        }
        ShiftPhase::Ended { minutes_ago } => {
            format!("Shift ended {minutes_ago} minutes ago")
        }
    };

    ShiftPresentation {
        window_text,
        progress_text,
    }
}

// Rounding happens over whole milliseconds so any strictly positive gap
// before the start still reports at least one minute.
fn minutes_ceil(duration: Duration) -> i64 {
    let milliseconds = duration.whole_milliseconds().max(0);
    ((milliseconds + 59_999) / 60_000) as i64
}

fn minutes_floor(duration: Duration) -> i64 {
    (duration.whole_milliseconds().max(0) / 60_000) as i64
}
