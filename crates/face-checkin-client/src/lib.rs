#![warn(missing_docs)]
//! # face-checkin-client
//!
//! ## Purpose
//! Executes the two remote attendance operations through an injectable
//! transport abstraction.
//!
//! ## Responsibilities
//! - Validate attendance endpoint policy (HTTPS, required API path).
//! - Fetch the current check-in status as a validated model value.
//! - Submit one encoded still frame with a content checksum.
//! - Convert server diagnostics into user-facing failure detail.
//!
//! ## Data flow
//! Controller calls [`AttendanceClient`] -> request goes through
//! [`AttendanceTransport`] -> raw response is decoded by the contract crate
//! -> validated core values return to the controller.
//!
//! ## Ownership and lifetimes
//! Request/response values are owned (`String`) to decouple transport and
//! controller lifetimes.
//!
//! ## Error model
//! Endpoint policy violations, transport failures, and contract violations
//! are surfaced as [`ClientError`]; [`ClientError::user_detail`] renders the
//! inline failure text.
//!
//! ## Security and privacy notes
//! Image payloads are forwarded opaque and never logged; log lines carry
//! sizes and checksums only.

use std::sync::Arc;

use face_checkin_contract::{failure_detail, parse_status_response, parse_submission_response};
use face_checkin_core::{CheckInStatus, SubmissionResult};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use url::Url;

/// Required attendance API path suffix.
pub const REQUIRED_API_PATH: &str = "/api/attendance";

/// Generic failure detail shown when the server supplies no diagnostic.
pub const GENERIC_FAILURE_DETAIL: &str = "Unable to complete check-in. Please try again.";

/// Submission request payload forwarded to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInRequest {
    /// Encoded still frame as a JPEG data URL.
    pub image: String,
    /// SHA-256 hex digest of the image payload.
    pub checksum: String,
}

/// Abstract transport used by the attendance client.
///
/// Errors carry the raw server diagnostic string; its last non-empty line is
/// the user-facing detail.
pub trait AttendanceTransport: Send + Sync {
    /// Fetches the raw check-in status response.
    fn get_check_in_status(&self, endpoint: &str) -> Result<String, ClientError>;

    /// Submits one check-in request and returns the raw response.
    fn check_in_with_face(
        &self,
        endpoint: &str,
        request: &CheckInRequest,
    ) -> Result<String, ClientError>;
}

/// Attendance client that validates endpoint policy and executes the two
/// remote operations.
#[derive(Clone)]
pub struct AttendanceClient {
    endpoint: String,
    transport: Arc<dyn AttendanceTransport>,
}

impl AttendanceClient {
    /// Creates a validated attendance client.
    ///
    /// # Errors
    /// Returns [`ClientError::InvalidEndpoint`] when the URL is not HTTPS or
    /// does not include the required `/api/attendance` path.
    pub fn new(
        endpoint: impl Into<String>,
        transport: Arc<dyn AttendanceTransport>,
    ) -> Result<Self, ClientError> {
        let endpoint = endpoint.into();
        validate_attendance_endpoint(&endpoint)?;
        Ok(Self {
            endpoint,
            transport,
        })
    }

    /// Fetches and validates the current check-in status.
    ///
    /// # Errors
    /// Propagates transport failures and contract violations.
    pub fn fetch_status(&self) -> Result<CheckInStatus, ClientError> {
        let raw = self.transport.get_check_in_status(&self.endpoint)?;
        Ok(parse_status_response(&raw)?)
    }

    /// Submits one encoded still frame for face-matched attendance.
    ///
    /// # Errors
    /// Propagates transport failures (server rejection diagnostics included)
    /// and contract violations.
    pub fn check_in_with_face(&self, image: &str) -> Result<SubmissionResult, ClientError> {
        let request = CheckInRequest {
            image: image.to_string(),
            checksum: image_checksum(image),
        };
        log::debug!(
            "submitting check-in frame ({} bytes, checksum {})",
            request.image.len(),
            request.checksum
        );

        let raw = self.transport.check_in_with_face(&self.endpoint, &request)?;
        Ok(parse_submission_response(&raw)?)
    }

    /// Returns the configured attendance endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Computes the SHA-256 hex digest stamped onto submission requests.
pub fn image_checksum(image: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(image.as_bytes());
    hex::encode(hasher.finalize())
}

/// Validates attendance endpoint constraints.
///
/// # Errors
/// Returns [`ClientError::InvalidEndpoint`] for non-HTTPS URLs or path
/// mismatch.
pub fn validate_attendance_endpoint(endpoint: &str) -> Result<(), ClientError> {
    let parsed = Url::parse(endpoint)
        .map_err(|error| ClientError::InvalidEndpoint(format!("invalid attendance url: {error}")))?;

    if parsed.scheme() != "https" {
        return Err(ClientError::InvalidEndpoint(
            "attendance endpoint must use https".to_string(),
        ));
    }

    if !parsed.path().ends_with(REQUIRED_API_PATH) {
        return Err(ClientError::InvalidEndpoint(format!(
            "attendance endpoint path must end with {REQUIRED_API_PATH}"
        )));
    }

    Ok(())
}

/// Errors produced by the attendance client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Endpoint violates security or contract requirements.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    /// Transport or server-side rejection; carries the raw diagnostic.
    #[error("attendance transport failure: {0}")]
    Transport(String),
    /// Response payload violated the wire contract.
    #[error(transparent)]
    Contract(#[from] face_checkin_contract::ContractError),
}

impl ClientError {
    /// Renders the user-facing failure detail: the last meaningful line of a
    /// server diagnostic when available, else a generic retry message.
    pub fn user_detail(&self) -> String {
        match self {
            ClientError::Transport(diagnostic) => failure_detail(diagnostic)
                .unwrap_or_else(|| GENERIC_FAILURE_DETAIL.to_string()),
            _ => GENERIC_FAILURE_DETAIL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for endpoint policy, checksum stamping, and failure detail.

    use std::sync::Mutex;

    use face_checkin_core::LogType;
    use time::macros::datetime;

    use super::*;

    struct RecordingTransport {
        requests: Mutex<Vec<CheckInRequest>>,
        submission_response: Result<String, String>,
    }

    impl RecordingTransport {
        fn new(submission_response: Result<String, String>) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                submission_response,
            }
        }
    }

    impl AttendanceTransport for RecordingTransport {
        fn get_check_in_status(&self, _endpoint: &str) -> Result<String, ClientError> {
            Ok(r#"{"next_log_type": "IN", "server_time": "2026-08-24T10:15:00Z"}"#.to_string())
        }

        fn check_in_with_face(
            &self,
            _endpoint: &str,
            request: &CheckInRequest,
        ) -> Result<String, ClientError> {
            self.requests
                .lock()
                .expect("request log should lock")
                .push(request.clone());
            self.submission_response
                .clone()
                .map_err(ClientError::Transport)
        }
    }

    fn client(transport: RecordingTransport) -> AttendanceClient {
        AttendanceClient::new(
            "https://hr.example.test/api/attendance",
            Arc::new(transport),
        )
        .expect("endpoint should pass policy")
    }

    #[test]
    fn validates_expected_endpoint_policy() {
        validate_attendance_endpoint("https://hr.example.test/api/attendance")
            .expect("endpoint should pass");
        assert!(validate_attendance_endpoint("http://hr.example.test/api/attendance").is_err());
        assert!(validate_attendance_endpoint("https://hr.example.test/api/other").is_err());
    }

    #[test]
    fn fetch_status_decodes_through_contract() {
        let client = client(RecordingTransport::new(Ok(String::new())));
        let status = client.fetch_status().expect("status should parse");
        assert_eq!(status.next_log_type, LogType::In);
        assert_eq!(status.server_time, datetime!(2026-08-24 10:15 UTC));
    }

    #[test]
    fn submission_request_is_checksum_stamped() {
        let transport = Arc::new(RecordingTransport::new(Ok(
            r#"{"log_type": "IN", "time": "2026-08-24T10:15:00Z", "distance": 0.12}"#.to_string(),
        )));
        let client =
            AttendanceClient::new("https://hr.example.test/api/attendance", transport.clone())
                .expect("endpoint should pass policy");

        let image = "data:image/jpeg;base64,AAAA";
        let result = client
            .check_in_with_face(image)
            .expect("submission should parse");
        assert_eq!(result.log_type, LogType::In);

        let requests = transport.requests.lock().expect("request log should lock");
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].image, image);
        assert_eq!(requests[0].checksum, image_checksum(image));
        assert_eq!(requests[0].checksum.len(), 64);
    }

    #[test]
    fn user_detail_prefers_last_diagnostic_line() {
        let error = ClientError::Transport("Traceback\nFaceNotRecognized".to_string());
        assert_eq!(error.user_detail(), "FaceNotRecognized");

        let blank = ClientError::Transport("   \n".to_string());
        assert_eq!(blank.user_detail(), GENERIC_FAILURE_DETAIL);

        let contract = ClientError::InvalidEndpoint("bad".to_string());
        assert_eq!(contract.user_detail(), GENERIC_FAILURE_DETAIL);
    }
}
