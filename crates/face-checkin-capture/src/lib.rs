#![warn(missing_docs)]
//! # face-checkin-capture
//!
//! ## Purpose
//! Provides camera acquisition and still-frame capture abstractions.
//!
//! ## Responsibilities
//! - Define a backend-agnostic camera access trait.
//! - Manage the single live camera session with start/capture/stop.
//! - Encode captured frames as transportable JPEG data URLs.
//! - Expose deterministic synthetic capture for tests and demos.
//!
//! ## Data flow
//! Controller starts a session -> backend opens a [`CameraStream`] ->
//! [`CameraSessionManager::capture`] reads one frame and encodes it ->
//! encoded frame enters the submission pipeline.
//!
//! ## Ownership and lifetimes
//! The manager exclusively owns the live stream; captured frames are owned
//! values with independent buffers.
//!
//! ## Error model
//! Access denial, unready streams, frame-shape violations, and backend
//! failures are reported as [`CameraError`] values.
//!
//! ## Security and privacy notes
//! Frames exist only in memory for the duration of one capture; this crate
//! never persists image bytes.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use image::ExtendedColorType;
use image::codecs::jpeg::JpegEncoder;
use thiserror::Error;

/// JPEG quality used for submitted stills.
pub const JPEG_QUALITY: u8 = 90;

/// Stable MIME type of encoded captures.
pub const JPEG_MIME: &str = "image/jpeg";

/// One decoded frame from an open camera stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraFrame {
    /// Native frame width in pixels.
    pub width: u32,
    /// Native frame height in pixels.
    pub height: u32,
    /// Raw RGBA pixel buffer (`width * height * 4` bytes).
    pub rgba: Vec<u8>,
}

impl CameraFrame {
    /// Constructs a validated frame.
    ///
    /// # Errors
    /// Returns [`CameraError::InvalidFrameShape`] when the pixel buffer
    /// length is not exactly `width * height * 4`.
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, CameraError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or_else(|| CameraError::Backend("frame dimensions overflow".to_string()))?;

        if rgba.len() != expected {
            return Err(CameraError::InvalidFrameShape {
                expected,
                actual: rgba.len(),
            });
        }

        Ok(Self {
            width,
            height,
            rgba,
        })
    }
}

/// Camera frame encoded for transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFrame {
    /// `data:image/jpeg;base64,…` still-frame payload.
    pub data_url: String,
    /// Source frame width in pixels.
    pub width: u32,
    /// Source frame height in pixels.
    pub height: u32,
}

/// One open camera stream owned by the session manager.
pub trait CameraStream: Send {
    /// Returns native frame geometry once the first frame has been decoded,
    /// `None` while the stream is still warming up.
    fn frame_size(&self) -> Option<(u32, u32)>;

    /// Reads the current frame at native resolution.
    ///
    /// # Errors
    /// Returns [`CameraError::Backend`] when the device fails mid-stream.
    fn read_frame(&mut self) -> Result<CameraFrame, CameraError>;

    /// Releases all device tracks held by this stream.
    fn release(&mut self);
}

/// Trait implemented by concrete camera providers.
pub trait CameraBackend: Send + Sync {
    /// Requests access to the user-facing camera device.
    ///
    /// # Errors
    /// Returns [`CameraError::AccessDenied`] when the user or OS refuses
    /// access, [`CameraError::Backend`] for device failures.
    fn open(&self) -> Result<Box<dyn CameraStream>, CameraError>;
}

/// Result of a session start request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A new session was acquired.
    Started,
    /// A session already existed; the request was a guarded no-op.
    AlreadyActive,
}

/// Owns the single live camera session.
///
/// Invariant: at most one stream is ever held; stopping without a session is
/// a no-op.
pub struct CameraSessionManager {
    backend: Box<dyn CameraBackend>,
    stream: Option<Box<dyn CameraStream>>,
}

impl CameraSessionManager {
    /// Creates a manager with no active session.
    pub fn new(backend: Box<dyn CameraBackend>) -> Self {
        Self {
            backend,
            stream: None,
        }
    }

    /// Returns `true` when a session is currently held.
    pub fn is_active(&self) -> bool {
        self.stream.is_some()
    }

    /// Returns `true` when a session is held and frame geometry is known.
    pub fn is_ready(&self) -> bool {
        self.stream
            .as_ref()
            .and_then(|stream| stream.frame_size())
            .is_some_and(|(width, height)| width > 0 && height > 0)
    }

    /// Acquires the camera device.
    ///
    /// Starting with an existing session signals
    /// [`StartOutcome::AlreadyActive`] without touching the live stream.
    ///
    /// # Errors
    /// Propagates backend denial/failure; no session is stored on error.
    pub fn start(&mut self) -> Result<StartOutcome, CameraError> {
        if self.stream.is_some() {
            return Ok(StartOutcome::AlreadyActive);
        }

        let stream = self.backend.open()?;
        self.stream = Some(stream);
        log::debug!("camera session acquired");
        Ok(StartOutcome::Started)
    }

    /// Captures the current frame and encodes it for transport.
    ///
    /// A successful capture leaves the session running. Any failure after a
    /// session exists destroys the session so the camera is never left in an
    /// undefined state.
    ///
    /// # Errors
    /// Returns [`CameraError::NotReady`] when no session exists or frame
    /// geometry is still unknown.
    pub fn capture(&mut self) -> Result<EncodedFrame, CameraError> {
        if self.stream.is_none() {
            return Err(CameraError::NotReady);
        }

        match self.capture_from_stream() {
            Ok(frame) => Ok(frame),
            Err(error) => {
                self.stop();
                Err(error)
            }
        }
    }

    fn capture_from_stream(&mut self) -> Result<EncodedFrame, CameraError> {
        let stream = self.stream.as_mut().ok_or(CameraError::NotReady)?;

        let geometry = stream.frame_size();
        let Some((width, height)) = geometry else {
            return Err(CameraError::NotReady);
        };
        if width == 0 || height == 0 {
            return Err(CameraError::NotReady);
        }

        let frame = stream.read_frame()?;
        encode_frame(&frame)
    }

    /// Releases the device and clears the session. Idempotent.
    pub fn stop(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.release();
            log::debug!("camera session released");
        }
    }
}

/// Encodes one frame as a quality-lossy JPEG base64 data URL.
///
/// # Errors
/// Returns [`CameraError::Encode`] when JPEG encoding fails.
pub fn encode_frame(frame: &CameraFrame) -> Result<EncodedFrame, CameraError> {
    // JPEG has no alpha channel; drop it before encoding.
    let mut rgb = Vec::with_capacity(frame.rgba.len() / 4 * 3);
    for pixel in frame.rgba.chunks_exact(4) {
        rgb.extend_from_slice(&pixel[..3]);
    }

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY)
        .encode(&rgb, frame.width, frame.height, ExtendedColorType::Rgb8)
        .map_err(|error| CameraError::Encode(error.to_string()))?;

    Ok(EncodedFrame {
        data_url: format!("data:{JPEG_MIME};base64,{}", BASE64_STANDARD.encode(&jpeg)),
        width: frame.width,
        height: frame.height,
    })
}

/// Deterministic synthetic camera for tests and the demo binary.
#[derive(Debug, Clone)]
pub struct SyntheticCameraBackend {
    width: u32,
    height: u32,
    deny_access: bool,
    report_geometry: bool,
}

impl SyntheticCameraBackend {
    /// Creates a ready synthetic camera with the given geometry.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            deny_access: false,
            report_geometry: true,
        }
    }

    /// Creates a backend that refuses access, for denial-path tests.
    pub fn denied() -> Self {
        Self {
            width: 0,
            height: 0,
            deny_access: true,
            report_geometry: false,
        }
    }

    /// Creates a backend whose stream never reports frame geometry,
    /// modeling a stream stuck before first-frame decode.
    pub fn warming_up(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            deny_access: false,
            report_geometry: false,
        }
    }
}

impl CameraBackend for SyntheticCameraBackend {
    fn open(&self) -> Result<Box<dyn CameraStream>, CameraError> {
        if self.deny_access {
            return Err(CameraError::AccessDenied(
                "camera permission refused".to_string(),
            ));
        }

        Ok(Box::new(SyntheticCameraStream {
            width: self.width,
            height: self.height,
            report_geometry: self.report_geometry,
            sequence: 0,
        }))
    }
}

struct SyntheticCameraStream {
    width: u32,
    height: u32,
    report_geometry: bool,
    sequence: u64,
}

impl CameraStream for SyntheticCameraStream {
    fn frame_size(&self) -> Option<(u32, u32)> {
        if self.report_geometry {
            Some((self.width, self.height))
        } else {
            None
        }
    }

    fn read_frame(&mut self) -> Result<CameraFrame, CameraError> {
        self.sequence += 1;
        let byte = (self.sequence % 255) as u8;
        let rgba_len = (self.width as usize) * (self.height as usize) * 4;
        CameraFrame::new(self.width, self.height, vec![byte; rgba_len])
    }

    fn release(&mut self) {
        self.report_geometry = false;
    }
}

/// Camera layer error type.
#[derive(Debug, Error)]
pub enum CameraError {
    /// Permission denied or device unavailable at acquisition time.
    #[error("camera access denied: {0}")]
    AccessDenied(String),
    /// Capture attempted without an active session or known frame geometry.
    #[error("camera stream not ready")]
    NotReady,
    /// Frame buffer shape does not match declared geometry.
    #[error("invalid frame shape: expected {expected} bytes, got {actual}")]
    InvalidFrameShape {
        /// Expected RGBA byte count.
        expected: usize,
        /// Actual RGBA byte count.
        actual: usize,
    },
    /// JPEG encoding failure.
    #[error("frame encoding failure: {0}")]
    Encode(String),
    /// Backend runtime failure.
    #[error("camera backend failure: {0}")]
    Backend(String),
}
