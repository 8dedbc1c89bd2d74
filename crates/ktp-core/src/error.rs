//! Error types for the ktp-core library.
//!
//! Field extraction itself never fails; these errors cover loading inputs and
//! configuration, and the upstream OCR failures callers need to route.

use thiserror::Error;

use crate::models::ktp::OcrEngine;

/// Main error type for the ktp library.
#[derive(Error, Debug)]
pub enum KtpError {
    /// Upstream OCR failure.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Input that cannot be turned into an OCR output.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Failures surfaced by an OCR engine before any parsing happens.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OcrError {
    /// The requested engine is not available on this platform.
    #[error("{0} is not available")]
    EngineUnavailable(OcrEngine),

    /// The engine ran but failed.
    #[error("OCR processing failed: {0}")]
    ProcessingFailed(String),

    /// The engine returned no text.
    #[error("no text detected in image")]
    NoTextDetected,

    /// The image could not be decoded.
    #[error("invalid or corrupted image")]
    InvalidImage,

    /// The engine did not answer in time.
    #[error("OCR processing timeout")]
    Timeout,
}

/// Result type for the ktp library.
pub type Result<T> = std::result::Result<T, KtpError>;
