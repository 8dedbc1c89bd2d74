//! OCR engine output as consumed by the KTP parser.
//!
//! The engines themselves run outside this crate (Apple Vision, Google ML Kit
//! or a browser-side recognizer). They hand over recognized text together with
//! a confidence score and the time they took.

mod comparison;

pub use comparison::EngineComparison;

use serde::{Deserialize, Serialize};

use crate::error::{KtpError, OcrError, Result};
use crate::models::ktp::OcrEngine;

/// Text recognized by one OCR engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrOutput {
    /// Recognized text, lines separated by newlines.
    pub text: String,

    /// Engine confidence score (0.0 - 1.0).
    pub confidence: f64,

    /// Engine that produced the text.
    pub engine: OcrEngine,

    /// Processing time in seconds.
    #[serde(default)]
    pub processing_time: f64,
}

impl OcrOutput {
    /// Create an output from its parts.
    pub fn new(text: impl Into<String>, confidence: f64, engine: OcrEngine) -> Self {
        Self {
            text: text.into(),
            confidence,
            engine,
            processing_time: 0.0,
        }
    }

    /// Set the processing time.
    pub fn with_processing_time(mut self, seconds: f64) -> Self {
        self.processing_time = seconds;
        self
    }

    /// Parse an output from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let output: Self = serde_json::from_str(json)?;
        if !(0.0..=1.0).contains(&output.confidence) {
            return Err(KtpError::InvalidInput(format!(
                "confidence must be within 0.0 - 1.0, got {}",
                output.confidence
            )));
        }
        if output.processing_time < 0.0 {
            return Err(KtpError::InvalidInput(format!(
                "processing time must not be negative, got {}",
                output.processing_time
            )));
        }
        Ok(output)
    }

    /// Fail with [`OcrError::NoTextDetected`] if the engine returned only whitespace.
    pub fn ensure_text(self) -> std::result::Result<Self, OcrError> {
        if self.text.trim().is_empty() {
            Err(OcrError::NoTextDetected)
        } else {
            Ok(self)
        }
    }
}
