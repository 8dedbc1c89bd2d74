//! Core library for Indonesian KTP (identity card) OCR text extraction.
//!
//! This crate provides:
//! - Line preprocessing of raw OCR text
//! - Rule-based extraction of the 15 KTP fields (NIK, nama, tempat/tanggal
//!   lahir, alamat, RT/RW, ...)
//! - Extraction metrics and telemetry hooks
//! - Side-by-side comparison of Apple Vision and Google ML Kit results

pub mod error;
pub mod ktp;
pub mod models;
pub mod ocr;
pub mod telemetry;

pub use error::{KtpError, OcrError, Result};
pub use ktp::{ExtractionResult, FieldExtractor, KtpParser, KtpTextParser};
pub use models::config::{ExtractionConfig, KtpConfig, OutputConfig};
pub use models::ktp::{ExtractionMetrics, KtpField, KtpRecord, OcrEngine, Validity};
pub use ocr::{EngineComparison, OcrOutput};
pub use telemetry::{ExtractionObserver, NoopObserver, TracingObserver};
