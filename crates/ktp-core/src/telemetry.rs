//! Observability hooks for field extraction.
//!
//! The parser reports every field outcome and the final metrics to an
//! [`ExtractionObserver`]. Observers only watch; nothing they do can change a
//! parse result.

use tracing::{debug, info};

use crate::models::ktp::{ExtractionMetrics, KtpField, OcrEngine};

/// Receiver of extraction telemetry.
pub trait ExtractionObserver: Send + Sync {
    /// Called once per strategy run.
    fn field_extracted(&self, field: KtpField, value: Option<&str>, success: bool);

    /// Called once per parse, after all strategies ran.
    fn parse_completed(&self, engine: OcrEngine, metrics: &ExtractionMetrics);
}

/// Observer that emits `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ExtractionObserver for TracingObserver {
    fn field_extracted(&self, field: KtpField, value: Option<&str>, success: bool) {
        debug!(
            target: "ktp_core::extraction",
            field = field.name(),
            value = value.unwrap_or("-"),
            success,
            "field extraction"
        );
    }

    fn parse_completed(&self, engine: OcrEngine, metrics: &ExtractionMetrics) {
        info!(
            target: "ktp_core::extraction",
            engine = engine.name(),
            success_count = metrics.success_count,
            total_count = metrics.total_count,
            success_rate = metrics.success_rate,
            "KTP parsing complete: {}",
            metrics
        );
    }
}

/// Observer that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ExtractionObserver for NoopObserver {
    fn field_extracted(&self, _field: KtpField, _value: Option<&str>, _success: bool) {}

    fn parse_completed(&self, _engine: OcrEngine, _metrics: &ExtractionMetrics) {}
}
