//! Extraction orchestrator: runs every field strategy over one OCR text.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::config::ExtractionConfig;
use crate::models::ktp::{ExtractionMetrics, KtpField, KtpRecord, OcrEngine};
use crate::ocr::OcrOutput;
use crate::telemetry::{ExtractionObserver, TracingObserver};

use super::preprocess::preprocess;
use super::rules::{default_extractors, BloodTypeExtractor, FieldExtractor};

/// Record together with the metrics of the parse that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Extracted record.
    pub record: KtpRecord,
    /// Success statistics over the configured strategies.
    pub metrics: ExtractionMetrics,
}

/// Trait for KTP text parsing.
pub trait KtpTextParser {
    /// Parse OCR text into a record. Never fails: unreadable fields are absent.
    fn parse(
        &self,
        text: &str,
        confidence: f64,
        engine: OcrEngine,
        processing_time: f64,
    ) -> KtpRecord;

    /// Parse the output of an OCR engine.
    fn parse_output(&self, output: &OcrOutput) -> KtpRecord {
        self.parse(
            &output.text,
            output.confidence,
            output.engine,
            output.processing_time,
        )
    }
}

/// Rule-based KTP parser.
///
/// Holds no mutable state, so one parser can be shared between threads and
/// reused for any number of texts.
pub struct KtpParser {
    extractors: Vec<Box<dyn FieldExtractor>>,
    observer: Arc<dyn ExtractionObserver>,
}

impl KtpParser {
    /// Create a parser with all 15 field strategies, reporting through `tracing`.
    pub fn new() -> Self {
        Self {
            extractors: default_extractors(),
            observer: Arc::new(TracingObserver),
        }
    }

    /// Create a parser from extraction settings.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new().with_blood_type(config.include_blood_type)
    }

    /// Replace the telemetry observer.
    pub fn with_observer(mut self, observer: Arc<dyn ExtractionObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Enable or disable the blood type strategy.
    pub fn with_blood_type(mut self, enabled: bool) -> Self {
        let present = self
            .extractors
            .iter()
            .any(|e| e.field() == KtpField::GolonganDarah);

        if enabled && !present {
            self.extractors.push(Box::new(BloodTypeExtractor));
        } else if !enabled {
            self.extractors
                .retain(|e| e.field() != KtpField::GolonganDarah);
        }
        self
    }

    /// Replace the strategy set.
    pub fn with_extractors(mut self, extractors: Vec<Box<dyn FieldExtractor>>) -> Self {
        self.extractors = extractors;
        self
    }

    /// Fields this parser attempts, in run order.
    pub fn fields(&self) -> Vec<KtpField> {
        self.extractors.iter().map(|e| e.field()).collect()
    }

    /// Parse and also return metrics over the configured strategies.
    pub fn parse_detailed(
        &self,
        text: &str,
        confidence: f64,
        engine: OcrEngine,
        processing_time: f64,
    ) -> ExtractionResult {
        let lines = preprocess(text);
        debug!(lines = lines.len(), engine = engine.name(), "Parsing KTP text");

        let mut record = KtpRecord::new(text, confidence, engine, processing_time);
        let mut success_count = 0;

        for extractor in &self.extractors {
            let field = extractor.field();
            record = record.with_field(field, extractor.extract(&lines));

            let value = record.get(field);
            let success = value.is_some();
            if success {
                success_count += 1;
            }
            self.observer.field_extracted(field, value, success);
        }

        let metrics = ExtractionMetrics::new(success_count, self.extractors.len());
        self.observer.parse_completed(engine, &metrics);

        ExtractionResult { record, metrics }
    }
}

impl KtpTextParser for KtpParser {
    fn parse(
        &self,
        text: &str,
        confidence: f64,
        engine: OcrEngine,
        processing_time: f64,
    ) -> KtpRecord {
        self.parse_detailed(text, confidence, engine, processing_time)
            .record
    }
}

impl Default for KtpParser {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for KtpParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KtpParser")
            .field("fields", &self.fields())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct RecordingObserver {
        fields: Mutex<Vec<(KtpField, Option<String>, bool)>>,
        completed: Mutex<Vec<(OcrEngine, ExtractionMetrics)>>,
    }

    impl ExtractionObserver for RecordingObserver {
        fn field_extracted(&self, field: KtpField, value: Option<&str>, success: bool) {
            self.fields
                .lock()
                .unwrap()
                .push((field, value.map(str::to_string), success));
        }

        fn parse_completed(&self, engine: OcrEngine, metrics: &ExtractionMetrics) {
            self.completed.lock().unwrap().push((engine, *metrics));
        }
    }

    const SAMPLE: &str = "NIK: 3174051234567890\nNama: BUDI SANTOSO\nAgama: ISLAM";

    #[test]
    fn test_parse_sets_metadata() {
        let parser = KtpParser::new();
        let record = parser.parse(SAMPLE, 0.9, OcrEngine::MlKit, 1.25);

        assert_eq!(record.raw_text(), SAMPLE);
        assert_eq!(record.confidence(), 0.9);
        assert_eq!(record.ocr_engine(), OcrEngine::MlKit);
        assert_eq!(record.processing_time(), 1.25);
        assert_eq!(record.nik(), Some("3174051234567890"));
        assert_eq!(record.nama(), Some("BUDI SANTOSO"));
        assert_eq!(record.agama(), Some("ISLAM"));
    }

    #[test]
    fn test_observer_sees_every_strategy() {
        let observer = Arc::new(RecordingObserver::default());
        let parser = KtpParser::new().with_observer(observer.clone());
        let result = parser.parse_detailed(SAMPLE, 0.9, OcrEngine::Vision, 0.5);

        let fields = observer.fields.lock().unwrap();
        assert_eq!(fields.len(), 15);
        assert_eq!(fields[0], (KtpField::Nik, Some("3174051234567890".to_string()), true));
        assert!(fields.iter().all(|(_, value, success)| value.is_some() == *success));

        let completed = observer.completed.lock().unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].0, OcrEngine::Vision);
        assert_eq!(completed[0].1, result.metrics);
        assert_eq!(result.metrics.success_count, 3);
        assert_eq!(result.metrics.total_count, 15);
    }

    #[test]
    fn test_without_blood_type() {
        let parser = KtpParser::new().with_blood_type(false);
        assert_eq!(parser.fields().len(), 14);
        assert!(!parser.fields().contains(&KtpField::GolonganDarah));

        let result = parser.parse_detailed("Gol. Darah: A", 1.0, OcrEngine::Vision, 0.0);
        assert_eq!(result.record.golongan_darah(), None);
        assert_eq!(result.metrics.total_count, 14);

        let parser = parser.with_blood_type(true);
        assert_eq!(parser.fields().len(), 15);
    }

    #[test]
    fn test_from_config() {
        let config = ExtractionConfig {
            include_blood_type: false,
            ..ExtractionConfig::default()
        };
        assert_eq!(KtpParser::from_config(&config).fields().len(), 14);
        assert_eq!(
            KtpParser::from_config(&ExtractionConfig::default()).fields(),
            KtpField::ALL.to_vec()
        );
    }

    #[test]
    fn test_parse_output() {
        let output = OcrOutput::new("Kewarganegaraan: WNI", 0.7, OcrEngine::Vision)
            .with_processing_time(0.3);
        let record = KtpParser::new().parse_output(&output);
        assert_eq!(record.kewarganegaraan(), Some("WNI"));
        assert_eq!(record.processing_time(), 0.3);
    }
}
