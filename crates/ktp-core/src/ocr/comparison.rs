//! Pairing of records read by the two OCR engines.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::OcrError;
use crate::models::ktp::{KtpRecord, OcrEngine};

/// Records produced from each engine's output for the same image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineComparison {
    /// Record parsed from Apple Vision output.
    pub vision: Option<KtpRecord>,
    /// Record parsed from Google ML Kit output.
    pub mlkit: Option<KtpRecord>,
}

impl EngineComparison {
    pub fn new(vision: Option<KtpRecord>, mlkit: Option<KtpRecord>) -> Self {
        Self { vision, mlkit }
    }

    /// Build a comparison from per-engine outcomes.
    ///
    /// A failed engine contributes no record. Fails only when both engines
    /// failed, with the Vision error.
    pub fn from_runs(
        vision: Result<KtpRecord, OcrError>,
        mlkit: Result<KtpRecord, OcrError>,
    ) -> Result<Self, OcrError> {
        match (vision, mlkit) {
            (Err(vision_err), Err(mlkit_err)) => {
                warn!("Both engines failed: {}; {}", vision_err, mlkit_err);
                Err(vision_err)
            }
            (vision, mlkit) => {
                if let Err(e) = &vision {
                    debug!("{} failed: {}", OcrEngine::Vision, e);
                }
                if let Err(e) = &mlkit {
                    debug!("{} failed: {}", OcrEngine::MlKit, e);
                }
                Ok(Self::new(vision.ok(), mlkit.ok()))
            }
        }
    }

    /// Whether both engines produced a record.
    pub fn has_both_results(&self) -> bool {
        self.vision.is_some() && self.mlkit.is_some()
    }

    /// The record with the higher confidence; Vision wins ties.
    pub fn best_result(&self) -> Option<&KtpRecord> {
        match (&self.vision, &self.mlkit) {
            (Some(vision), Some(mlkit)) => {
                if vision.confidence() >= mlkit.confidence() {
                    Some(vision)
                } else {
                    Some(mlkit)
                }
            }
            (vision, mlkit) => vision.as_ref().or(mlkit.as_ref()),
        }
    }

    /// Vision processing time in seconds, 0.0 when absent.
    pub fn vision_time(&self) -> f64 {
        self.vision.as_ref().map_or(0.0, KtpRecord::processing_time)
    }

    /// ML Kit processing time in seconds, 0.0 when absent.
    pub fn mlkit_time(&self) -> f64 {
        self.mlkit.as_ref().map_or(0.0, KtpRecord::processing_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(engine: OcrEngine, confidence: f64) -> KtpRecord {
        KtpRecord::new("text", confidence, engine, 0.4)
    }

    #[test]
    fn test_best_result_prefers_higher_confidence() {
        let comparison = EngineComparison::new(
            Some(record(OcrEngine::Vision, 0.7)),
            Some(record(OcrEngine::MlKit, 0.9)),
        );

        assert!(comparison.has_both_results());
        assert_eq!(comparison.best_result().unwrap().ocr_engine(), OcrEngine::MlKit);
    }

    #[test]
    fn test_best_result_tie_goes_to_vision() {
        let comparison = EngineComparison::new(
            Some(record(OcrEngine::Vision, 0.8)),
            Some(record(OcrEngine::MlKit, 0.8)),
        );

        assert_eq!(comparison.best_result().unwrap().ocr_engine(), OcrEngine::Vision);
    }

    #[test]
    fn test_single_engine() {
        let comparison = EngineComparison::new(None, Some(record(OcrEngine::MlKit, 0.3)));

        assert!(!comparison.has_both_results());
        assert_eq!(comparison.best_result().unwrap().ocr_engine(), OcrEngine::MlKit);
        assert_eq!(comparison.vision_time(), 0.0);
        assert_eq!(comparison.mlkit_time(), 0.4);
    }

    #[test]
    fn test_from_runs() {
        let comparison = EngineComparison::from_runs(
            Err(OcrError::Timeout),
            Ok(record(OcrEngine::MlKit, 0.6)),
        )
        .unwrap();
        assert!(comparison.vision.is_none());
        assert!(comparison.mlkit.is_some());

        let failed = EngineComparison::from_runs(
            Err(OcrError::NoTextDetected),
            Err(OcrError::EngineUnavailable(OcrEngine::MlKit)),
        );
        assert_eq!(failed, Err(OcrError::NoTextDetected));
    }
}
