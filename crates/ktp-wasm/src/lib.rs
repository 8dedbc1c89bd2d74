//! WASM bindings for KTP OCR text extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.
//! OCR itself runs on the JS side; these bindings turn its text into records.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use ktp_core::ktp::rules::is_well_formed_nik as nik_is_well_formed;
use ktp_core::{
    EngineComparison, ExtractionMetrics, KtpParser, KtpRecord, KtpTextParser, OcrEngine,
};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_engine(engine: &str) -> Result<OcrEngine, JsValue> {
    engine
        .parse()
        .map_err(|e: ktp_core::KtpError| JsValue::from_str(&e.to_string()))
}

/// Extract KTP fields from OCR text.
///
/// `engine` is `"vision"` or `"mlkit"` (or the engine display names).
#[wasm_bindgen]
pub fn parse_ktp_text(text: &str, confidence: f64, engine: &str) -> Result<JsValue, JsValue> {
    let engine = parse_engine(engine)?;
    let record = KtpParser::new().parse(text, confidence, engine, 0.0);
    to_js(&record)
}

/// Parse both engines' text and pick the more confident result.
#[wasm_bindgen]
pub fn compare_engines(
    vision_text: &str,
    vision_confidence: f64,
    mlkit_text: &str,
    mlkit_confidence: f64,
) -> Result<JsValue, JsValue> {
    let parser = KtpParser::new();
    let comparison = EngineComparison::new(
        Some(parser.parse(vision_text, vision_confidence, OcrEngine::Vision, 0.0)),
        Some(parser.parse(mlkit_text, mlkit_confidence, OcrEngine::MlKit, 0.0)),
    );
    to_js(&ComparisonResult::new(&comparison))
}

/// Whether `nik` is exactly sixteen digits.
#[wasm_bindgen]
pub fn is_well_formed_nik(nik: &str) -> bool {
    nik_is_well_formed(nik)
}

#[derive(Serialize)]
struct ComparisonResult<'a> {
    vision: Option<&'a KtpRecord>,
    mlkit: Option<&'a KtpRecord>,
    best: Option<&'a KtpRecord>,
    best_engine: Option<OcrEngine>,
}

impl<'a> ComparisonResult<'a> {
    fn new(comparison: &'a EngineComparison) -> Self {
        let best = comparison.best_result();
        Self {
            vision: comparison.vision.as_ref(),
            mlkit: comparison.mlkit.as_ref(),
            best,
            best_engine: best.map(KtpRecord::ocr_engine),
        }
    }
}

#[derive(Serialize)]
struct ExtractResult {
    record: KtpRecord,
    metrics: ExtractionMetrics,
}

/// KTP extractor class for browser use.
#[wasm_bindgen]
pub struct KtpExtractor {
    parser: KtpParser,
}

#[wasm_bindgen]
impl KtpExtractor {
    /// Create a new KTP extractor with all 15 fields enabled.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: KtpParser::new(),
        }
    }

    /// Enable or disable blood type extraction.
    #[wasm_bindgen]
    pub fn set_include_blood_type(&mut self, include: bool) {
        self.parser = KtpParser::new().with_blood_type(include);
    }

    /// Number of fields this extractor attempts.
    #[wasm_bindgen]
    pub fn field_count(&self) -> usize {
        self.parser.fields().len()
    }

    /// Extract a record from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str, confidence: f64, engine: &str) -> Result<JsValue, JsValue> {
        let engine = parse_engine(engine)?;
        to_js(&self.parser.parse(text, confidence, engine, 0.0))
    }

    /// Extract a record together with its extraction metrics.
    #[wasm_bindgen]
    pub fn extract_with_metrics(
        &self,
        text: &str,
        confidence: f64,
        engine: &str,
    ) -> Result<JsValue, JsValue> {
        let engine = parse_engine(engine)?;
        let result = self.parser.parse_detailed(text, confidence, engine, 0.0);
        to_js(&ExtractResult {
            record: result.record,
            metrics: result.metrics,
        })
    }
}

impl Default for KtpExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Text recognized line by line by a browser-side OCR engine.
#[wasm_bindgen]
pub struct OcrTextJs {
    lines: Vec<OcrLineJs>,
    engine: OcrEngine,
    processing_time: f64,
}

#[wasm_bindgen]
impl OcrTextJs {
    #[wasm_bindgen(constructor)]
    pub fn new(engine: &str) -> Result<OcrTextJs, JsValue> {
        Ok(Self {
            lines: Vec::new(),
            engine: parse_engine(engine)?,
            processing_time: 0.0,
        })
    }

    /// Add a recognized line with its confidence.
    #[wasm_bindgen]
    pub fn add_line(&mut self, text: &str, confidence: f64) {
        self.lines.push(OcrLineJs {
            text: text.to_string(),
            confidence,
        });
    }

    /// Set the time the engine took, in seconds.
    #[wasm_bindgen]
    pub fn set_processing_time(&mut self, seconds: f64) {
        self.processing_time = seconds;
    }

    /// Get the full text, one recognized line per line.
    #[wasm_bindgen]
    pub fn get_text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Mean line confidence, 0.0 without lines.
    #[wasm_bindgen]
    pub fn confidence(&self) -> f64 {
        if self.lines.is_empty() {
            return 0.0;
        }
        self.lines.iter().map(|l| l.confidence).sum::<f64>() / self.lines.len() as f64
    }

    /// Extract a KTP record from this OCR result.
    #[wasm_bindgen]
    pub fn extract_ktp(&self) -> Result<JsValue, JsValue> {
        to_js(&self.to_record())
    }
}

impl OcrTextJs {
    fn to_record(&self) -> KtpRecord {
        KtpParser::new().parse(
            &self.get_text(),
            self.confidence(),
            self.engine,
            self.processing_time,
        )
    }
}

struct OcrLineJs {
    text: String,
    confidence: f64,
}
