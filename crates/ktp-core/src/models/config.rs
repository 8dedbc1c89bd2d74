//! Configuration structures for KTP extraction and output.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{KtpError, Result};

/// Main configuration for the ktp pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KtpConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output formatting configuration.
    pub output: OutputConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Run the blood type strategy (15 fields instead of 14).
    pub include_blood_type: bool,

    /// Best-engine confidence below which front ends warn (0.0 - 1.0).
    pub min_confidence: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            include_blood_type: true,
            min_confidence: 0.5,
        }
    }
}

/// Output formatting configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty_json: bool,

    /// Include the raw OCR text in text and CSV output.
    pub include_raw_text: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty_json: true,
            include_raw_text: false,
        }
    }
}

impl KtpConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        let min = self.extraction.min_confidence;
        if !(0.0..=1.0).contains(&min) {
            return Err(KtpError::Config(format!(
                "extraction.min_confidence must be within 0.0 - 1.0, got {min}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = KtpConfig::default();
        config.extraction.include_blood_type = false;
        config.save(&path).unwrap();

        let loaded = KtpConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "output": { "include_raw_text": true } }"#).unwrap();

        let loaded = KtpConfig::from_file(&path).unwrap();
        assert!(loaded.output.include_raw_text);
        assert!(loaded.output.pretty_json);
        assert!(loaded.extraction.include_blood_type);
    }

    #[test]
    fn test_rejects_out_of_range_confidence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "extraction": { "min_confidence": 1.5 } }"#).unwrap();

        assert!(matches!(KtpConfig::from_file(&path), Err(KtpError::Config(_))));
    }
}
