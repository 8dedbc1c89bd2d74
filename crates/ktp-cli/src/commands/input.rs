//! Loading OCR inputs and configuration.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use ktp_core::{KtpConfig, OcrEngine, OcrOutput};

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ktp")
        .join("config.json")
}

/// Load the configuration: `--config` if given, else the default file if it
/// exists, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<KtpConfig> {
    if let Some(path) = config_path {
        return KtpConfig::from_file(Path::new(path))
            .with_context(|| format!("Failed to load config from {}", path));
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        return KtpConfig::from_file(&default_path)
            .with_context(|| format!("Failed to load config from {}", default_path.display()));
    }

    Ok(KtpConfig::default())
}

/// Whether `path` looks like an input this tool can read.
pub fn is_supported_input(path: &Path) -> bool {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    matches!(ext.to_lowercase().as_str(), "txt" | "json")
}

/// Metadata applied to plain-text dumps, which carry none of their own.
#[derive(Debug, Clone, Copy)]
pub struct TextDumpMeta {
    pub engine: OcrEngine,
    pub confidence: f64,
    pub processing_time: f64,
}

/// Read an OCR output from a `.json` document, a text dump, or `-` for stdin.
pub fn read_ocr_output(input: &Path, meta: TextDumpMeta) -> anyhow::Result<OcrOutput> {
    let from_text = |text: String| {
        OcrOutput::new(text, meta.confidence, meta.engine).with_processing_time(meta.processing_time)
    };

    if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(from_text(text));
    }

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let is_json = input
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        let output = OcrOutput::from_json(&content)
            .with_context(|| format!("Invalid OCR output in {}", input.display()))?;
        debug!(
            "Loaded {} output from {} ({} chars)",
            output.engine,
            input.display(),
            output.text.len()
        );
        Ok(output)
    } else {
        Ok(from_text(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> TextDumpMeta {
        TextDumpMeta {
            engine: OcrEngine::MlKit,
            confidence: 0.8,
            processing_time: 0.4,
        }
    }

    #[test]
    fn test_reads_text_dump() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.txt");
        fs::write(&path, "NIK: 3174051234567890").unwrap();

        let output = read_ocr_output(&path, meta()).unwrap();
        assert_eq!(output.engine, OcrEngine::MlKit);
        assert_eq!(output.confidence, 0.8);
        assert_eq!(output.processing_time, 0.4);
        assert_eq!(output.text, "NIK: 3174051234567890");
    }

    #[test]
    fn test_json_carries_own_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.json");
        fs::write(
            &path,
            r#"{"text": "Nama: BUDI", "confidence": 0.95, "engine": "vision", "processing_time": 1.5}"#,
        )
        .unwrap();

        let output = read_ocr_output(&path, meta()).unwrap();
        assert_eq!(output.engine, OcrEngine::Vision);
        assert_eq!(output.confidence, 0.95);
        assert_eq!(output.processing_time, 1.5);
    }

    #[test]
    fn test_missing_input() {
        let err = read_ocr_output(Path::new("/nonexistent/scan.txt"), meta()).unwrap_err();
        assert!(err.to_string().contains("Input file not found"));
    }

    #[test]
    fn test_supported_inputs() {
        assert!(is_supported_input(Path::new("a.TXT")));
        assert!(is_supported_input(Path::new("dir/b.json")));
        assert!(!is_supported_input(Path::new("c.png")));
    }
}
