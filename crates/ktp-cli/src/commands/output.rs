//! Rendering of records for the terminal and output files.

use ktp_core::models::config::OutputConfig;
use ktp_core::{ExtractionMetrics, KtpField, KtpRecord};

/// Output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for outputs written in this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

pub fn format_record(
    record: &KtpRecord,
    format: OutputFormat,
    config: &OutputConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => to_json(record, config),
        OutputFormat::Csv => format_csv(record, config),
        OutputFormat::Text => Ok(format_text(record, config)),
    }
}

/// Serialize any value honouring `output.pretty_json`.
pub fn to_json<T: serde::Serialize>(value: &T, config: &OutputConfig) -> anyhow::Result<String> {
    let json = if config.pretty_json {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn format_csv(record: &KtpRecord, config: &OutputConfig) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header: Vec<&str> = vec!["engine", "confidence", "processing_time"];
    header.extend(KtpField::ALL.iter().map(|f| f.name()));
    if config.include_raw_text {
        header.push("raw_text");
    }
    wtr.write_record(&header)?;

    let mut row = vec![
        record.ocr_engine().to_string(),
        format!("{:.2}", record.confidence()),
        format!("{:.3}", record.processing_time()),
    ];
    row.extend(record.fields().map(|(_, value)| value.unwrap_or_default().to_string()));
    if config.include_raw_text {
        row.push(record.raw_text().to_string());
    }
    wtr.write_record(&row)?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &KtpRecord, config: &OutputConfig) -> String {
    let mut output = format!(
        "KTP ({}, confidence {:.1}%, {:.2}s)\n",
        record.ocr_engine(),
        record.confidence() * 100.0,
        record.processing_time()
    );

    for (field, value) in record.fields() {
        output.push_str(&format!("  {:<17} {}\n", field.name(), value.unwrap_or("-")));
    }

    if config.include_raw_text {
        output.push_str("\nRaw text:\n");
        output.push_str(record.raw_text());
        output.push('\n');
    }

    output
}

/// One-line metrics summary.
pub fn format_metrics(metrics: &ExtractionMetrics) -> String {
    format!("Extracted {}", metrics)
}
