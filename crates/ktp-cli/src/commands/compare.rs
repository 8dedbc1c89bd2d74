//! Compare command - parse Apple Vision and ML Kit outputs side by side.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use console::style;
use serde::Serialize;
use tracing::{debug, warn};

use ktp_core::models::config::OutputConfig;
use ktp_core::{
    EngineComparison, ExtractionMetrics, KtpField, KtpParser, KtpRecord, KtpTextParser,
    OcrEngine, OcrError,
};

use super::input::{load_config, read_ocr_output, TextDumpMeta};
use super::output::{to_json, OutputFormat};

/// Arguments for the compare command.
#[derive(Args)]
pub struct CompareArgs {
    /// Apple Vision output (.txt or .json)
    #[arg(required = true)]
    vision: PathBuf,

    /// Google ML Kit output (.txt or .json)
    #[arg(required = true)]
    mlkit: PathBuf,

    /// Vision confidence for a text dump (0.0 - 1.0)
    #[arg(long, default_value_t = 1.0)]
    vision_confidence: f64,

    /// ML Kit confidence for a text dump (0.0 - 1.0)
    #[arg(long, default_value_t = 1.0)]
    mlkit_confidence: f64,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

/// Serialized comparison.
#[derive(Serialize)]
struct ComparisonReport<'a> {
    vision: Option<&'a KtpRecord>,
    mlkit: Option<&'a KtpRecord>,
    vision_metrics: Option<ExtractionMetrics>,
    mlkit_metrics: Option<ExtractionMetrics>,
    best_engine: Option<OcrEngine>,
}

impl<'a> ComparisonReport<'a> {
    fn new(comparison: &'a EngineComparison, fields: &[KtpField]) -> Self {
        Self {
            vision: comparison.vision.as_ref(),
            mlkit: comparison.mlkit.as_ref(),
            vision_metrics: comparison.vision.as_ref().map(|r| r.metrics_for(fields)),
            mlkit_metrics: comparison.mlkit.as_ref().map(|r| r.metrics_for(fields)),
            best_engine: comparison.best_result().map(KtpRecord::ocr_engine),
        }
    }
}

pub async fn run(args: CompareArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let parser = Arc::new(KtpParser::from_config(&config.extraction));

    let vision_meta = TextDumpMeta {
        engine: OcrEngine::Vision,
        confidence: args.vision_confidence,
        processing_time: 0.0,
    };
    let mlkit_meta = TextDumpMeta {
        engine: OcrEngine::MlKit,
        confidence: args.mlkit_confidence,
        processing_time: 0.0,
    };

    let vision_task = {
        let parser = Arc::clone(&parser);
        let input = args.vision.clone();
        tokio::task::spawn_blocking(move || run_engine(&parser, input, vision_meta))
    };
    let mlkit_task = {
        let parser = Arc::clone(&parser);
        let input = args.mlkit.clone();
        tokio::task::spawn_blocking(move || run_engine(&parser, input, mlkit_meta))
    };

    let (vision, mlkit) = tokio::join!(vision_task, mlkit_task);
    let comparison = EngineComparison::from_runs(vision?, mlkit?)
        .context("Neither engine produced a usable result")?;
    let fields = parser.fields();

    let output = match args.format {
        OutputFormat::Json => {
            to_json(&ComparisonReport::new(&comparison, &fields), &config.output)?
        }
        OutputFormat::Csv => format_csv(&comparison)?,
        OutputFormat::Text => format_text(&comparison, &fields, &config.output),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if let Some(best) = comparison.best_result() {
        if best.confidence() < config.extraction.min_confidence {
            eprintln!(
                "{} Best result ({}) has low confidence: {:.1}%",
                style("⚠").yellow(),
                best.ocr_engine(),
                best.confidence() * 100.0
            );
        }
    }

    Ok(())
}

/// Read and parse one engine's output. Any failure counts as that engine failing.
fn run_engine(
    parser: &KtpParser,
    input: PathBuf,
    meta: TextDumpMeta,
) -> Result<KtpRecord, OcrError> {
    let ocr = read_ocr_output(&input, meta)
        .map_err(|e| {
            warn!("{} input unusable: {:#}", meta.engine, e);
            OcrError::ProcessingFailed(format!("{}: {:#}", input.display(), e))
        })?
        .ensure_text()?;

    if ocr.engine != meta.engine {
        debug!(
            "{} declares engine {}, comparing it as {}",
            input.display(),
            ocr.engine,
            meta.engine
        );
    }

    Ok(parser.parse(&ocr.text, ocr.confidence, meta.engine, ocr.processing_time))
}

fn format_csv(comparison: &EngineComparison) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["field", "vision", "mlkit"])?;

    for field in KtpField::ALL {
        wtr.write_record([
            field.name(),
            value_of(comparison.vision.as_ref(), field),
            value_of(comparison.mlkit.as_ref(), field),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(comparison: &EngineComparison, fields: &[KtpField], config: &OutputConfig) -> String {
    let mut output = format!(
        "{:<17} {:<30} {}\n",
        "Field",
        OcrEngine::Vision.name(),
        OcrEngine::MlKit.name()
    );

    for field in KtpField::ALL {
        let vision = display_value(comparison.vision.as_ref(), field);
        let mlkit = display_value(comparison.mlkit.as_ref(), field);
        let marker = if comparison.has_both_results() && vision != mlkit {
            " *"
        } else {
            ""
        };
        output.push_str(&format!("{:<17} {:<30} {}{}\n", field.name(), vision, mlkit, marker));
    }

    output.push('\n');
    for (engine, record) in [
        (OcrEngine::Vision, comparison.vision.as_ref()),
        (OcrEngine::MlKit, comparison.mlkit.as_ref()),
    ] {
        match record {
            Some(record) => output.push_str(&format!(
                "{}: {}, confidence {:.1}%, {:.2}s\n",
                engine,
                record.metrics_for(fields),
                record.confidence() * 100.0,
                record.processing_time()
            )),
            None => output.push_str(&format!("{}: failed\n", engine)),
        }
    }

    if let Some(best) = comparison.best_result() {
        output.push_str(&format!("Best result: {}\n", best.ocr_engine()));
        if config.include_raw_text {
            output.push_str("\nRaw text:\n");
            output.push_str(best.raw_text());
            output.push('\n');
        }
    }

    output
}

fn value_of(record: Option<&KtpRecord>, field: KtpField) -> &str {
    record.and_then(|r| r.get(field)).unwrap_or("")
}

fn display_value(record: Option<&KtpRecord>, field: KtpField) -> &str {
    match record {
        Some(record) => record.get(field).unwrap_or("-"),
        None => "n/a",
    }
}
