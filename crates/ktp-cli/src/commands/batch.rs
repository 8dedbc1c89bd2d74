//! Batch processing command for multiple OCR outputs.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use ktp_core::models::config::KtpConfig;
use ktp_core::{ExtractionResult, KtpParser, OcrEngine};

use super::input::{is_supported_input, load_config, read_ocr_output, TextDumpMeta};
use super::output::{format_record, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching .txt / .json inputs
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Engine that produced the text dumps
    #[arg(short, long, default_value = "vision")]
    engine: OcrEngine,

    /// Engine confidence for text dumps (0.0 - 1.0)
    #[arg(long, default_value_t = 1.0)]
    confidence: f64,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    result: Option<ExtractionResult>,
    error: Option<String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_supported_input(p))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let parser = KtpParser::from_config(&config.extraction);
    let meta = TextDumpMeta {
        engine: args.engine,
        confidence: args.confidence,
        processing_time: 0.0,
    };

    let mut results = Vec::with_capacity(files.len());
    for path in files {
        let outcome = read_ocr_output(&path, meta)
            .and_then(|ocr| Ok(ocr.ensure_text()?))
            .map(|ocr| {
                parser.parse_detailed(&ocr.text, ocr.confidence, ocr.engine, ocr.processing_time)
            });

        match outcome {
            Ok(result) => {
                debug!("{}: {}", path.display(), result.metrics);
                if let Some(output_dir) = &args.output_dir {
                    write_output(output_dir, &path, &result, args.format, &config)?;
                }
                results.push(FileResult {
                    path,
                    result: Some(result),
                    error: None,
                });
            }
            Err(e) => {
                let error_msg = format!("{:#}", e);
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(FileResult {
                        path,
                        result: None,
                        error: Some(error_msg),
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    pb.abandon();
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(results.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn write_output(
    output_dir: &Path,
    input: &Path,
    result: &ExtractionResult,
    format: OutputFormat,
    config: &KtpConfig,
) -> anyhow::Result<()> {
    let output_name = input.file_stem().and_then(|s| s.to_str()).unwrap_or("ktp");
    let output_path = output_dir.join(format!("{}.{}", output_name, format.extension()));

    let content = format_record(&result.record, format, &config.output)?;
    fs::write(&output_path, content)?;
    debug!("Wrote output to {}", output_path.display());
    Ok(())
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "engine",
        "success_count",
        "total_count",
        "success_rate",
        "nik",
        "nama",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(extraction) = &result.result {
            let record = &extraction.record;
            let metrics = &extraction.metrics;
            wtr.write_record([
                filename,
                "success",
                record.ocr_engine().name(),
                &metrics.success_count.to_string(),
                &metrics.total_count.to_string(),
                &format!("{:.3}", metrics.success_rate),
                record.nik().unwrap_or(""),
                record.nama().unwrap_or(""),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                "",
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
