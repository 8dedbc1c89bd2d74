//! Parse command - extract KTP fields from a single OCR output.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use ktp_core::{KtpParser, OcrEngine};

use super::input::{load_config, read_ocr_output, TextDumpMeta};
use super::output::{format_metrics, format_record, OutputFormat};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input file: OCR text dump (.txt), OCR output JSON (.json), or - for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Engine that produced a text dump
    #[arg(short, long, default_value = "vision")]
    engine: OcrEngine,

    /// Engine confidence for a text dump (0.0 - 1.0)
    #[arg(long, default_value_t = 1.0)]
    confidence: f64,

    /// Engine processing time in seconds for a text dump
    #[arg(long, default_value_t = 0.0)]
    processing_time: f64,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show extraction metrics
    #[arg(long)]
    show_metrics: bool,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let meta = TextDumpMeta {
        engine: args.engine,
        confidence: args.confidence,
        processing_time: args.processing_time,
    };
    let ocr = read_ocr_output(&args.input, meta)?.ensure_text()?;

    info!("Parsing {} output from {}", ocr.engine, args.input.display());

    let parser = KtpParser::from_config(&config.extraction);
    let result = parser.parse_detailed(&ocr.text, ocr.confidence, ocr.engine, ocr.processing_time);

    let output = format_record(&result.record, args.format, &config.output)?;

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

    if args.show_metrics {
        println!();
        println!("{} {}", style("ℹ").blue(), format_metrics(&result.metrics));
        println!(
            "{} OCR confidence: {:.1}%",
            style("ℹ").blue(),
            result.record.confidence() * 100.0
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
