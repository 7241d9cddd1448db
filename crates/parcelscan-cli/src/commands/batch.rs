//! Batch command - scan a set of capture snapshots.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use parcelscan_core::{
    CaptureSnapshot, Document, LabelParser, LabelRecord, LabelScanner, RecordValidator,
    ScanConfig, ValidationOutcome,
};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each record
    #[arg(short, long, value_enum, default_value = "text")]
    format: super::scan::OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of scanning a single snapshot.
struct ScanOutcome {
    path: PathBuf,
    record: Option<LabelRecord>,
    /// Critical fields the validator reported missing; empty for a
    /// complete record.
    missing: Vec<String>,
    error: Option<String>,
    processing_time_ms: u64,
}

impl ScanOutcome {
    fn is_complete(&self) -> bool {
        self.record.is_some() && self.missing.is_empty()
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        ScanConfig::from_file(std::path::Path::new(path))?
    } else {
        ScanConfig::default()
    };

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            ext.eq_ignore_ascii_case("json")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching snapshots found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} snapshots to scan",
        style("ℹ").blue(),
        files.len()
    );

    // Create output directory if specified
    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    // Set up progress bar
    let multi_progress = MultiProgress::new();
    let overall_pb = multi_progress.add(ProgressBar::new(files.len() as u64));
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} snapshots")
            .unwrap()
            .progress_chars("=>-"),
    );

    let scanner = LabelScanner::from_config(&config.extraction);
    let validator = RecordValidator::from_config(&config.validation);

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = scan_single_snapshot(&path, &scanner, &validator);

        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok((record, missing)) => {
                if !missing.is_empty() {
                    warn!(
                        "Incomplete record from {}: missing {}",
                        path.display(),
                        missing.join(", ")
                    );
                }
                results.push(ScanOutcome {
                    path: path.clone(),
                    record: Some(record),
                    missing,
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to scan {}: {}", path.display(), error_msg);
                    results.push(ScanOutcome {
                        path: path.clone(),
                        record: None,
                        missing: Vec::new(),
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to scan {}: {}", path.display(), error_msg);
                    anyhow::bail!("Batch scan failed: {}", error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    // Write per-record outputs; only complete records are serialized.
    if let Some(ref output_dir) = args.output_dir {
        for result in results.iter().filter(|r| r.is_complete()) {
            let Some(record) = &result.record else {
                continue;
            };

            let output_name = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("record");

            let extension = match args.format {
                super::scan::OutputFormat::Json => "json",
                super::scan::OutputFormat::Csv => "csv",
                super::scan::OutputFormat::Text => "txt",
            };

            let output_path = output_dir.join(format!("{}.{}", output_name, extension));
            let content =
                super::scan::format_record(record, &record.to_display_text(), args.format)?;

            fs::write(&output_path, content)?;
            debug!("Wrote record to {}", output_path.display());
        }
    }

    // Generate summary if requested
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

    // Print totals
    let complete = results.iter().filter(|r| r.is_complete()).count();
    let incomplete = results
        .iter()
        .filter(|r| r.record.is_some() && !r.missing.is_empty())
        .count();
    let failed = results.iter().filter(|r| r.error.is_some()).count();

    println!();
    println!(
        "{} Scanned {} snapshots in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} complete, {} incomplete, {} failed",
        style(complete).green(),
        style(incomplete).yellow(),
        style(failed).red()
    );

    if incomplete > 0 {
        println!();
        println!("{}", style("Incomplete records:").yellow());
        for result in results.iter().filter(|r| !r.missing.is_empty()) {
            println!(
                "  - {}: missing {}",
                result.path.display(),
                result.missing.join(", ")
            );
        }
    }

    if failed > 0 {
        println!();
        println!("{}", style("Failed snapshots:").red());
        for result in results.iter().filter(|r| r.error.is_some()) {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn scan_single_snapshot(
    path: &PathBuf,
    scanner: &LabelScanner,
    validator: &RecordValidator,
) -> anyhow::Result<(LabelRecord, Vec<String>)> {
    let data = fs::read_to_string(path)?;
    let snapshot = CaptureSnapshot::from_json(&data)?;

    let barcode = snapshot.barcode_value().to_string();
    let document = Document::normalize(snapshot.blocks);
    let result = scanner.parse(&document, &barcode);

    let missing = match validator.validate(&result.record) {
        ValidationOutcome::Valid(_) => Vec::new(),
        ValidationOutcome::Invalid(missing) => missing,
    };

    Ok((result.record, missing))
}

fn write_summary(path: &PathBuf, results: &[ScanOutcome]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "bar_code",
        "product_type",
        "dest_postal_code",
        "track_pin",
        "missing_fields",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(record) = &result.record {
            let status = if result.missing.is_empty() {
                "complete"
            } else {
                "incomplete"
            };

            wtr.write_record([
                filename,
                status,
                &record.bar_code,
                &record.product_type,
                &record.dest_postal_code,
                &record.track_pin,
                &result.missing.join(" "),
                &result.processing_time_ms.to_string(),
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
                &result.processing_time_ms.to_string(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
