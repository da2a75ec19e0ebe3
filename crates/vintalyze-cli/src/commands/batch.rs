//! Batch processing command for multiple pasted profile pages.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use vintalyze_core::{ProfileExtractor, ProfileParser, ProfileRecord};

use super::output::{OutputFormat, format_record};
use super::{ExtractionOverrides, extraction_failure, load_config};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern (e.g. "pages/*.txt")
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    #[command(flatten)]
    overrides: ExtractionOverrides,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    record: Option<ProfileRecord>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let options = args.overrides.apply(config.extraction.clone());

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    // One parser for the whole batch; its rule chains are built once.
    let parser = ProfileParser::new(&options).map_err(extraction_failure)?;
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = process_single_file(&path, &parser);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(record) => {
                results.push(ProcessResult {
                    path,
                    record: Some(record),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path,
                        record: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    progress.abandon();
                    anyhow::bail!("{}: {}", path.display(), error_msg);
                }
            }
        }

        progress.inc(1);
    }

    progress.finish_and_clear();

    let successful: Vec<_> = results.iter().filter(|r| r.record.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(output_dir) = &args.output_dir {
        for result in &successful {
            if let Some(record) = &result.record {
                let output_name = result
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("profile");
                let output_path =
                    output_dir.join(format!("{}.{}", output_name, args.format.extension()));

                fs::write(&output_path, format_record(record, args.format, &config.report)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    eprintln!();
    eprintln!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for result in &failed {
            eprintln!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_single_file(path: &Path, parser: &ProfileParser) -> anyhow::Result<ProfileRecord> {
    let text = fs::read_to_string(path)?;
    if text.trim().is_empty() {
        anyhow::bail!(super::analyze::EMPTY_INPUT_MESSAGE);
    }

    let result = parser.parse(&text).map_err(extraction_failure)?;
    for warning in &result.warnings {
        debug!("{}: {}", path.display(), warning);
    }
    Ok(result.record)
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "shop_name",
        "followers",
        "following",
        "rating",
        "reviews",
        "sales_low",
        "sales_high",
        "comments",
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
            let sales = record.sales_estimate();
            wtr.write_record([
                filename,
                "success",
                record.shop_name(),
                &optional(record.follower_count()),
                &optional(record.following_count()),
                &optional(record.rating()),
                &optional(record.review_count()),
                &optional(sales.map(|s| s.low)),
                &optional(sales.map(|s| s.high)),
                &record.comments().len().to_string(),
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

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        let results = vec![
            ProcessResult {
                path: PathBuf::from("pages/shop.txt"),
                record: Some(
                    ProfileRecord::builder("MonShop")
                        .follower_count(Some(42))
                        .review_count(Some(120))
                        .build(),
                ),
                error: None,
                processing_time_ms: 3,
            },
            ProcessResult {
                path: PathBuf::from("pages/empty.txt"),
                record: None,
                error: Some("boom".to_string()),
                processing_time_ms: 1,
            },
        ];

        write_summary(&path, &results).unwrap();
        let summary = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = summary.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "shop.txt,success,MonShop,42,,,120,108,120,0,3,");
        assert_eq!(lines[2], "empty.txt,error,,,,,,,,,1,boom");
    }
}
