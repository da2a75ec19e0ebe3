//! Analyze command - extract statistics from one pasted profile page.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Instant;

use chrono::Local;
use clap::Args;
use console::style;
use tracing::{debug, info};

use vintalyze_core::{ExtractionResult, ProfileExtractor, ProfileParser};

use super::output::{OutputFormat, format_record, write_export};
use super::{ExtractionOverrides, extraction_failure, load_config};

/// Message shown when nothing was pasted.
pub const EMPTY_INPUT_MESSAGE: &str = "Veuillez coller le contenu de la page du profil Vinted";

/// Arguments for the analyze command.
#[derive(Args)]
pub struct AnalyzeArgs {
    /// File holding the pasted page text (default: stdin)
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also write a CSV export named after the shop into this directory
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Show which rule matched each field, and extraction warnings
    #[arg(long)]
    show_sources: bool,

    #[command(flatten)]
    overrides: ExtractionOverrides,
}

pub async fn run(args: AnalyzeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let options = args.overrides.apply(config.extraction.clone());

    let text = read_input(args.input.as_ref())?;
    if text.trim().is_empty() {
        anyhow::bail!(EMPTY_INPUT_MESSAGE);
    }

    info!("Analyzing {} characters of pasted text", text.chars().count());

    let parser = ProfileParser::new(&options).map_err(extraction_failure)?;
    let result = parser.parse(&text).map_err(extraction_failure)?;
    let record = &result.record;

    let output = format_record(record, args.format, &config.report)?;

    // Write output
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if let Some(dir) = &args.export_dir {
        let path = write_export(record, dir, &config.report)?;
        eprintln!(
            "{} Export written to {} ({})",
            style("✓").green(),
            path.display(),
            Local::now().format("%Y-%m-%d %H:%M")
        );
    }

    if args.show_sources {
        print_sources(&result);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn read_input(input: Option<&PathBuf>) -> anyhow::Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => {
            if !path.exists() {
                anyhow::bail!("Input file not found: {}", path.display());
            }
            Ok(fs::read_to_string(path)?)
        }
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn print_sources(result: &ExtractionResult) {
    eprintln!();
    for source in &result.sources {
        let line = source
            .line
            .map(|l| format!(" (line {})", l + 1))
            .unwrap_or_default();
        eprintln!(
            "{} {} <- {}{}",
            style("ℹ").blue(),
            source.field,
            source.rule,
            line
        );
    }
    for warning in &result.warnings {
        eprintln!("{} {}", style("!").yellow(), warning);
    }
}
