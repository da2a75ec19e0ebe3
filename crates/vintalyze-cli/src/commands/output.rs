//! Record rendering shared by the analyze and batch commands.

use std::fs;
use std::path::{Path, PathBuf};

use console::style;

use vintalyze_core::models::config::ReportConfig;
use vintalyze_core::{EngagementChart, ProfileRecord, export_file_stem, general_info_rows};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output (general info table, then comments table)
    Csv,
    /// Plain text report with an engagement chart
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

pub fn format_record(
    record: &ProfileRecord,
    format: OutputFormat,
    report: &ReportConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record, report)),
    }
}

/// Two CSV tables separated by a blank line: general info, then comments.
pub fn format_csv(record: &ProfileRecord) -> anyhow::Result<String> {
    let mut info = csv::Writer::from_writer(vec![]);
    info.write_record(["Champ", "Valeur"])?;
    for row in general_info_rows(record) {
        info.write_record([row.label, row.value.as_str()])?;
    }

    let mut comments = csv::Writer::from_writer(vec![]);
    comments.write_record(["Auteur", "Date", "Commentaire"])?;
    for comment in record.comments() {
        comments.write_record([
            comment.author.as_str(),
            comment.relative_time.as_str(),
            comment.body.as_str(),
        ])?;
    }

    let info = String::from_utf8(info.into_inner()?)?;
    let comments = String::from_utf8(comments.into_inner()?)?;
    Ok(format!("{info}\n{comments}"))
}

pub fn format_text(record: &ProfileRecord, report: &ReportConfig) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", style("Informations générales").bold()));
    for row in general_info_rows(record) {
        output.push_str(&format!("  {}: {}\n", row.label, row.value));
    }

    if !record.comments().is_empty() {
        output.push('\n');
        output.push_str(&format!("{}\n", style("Derniers commentaires").bold()));
        for comment in record.comments() {
            output.push_str(&format!("  {} - {}\n", comment.author, comment.relative_time));
            if comment.has_body() {
                output.push_str(&format!("    {}\n", comment.body));
            }
        }
    }

    output.push('\n');
    output.push_str(&format!("{}\n", style("Statistiques").bold()));
    let chart = EngagementChart::from_record(record);
    let label_width = chart
        .bars
        .iter()
        .map(|b| b.label.chars().count())
        .max()
        .unwrap_or(0);
    for (bar, len) in chart.scaled(report.chart_width) {
        let padding = label_width - bar.label.chars().count();
        output.push_str(&format!(
            "  {}{} {} {}\n",
            bar.label,
            " ".repeat(padding),
            style("█".repeat(len)).cyan(),
            bar.value
        ));
    }

    output
}

/// Write the CSV export into `dir`, named after the shop.
pub fn write_export(
    record: &ProfileRecord,
    dir: &Path,
    report: &ReportConfig,
) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!(
        "{}.csv",
        export_file_stem(record, &report.export_prefix)
    ));
    fs::write(&path, format_csv(record)?)?;
    Ok(path)
}
