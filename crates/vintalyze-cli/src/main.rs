//! CLI application for Vinted profile analysis.

mod commands;

use clap::{Parser, Subcommand};
use tracing::{Level, error};
use tracing_subscriber::FmtSubscriber;

use commands::{analyze, batch, config};

/// Vintalyze - Extract profile statistics from pasted Vinted profile pages
#[derive(Parser)]
#[command(name = "vintalyze")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one pasted profile page (file or stdin)
    Analyze(analyze::AnalyzeArgs),

    /// Analyze multiple pasted profile pages
    Batch(batch::BatchArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // Logs go to stderr so stdout stays parseable
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Panic causes go to the log instead of the default hook's raw output
    std::panic::set_hook(Box::new(|info| {
        error!("internal error: {}", info);
    }));

    // Execute command
    match cli.command {
        Commands::Analyze(args) => analyze::run(args, cli.config.as_deref()).await,
        Commands::Batch(args) => batch::run(args, cli.config.as_deref()).await,
        Commands::Config(args) => config::run(args).await,
    }
}
