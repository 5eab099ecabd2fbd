//! CLI application for medicine label OCR transcripts.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, extract, interactive, journal};

/// Medicine label OCR - Extract structured fields from label transcripts
#[derive(Parser)]
#[command(name = "medlabel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract fields from a single transcript
    Extract(extract::ExtractArgs),

    /// Extract fields from multiple transcript files
    Batch(batch::BatchArgs),

    /// Paste transcripts one at a time
    Interactive(interactive::InteractiveArgs),

    /// Inspect the result journal
    Journal(journal::JournalArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // Logs go to stderr so stdout stays machine-readable.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Extract(args) => extract::run(args, config_path).await,
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Interactive(args) => interactive::run(args, config_path).await,
        Commands::Journal(args) => journal::run(args, config_path).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
