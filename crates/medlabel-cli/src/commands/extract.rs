//! Extract command - parse a single label transcript.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use medlabel_core::LabelParser;

use super::render::{render, OutputFormat};
use super::{build_parser, load_config, open_journal, report_saved};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Transcript file, or "-" to read standard input
    #[arg(default_value = "-")]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Append the result to the journal
    #[arg(long)]
    save: bool,

    /// Journal file (default: from configuration)
    #[arg(long)]
    journal: Option<PathBuf>,

    /// Print the total number of extracted values
    #[arg(long)]
    count: bool,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let text = read_transcript(&args.input)?;
    info!("Extracting fields from {}", source_name(&args.input));

    let parser = build_parser(&config)?;
    let result = parser.parse(&text);

    let output = render(&result, args.format)?;
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output.trim_end());
    }

    if args.count {
        eprintln!(
            "{} Total values extracted: {}",
            style("ℹ").blue(),
            result.total_count()
        );
    }

    if args.save {
        let journal = open_journal(&config, args.journal.as_deref());
        let outcome = journal.append(&result)?;
        report_saved(&journal, &outcome);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn read_transcript(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    let path = Path::new(input);
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }
    Ok(fs::read_to_string(path)?)
}

fn source_name(input: &str) -> &str {
    if input == "-" { "standard input" } else { input }
}
