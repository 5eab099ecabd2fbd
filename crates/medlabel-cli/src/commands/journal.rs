//! Journal command - inspect saved extraction results.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use medlabel_core::{Field, JournalEntry};

use super::render::{format_csv, format_text, OutputFormat};
use super::{load_config, open_journal};

/// Arguments for the journal command.
#[derive(Args)]
pub struct JournalArgs {
    /// Journal file (default: from configuration)
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: JournalCommand,
}

#[derive(Subcommand)]
enum JournalCommand {
    /// Print saved entries
    Show {
        /// Only show the most recent N entries
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Entry count and how often each field was found
    Stats,

    /// Show journal file path
    Path,
}

pub async fn run(args: JournalArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let journal = open_journal(&config, args.file.as_deref());

    match args.command {
        JournalCommand::Show { limit, format } => {
            let entries = journal.load()?;
            let skip = limit.map_or(0, |n| entries.len().saturating_sub(n));
            show_entries(&entries[skip..], format)
        }
        JournalCommand::Stats => {
            let entries = journal.load()?;
            print!("{}", format_stats(&entries));
            Ok(())
        }
        JournalCommand::Path => {
            println!("Journal file: {}", journal.path().display());
            if journal.path().exists() {
                println!("Status: {}", style("exists").green());
            } else {
                println!("Status: {}", style("not created").yellow());
            }
            Ok(())
        }
    }
}

fn show_entries(entries: &[JournalEntry], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(entries)?),
        OutputFormat::Csv => {
            let results: Vec<_> = entries.iter().map(|e| e.data.clone()).collect();
            print!("{}", format_csv(&results)?);
        }
        OutputFormat::Text => {
            if entries.is_empty() {
                println!("{} Journal is empty", style("ℹ").blue());
            }
            for entry in entries {
                println!(
                    "{}",
                    style(entry.timestamp.format("%Y-%m-%d %H:%M:%S UTC")).bold()
                );
                println!("{}", format_text(&entry.data));
            }
        }
    }
    Ok(())
}

fn format_stats(entries: &[JournalEntry]) -> String {
    let mut output = format!("Entries: {}\n", entries.len());
    if let (Some(first), Some(last)) = (entries.first(), entries.last()) {
        output.push_str(&format!(
            "Period: {} to {}\n",
            first.timestamp.format("%Y-%m-%d"),
            last.timestamp.format("%Y-%m-%d")
        ));
    }

    let width = Field::ALL.iter().map(|f| f.label().len()).max().unwrap_or(0);
    for field in Field::ALL {
        let found = entries
            .iter()
            .filter(|e| !e.data.get(field).is_empty())
            .count();
        output.push_str(&format!(
            "{:<width$} : {}/{}\n",
            field.label(),
            found,
            entries.len(),
            width = width
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use medlabel_core::ExtractionResult;

    #[test]
    fn test_stats_counts_filled_fields() {
        let mut first = ExtractionResult::new();
        first.push(Field::LotNumber, "77A");
        first.push(Field::Price, "62.5 DA");
        let mut second = ExtractionResult::new();
        second.push(Field::LotNumber, "605");

        let entries = vec![JournalEntry::new(first), JournalEntry::new(second)];
        let stats = format_stats(&entries);

        assert!(stats.starts_with("Entries: 2\n"));
        assert!(stats.contains("Lot number"));
        let lot_line = stats.lines().find(|l| l.starts_with("Lot number")).unwrap();
        assert!(lot_line.ends_with(": 2/2"));
        let price_line = stats.lines().find(|l| l.starts_with("Price")).unwrap();
        assert!(price_line.ends_with(": 1/2"));
    }

    #[test]
    fn test_stats_empty_journal() {
        let stats = format_stats(&[]);
        assert!(stats.starts_with("Entries: 0\n"));
        assert!(!stats.contains("Period"));
    }
}
