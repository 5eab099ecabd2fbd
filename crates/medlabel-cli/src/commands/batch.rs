//! Batch processing command for multiple transcript files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use futures_util::stream::{self, StreamExt};
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use medlabel_core::{ExtractionResult, Field, LabelParser, RuleLabelParser};

use super::render::{joined, render, OutputFormat};
use super::{build_parser, load_config, open_journal, report_saved};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern of transcript files
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

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Append every successful result to the journal
    #[arg(long)]
    save: bool,

    /// Journal file (default: from configuration)
    #[arg(long)]
    journal: Option<PathBuf>,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    result: Option<ExtractionResult>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
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

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let parser = Arc::new(build_parser(&config)?);
    let jobs = args.jobs.max(1);

    let mut outcomes = stream::iter(files)
        .map(|path| {
            let parser = Arc::clone(&parser);
            async move {
                let task_path = path.clone();
                match tokio::task::spawn_blocking(move || process_file(&task_path, &parser)).await {
                    Ok(result) => result,
                    Err(e) => ProcessResult::failed(path, e.to_string(), 0),
                }
            }
        })
        .buffered(jobs);

    let mut results = Vec::new();
    while let Some(outcome) = outcomes.next().await {
        progress.inc(1);

        if let Some(message) = &outcome.error {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", outcome.path.display(), message);
            } else {
                error!("Failed to process {}: {}", outcome.path.display(), message);
                progress.abandon();
                anyhow::bail!("Processing failed for {}: {}", outcome.path.display(), message);
            }
        }
        results.push(outcome);
    }

    progress.finish_and_clear();

    let successful: Vec<_> = results.iter().filter(|r| r.result.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(output_dir) = &args.output_dir {
        for outcome in &successful {
            if let Some(result) = &outcome.result {
                let output_path = output_path(output_dir, &outcome.path, args.format);
                fs::write(&output_path, render(result, args.format)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    } else {
        for outcome in &successful {
            if let Some(result) = &outcome.result {
                println!(
                    "  {} {} ({} values)",
                    style("•").dim(),
                    outcome.path.display(),
                    result.total_count()
                );
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
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    if args.save && !successful.is_empty() {
        let journal = open_journal(&config, args.journal.as_deref());
        let outcome = journal.append_all(successful.iter().filter_map(|r| r.result.as_ref()))?;
        report_saved(&journal, &outcome);
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for outcome in &failed {
            println!(
                "  - {}: {}",
                outcome.path.display(),
                outcome.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

impl ProcessResult {
    fn failed(path: PathBuf, error: String, processing_time_ms: u64) -> Self {
        Self {
            path,
            result: None,
            error: Some(error),
            processing_time_ms,
        }
    }
}

fn process_file(path: &Path, parser: &RuleLabelParser) -> ProcessResult {
    let start = Instant::now();

    match fs::read_to_string(path) {
        Ok(text) => {
            let result = parser.parse(&text);
            ProcessResult {
                path: path.to_path_buf(),
                result: Some(result),
                error: None,
                processing_time_ms: start.elapsed().as_millis() as u64,
            }
        }
        Err(e) => ProcessResult::failed(
            path.to_path_buf(),
            e.to_string(),
            start.elapsed().as_millis() as u64,
        ),
    }
}

fn output_path(output_dir: &Path, input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("label");
    output_dir.join(format!("{}.{}", stem, format.extension()))
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["filename", "status"];
    header.extend(Field::ALL.iter().map(|f| f.key()));
    header.extend(["total_values", "processing_time_ms", "error"]);
    wtr.write_record(&header)?;

    for outcome in results {
        let filename = outcome
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();

        let mut record = vec![filename];
        match &outcome.result {
            Some(result) => {
                record.push("success".to_string());
                record.extend(Field::ALL.iter().map(|f| joined(result, *f)));
                record.push(result.total_count().to_string());
            }
            None => {
                record.push("error".to_string());
                record.extend(Field::ALL.iter().map(|_| String::new()));
                record.push(String::new());
            }
        }
        record.push(outcome.processing_time_ms.to_string());
        record.push(outcome.error.clone().unwrap_or_default());

        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_uses_stem_and_format() {
        let path = output_path(Path::new("out"), Path::new("labels/biofenac.txt"), OutputFormat::Csv);
        assert_eq!(path, PathBuf::from("out/biofenac.csv"));
    }

    #[test]
    fn test_summary_rows() {
        let dir = tempfile::tempdir().unwrap();
        let summary = dir.path().join("summary.csv");

        let mut result = ExtractionResult::new();
        result.push(Field::LotNumber, "605");
        let results = vec![
            ProcessResult {
                path: PathBuf::from("a.txt"),
                result: Some(result),
                error: None,
                processing_time_ms: 1,
            },
            ProcessResult::failed(PathBuf::from("b.txt"), "unreadable".to_string(), 0),
        ];

        write_summary(&summary, &results).unwrap();
        let content = fs::read_to_string(&summary).unwrap();
        let lines: Vec<_> = content.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("filename,status,manufacturer,"));
        assert!(lines[1].starts_with("a.txt,success,"));
        assert!(lines[1].contains(",605,"));
        assert!(lines[2].starts_with("b.txt,error,"));
        assert!(lines[2].ends_with(",unreadable"));
    }
}
