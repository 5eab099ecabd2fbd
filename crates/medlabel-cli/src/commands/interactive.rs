//! Interactive command - paste label transcripts one at a time.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::{debug, warn};

use medlabel_core::{Journal, LabelParser, RuleLabelParser};

use super::render::format_text;
use super::{build_parser, load_config, open_journal};

const QUIT_COMMANDS: [&str; 3] = ["quit", "exit", "q"];

/// Arguments for the interactive command.
#[derive(Args)]
pub struct InteractiveArgs {
    /// Save every result without asking
    #[arg(long, conflicts_with = "no_save")]
    auto_save: bool,

    /// Never save results
    #[arg(long)]
    no_save: bool,

    /// Journal file (default: from configuration)
    #[arg(long)]
    journal: Option<PathBuf>,
}

/// Whether results are written to the journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavePolicy {
    Ask,
    Always,
    Never,
}

/// One block of input from the user.
#[derive(Debug, PartialEq, Eq)]
enum Submission {
    Text(String),
    Quit,
    Eof,
}

/// Counters reported when the session ends.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub processed: usize,
    pub saved: usize,
}

/// A read-parse-print loop over any line source.
pub struct Session<'a, R, W> {
    parser: &'a RuleLabelParser,
    journal: &'a Journal,
    policy: SavePolicy,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(
        parser: &'a RuleLabelParser,
        journal: &'a Journal,
        policy: SavePolicy,
        input: R,
        output: W,
    ) -> Self {
        Self {
            parser,
            journal,
            policy,
            input,
            output,
        }
    }

    pub fn run(&mut self) -> anyhow::Result<SessionStats> {
        let mut stats = SessionStats::default();

        writeln!(
            self.output,
            "Paste a label transcript and finish with an empty line. Type 'quit' to leave."
        )?;

        loop {
            write!(self.output, "\n> ")?;
            self.output.flush()?;

            let text = match self.read_submission()? {
                Submission::Text(text) => text,
                Submission::Quit | Submission::Eof => break,
            };

            let result = self.parser.parse(&text);
            stats.processed += 1;

            writeln!(self.output)?;
            write!(self.output, "{}", format_text(&result))?;
            writeln!(self.output, "Total values extracted: {}", result.total_count())?;

            if self.should_save()? {
                match self.journal.append(&result) {
                    Ok(outcome) => {
                        if outcome.recovered {
                            warn!("Replaced unreadable journal at {}", self.journal.path().display());
                        }
                        writeln!(
                            self.output,
                            "{} Saved to {} ({} entries)",
                            style("✓").green(),
                            self.journal.path().display(),
                            outcome.total_entries
                        )?;
                        stats.saved += 1;
                    }
                    Err(e) => {
                        warn!("Failed to save to {}: {}", self.journal.path().display(), e);
                        writeln!(self.output, "{} Not saved: {}", style("⚠").yellow(), e)?;
                    }
                }
            }
        }

        debug!(processed = stats.processed, saved = stats.saved, "Interactive session ended");
        Ok(stats)
    }

    /// Collect lines until a blank line. A quit command is only recognized
    /// on the first line of a submission.
    fn read_submission(&mut self) -> io::Result<Submission> {
        let mut lines: Vec<String> = Vec::new();

        loop {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(if lines.is_empty() {
                    Submission::Eof
                } else {
                    Submission::Text(lines.join("\n"))
                });
            }

            let trimmed = line.trim();
            if lines.is_empty() {
                if QUIT_COMMANDS.contains(&trimmed.to_lowercase().as_str()) {
                    return Ok(Submission::Quit);
                }
                if trimmed.is_empty() {
                    continue;
                }
            } else if trimmed.is_empty() {
                return Ok(Submission::Text(lines.join("\n")));
            }

            lines.push(line.trim_end_matches(['\r', '\n']).to_string());
        }
    }

    fn should_save(&mut self) -> io::Result<bool> {
        match self.policy {
            SavePolicy::Always => Ok(true),
            SavePolicy::Never => Ok(false),
            SavePolicy::Ask => {
                write!(self.output, "Save to journal? [y/N] ")?;
                self.output.flush()?;

                let mut answer = String::new();
                self.input.read_line(&mut answer)?;
                Ok(matches!(
                    answer.trim().to_lowercase().as_str(),
                    "y" | "yes" | "o" | "oui"
                ))
            }
        }
    }
}

pub async fn run(args: InteractiveArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let parser = build_parser(&config)?;
    let journal = open_journal(&config, args.journal.as_deref());

    let policy = if args.auto_save {
        SavePolicy::Always
    } else if args.no_save {
        SavePolicy::Never
    } else {
        SavePolicy::Ask
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(&parser, &journal, policy, stdin.lock(), stdout.lock());
    let stats = session.run()?;

    eprintln!(
        "{} {} labels processed, {} saved",
        style("ℹ").blue(),
        stats.processed,
        stats.saved
    );

    Ok(())
}
