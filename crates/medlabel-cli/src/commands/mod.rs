//! CLI subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod extract;
pub mod interactive;
pub mod journal;
pub mod render;

use std::path::{Path, PathBuf};

use console::style;
use tracing::debug;

use medlabel_core::models::config::MedlabelConfig;
use medlabel_core::{AppendOutcome, Journal, RuleLabelParser};

/// Per-user configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("medlabel")
        .join("config.json")
}

/// The `--config` path if given, else the per-user file.
pub fn config_file(config_path: Option<&str>) -> PathBuf {
    config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

/// Load the configuration.
///
/// An explicit `--config` file must exist. The per-user file is optional and
/// defaults apply when it is absent.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<MedlabelConfig> {
    if let Some(path) = config_path {
        let path = Path::new(path);
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        return Ok(MedlabelConfig::from_file(path)?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Loading configuration from {}", path.display());
        Ok(MedlabelConfig::from_file(&path)?)
    } else {
        Ok(MedlabelConfig::default())
    }
}

pub fn build_parser(config: &MedlabelConfig) -> anyhow::Result<RuleLabelParser> {
    RuleLabelParser::from_config(config)
        .map_err(|e| anyhow::anyhow!("Invalid reference data: {}", e))
}

/// Journal from the configuration, with an optional path override.
pub fn open_journal(config: &MedlabelConfig, path: Option<&Path>) -> Journal {
    match path {
        Some(path) => Journal::new(path, config.journal.pretty),
        None => Journal::from_config(&config.journal),
    }
}

/// Report a journal append on stderr.
pub fn report_saved(journal: &Journal, outcome: &AppendOutcome) {
    if outcome.recovered {
        eprintln!(
            "{} Previous journal at {} was unreadable and has been replaced",
            style("⚠").yellow(),
            journal.path().display()
        );
    }
    eprintln!(
        "{} Saved to {} ({} entries)",
        style("✓").green(),
        journal.path().display(),
        outcome.total_entries
    );
}
