//! Append-only JSON journal of extraction results.
//!
//! The journal is a single JSON array of `{ "timestamp", "data" }` objects.
//! Appending tolerates a damaged file: a lone object is wrapped into a list,
//! and anything unreadable is discarded so the new entry is still written.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{JournalError, MedlabelError, Result};
use crate::models::config::JournalConfig;
use crate::models::label::ExtractionResult;

/// One timestamped extraction result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub timestamp: DateTime<Utc>,
    pub data: ExtractionResult,
}

impl JournalEntry {
    pub fn new(data: ExtractionResult) -> Self {
        Self {
            timestamp: Utc::now(),
            data,
        }
    }
}

/// What an append did to the journal file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendOutcome {
    /// Entries in the journal after the append.
    pub total_entries: usize,
    /// The previous file was unreadable and has been replaced.
    pub recovered: bool,
}

/// JSON journal stored at a fixed path.
#[derive(Debug, Clone)]
pub struct Journal {
    path: PathBuf,
    pretty: bool,
}

impl Journal {
    pub fn new(path: impl Into<PathBuf>, pretty: bool) -> Self {
        Self {
            path: path.into(),
            pretty,
        }
    }

    pub fn from_config(config: &JournalConfig) -> Self {
        Self::new(config.path.clone(), config.pretty)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all entries. A missing file is an empty journal; a damaged one
    /// is an error.
    pub fn load(&self) -> Result<Vec<JournalEntry>> {
        let Some(bytes) = self.read_existing()? else {
            return Ok(Vec::new());
        };
        let content = String::from_utf8(bytes).map_err(|e| self.corrupted(e))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let value: Value = serde_json::from_str(&content).map_err(|e| self.corrupted(e))?;
        let items = match value {
            Value::Array(items) => items,
            object @ Value::Object(_) => vec![object],
            other => {
                let reason = format!("unexpected top-level {}", kind(&other));
                return Err(self.corrupted(reason).into());
            }
        };

        items
            .into_iter()
            .map(|item| {
                serde_json::from_value(item).map_err(|e| MedlabelError::from(self.corrupted(e)))
            })
            .collect()
    }

    /// Append one result stamped with the current time.
    pub fn append(&self, result: &ExtractionResult) -> Result<AppendOutcome> {
        self.append_entries(vec![JournalEntry::new(result.clone())])
    }

    /// Append several results in one write.
    pub fn append_all<'a, I>(&self, results: I) -> Result<AppendOutcome>
    where
        I: IntoIterator<Item = &'a ExtractionResult>,
    {
        let entries = results
            .into_iter()
            .map(|result| JournalEntry::new(result.clone()))
            .collect();
        self.append_entries(entries)
    }

    /// Append prepared entries.
    pub fn append_entries(&self, entries: Vec<JournalEntry>) -> Result<AppendOutcome> {
        let (mut items, recovered) = self.read_lenient()?;
        for entry in entries {
            items.push(serde_json::to_value(entry)?);
        }

        self.write(&items)?;
        debug!(path = %self.path.display(), entries = items.len(), "Journal written");

        Ok(AppendOutcome {
            total_entries: items.len(),
            recovered,
        })
    }

    /// Existing entries as raw JSON, discarding a damaged file.
    fn read_lenient(&self) -> Result<(Vec<Value>, bool)> {
        let Some(bytes) = self.read_existing()? else {
            return Ok((Vec::new(), false));
        };
        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Journal is not valid UTF-8, starting a new one");
                return Ok((Vec::new(), true));
            }
        };
        if content.trim().is_empty() {
            return Ok((Vec::new(), false));
        }

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Array(items)) => Ok((items, false)),
            Ok(object @ Value::Object(_)) => Ok((vec![object], false)),
            Ok(other) => {
                warn!(
                    path = %self.path.display(),
                    "Journal holds a {} instead of a list, starting a new one",
                    kind(&other)
                );
                Ok((Vec::new(), true))
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Journal is corrupted, starting a new one");
                Ok((Vec::new(), true))
            }
        }
    }

    /// Raw file bytes, or `None` when there is no journal yet.
    fn read_existing(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write through a temporary file in the target directory, then rename.
    fn write(&self, items: &[Value]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let content = if self.pretty {
            serde_json::to_string_pretty(items)?
        } else {
            serde_json::to_string(items)?
        };

        let mut file = NamedTempFile::new_in(&dir)?;
        file.write_all(content.as_bytes())?;
        file.write_all(b"\n")?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| JournalError::Persist {
            path: self.path.display().to_string(),
            source: e.error,
        })?;

        Ok(())
    }

    fn corrupted(&self, reason: impl ToString) -> JournalError {
        JournalError::Corrupted {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
