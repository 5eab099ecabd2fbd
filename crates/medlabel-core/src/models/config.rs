//! Configuration structures for the label extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::reference::ReferenceData;

/// Main configuration for medlabel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MedlabelConfig {
    /// Manufacturer registry and lexicons.
    pub reference: ReferenceData,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Result journal configuration.
    pub journal: JournalConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Currency unit appended to extracted prices.
    pub currency_unit: String,

    /// Drop leading/trailing stopword and manufacturer tokens from
    /// medication name candidates before accepting them.
    pub trim_stopword_tokens: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            currency_unit: "DA".to_string(),
            trim_stopword_tokens: true,
        }
    }
}

/// Result journal configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    /// Journal file path.
    pub path: PathBuf,

    /// Write indented JSON.
    pub pretty: bool,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("medicaments.json"),
            pretty: true,
        }
    }
}

impl MedlabelConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
