//! Manufacturer detection against the registry.

use std::sync::Arc;

use regex::Regex;
use tracing::trace;

use super::{Lexicon, NormalizedText};
use crate::error::ExtractionError;

/// Detects the first registered manufacturer present on a label.
///
/// Each registry entry is compiled into one pattern covering the accepted
/// shapes: the bare name as a whole word, the name prefixed or suffixed by
/// "VIGNETTE", and the name followed by further uppercase text. Entries are
/// tried in registry order and detection stops at the first hit.
#[derive(Debug, Clone)]
pub struct ManufacturerDetector {
    lexicon: Arc<Lexicon>,
    shapes: Vec<(String, Regex)>,
}

impl ManufacturerDetector {
    pub fn new(lexicon: Arc<Lexicon>) -> Result<Self, ExtractionError> {
        let shapes = lexicon
            .manufacturers()
            .iter()
            .map(|name| Ok((name.clone(), build_shape(name)?)))
            .collect::<Result<Vec<_>, ExtractionError>>()?;

        Ok(Self { lexicon, shapes })
    }

    /// Return the first matching manufacturer, uppercase.
    pub fn detect(&self, text: &NormalizedText) -> Option<String> {
        let upper = text.upper();
        self.shapes.iter().find_map(|(name, shape)| {
            shape.is_match(upper).then(|| {
                trace!(manufacturer = %name, "manufacturer matched");
                name.clone()
            })
        })
    }

    /// Whether `candidate` is a registered manufacturer (case-insensitive).
    pub fn is_registered(&self, candidate: &str) -> bool {
        self.lexicon.is_manufacturer(candidate)
    }
}

fn build_shape(name: &str) -> Result<Regex, ExtractionError> {
    let n = regex::escape(name);
    let pattern = format!(
        r"\b{n}\b|VIGNETTE[-\s]*{n}|{n}[-\s]*VIGNETTE|\b{n}[-\s]+[A-Z]"
    );
    Regex::new(&pattern).map_err(|source| ExtractionError::Pattern {
        list: "manufacturers".to_string(),
        source,
    })
}
