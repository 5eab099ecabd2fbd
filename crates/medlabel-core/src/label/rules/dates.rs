use regex::Regex;

use super::patterns::{EXPIRY_DATE_PATTERNS, MANUFACTURE_DATE_PATTERNS};
use super::{first_capture, FieldExtractor, NormalizedText};
use crate::models::label::Field;

/// Which printed date an extractor looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateKind {
    /// "FAB", "Fabrication", "FABRICATO"
    Manufacture,
    /// "EXP", "PER", "PERIODO", "Péremption"
    Expiry,
}

impl DateKind {
    fn patterns(&self) -> &'static [Regex] {
        match self {
            DateKind::Manufacture => &MANUFACTURE_DATE_PATTERNS,
            DateKind::Expiry => &EXPIRY_DATE_PATTERNS,
        }
    }
}

/// Extracts a date token following its label keyword.
///
/// The token is kept verbatim (`12/26`, `04-2026`); no calendar
/// validation is done.
#[derive(Debug, Clone, Copy)]
pub struct DateExtractor {
    kind: DateKind,
}

impl DateExtractor {
    pub fn new(kind: DateKind) -> Self {
        Self { kind }
    }

    pub fn manufacture() -> Self {
        Self::new(DateKind::Manufacture)
    }

    pub fn expiry() -> Self {
        Self::new(DateKind::Expiry)
    }

    pub fn kind(&self) -> DateKind {
        self.kind
    }
}

impl FieldExtractor for DateExtractor {
    fn field(&self) -> Field {
        match self.kind {
            DateKind::Manufacture => Field::ManufactureDate,
            DateKind::Expiry => Field::ExpiryDate,
        }
    }

    fn extract(&self, text: &NormalizedText) -> Vec<String> {
        first_capture(self.field(), self.kind.patterns(), text.as_str())
            .into_iter()
            .collect()
    }
}
