//! Medicine label field extraction module.

mod parser;
pub mod rules;

pub use parser::RuleLabelParser;

use crate::models::label::ExtractionResult;

/// Trait for label parsers.
///
/// Parsing never fails: a transcript with nothing recognizable yields an
/// empty result.
pub trait LabelParser {
    /// Parse label fields from a raw OCR transcript.
    fn parse(&self, text: &str) -> ExtractionResult;
}
