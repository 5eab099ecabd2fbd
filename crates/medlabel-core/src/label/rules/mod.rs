//! Rule-based field extractors for Algerian medicine labels.

pub mod normalize;
pub mod lexicon;
pub mod manufacturer;
pub mod name;
pub mod ingredient;
pub mod dosage;
pub mod form;
pub mod lot;
pub mod dates;
pub mod price;
pub mod registration;
pub mod patterns;

pub use normalize::{normalize, NormalizedText};
pub use lexicon::Lexicon;
pub use manufacturer::ManufacturerDetector;
pub use name::MedicationNameResolver;
pub use ingredient::ActiveIngredientResolver;
pub use dosage::DosageExtractor;
pub use form::FormExtractor;
pub use lot::LotExtractor;
pub use dates::{DateExtractor, DateKind};
pub use price::PriceExtractor;
pub use registration::RegistrationExtractor;

use regex::Regex;
use tracing::trace;

use crate::models::label::Field;

/// Trait for extractors that only depend on the label text.
pub trait FieldExtractor {
    /// The field this extractor fills.
    fn field(&self) -> Field;

    /// Extract the field's values, in discovery order.
    fn extract(&self, text: &NormalizedText) -> Vec<String>;
}

/// A named step of an ordered extraction cascade.
pub struct Strategy<F> {
    pub name: &'static str,
    pub run: F,
}

/// Apply `strategies` in order and return the first success.
///
/// Later strategies are not evaluated once one succeeds.
pub fn run_cascade<F, T>(
    field: Field,
    strategies: &[Strategy<F>],
    mut apply: impl FnMut(&F) -> Option<T>,
) -> Option<T> {
    for strategy in strategies {
        if let Some(value) = apply(&strategy.run) {
            trace!(field = field.key(), strategy = strategy.name, "strategy matched");
            return Some(value);
        }
    }
    None
}

/// Capture group 1 of the first pattern that matches `text`.
pub fn first_capture(field: Field, patterns: &[Regex], text: &str) -> Option<String> {
    patterns.iter().enumerate().find_map(|(index, pattern)| {
        let value = pattern.captures(text)?.get(1)?.as_str().to_string();
        trace!(field = field.key(), pattern = index, "pattern matched");
        Some(value)
    })
}

/// Collapse internal whitespace runs to single spaces and trim.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
