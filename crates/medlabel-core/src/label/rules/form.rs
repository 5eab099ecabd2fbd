use std::sync::Arc;

use regex::Regex;
use tracing::trace;

use super::patterns::FORM_QUANTITY_PATTERNS;
use super::{FieldExtractor, Lexicon, NormalizedText};
use crate::error::ExtractionError;
use crate::models::label::Field;

/// Extracts the pharmaceutical form, with its unit count when printed.
///
/// Quantity patterns ("B/20 gélules", "boîte de 30 comprimés") yield
/// `"<count> <form>"`; otherwise the first lexicon word found alone is used.
#[derive(Debug, Clone)]
pub struct FormExtractor {
    lexicon: Arc<Lexicon>,
    bare_forms: Vec<Regex>,
}

impl FormExtractor {
    pub fn new(lexicon: Arc<Lexicon>) -> Result<Self, ExtractionError> {
        let bare_forms = lexicon
            .forms()
            .iter()
            .map(|form| {
                Regex::new(&format!(r"(?i)\b{}\b", regex::escape(form))).map_err(|source| {
                    ExtractionError::Pattern {
                        list: "forms".to_string(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { lexicon, bare_forms })
    }

    fn with_quantity(&self, text: &str) -> Option<String> {
        FORM_QUANTITY_PATTERNS
            .iter()
            .enumerate()
            .find_map(|(index, pattern)| {
                let caps = pattern.captures(text)?;
                let form = caps.name("form")?.as_str();
                if !self.lexicon.matches_form(form) {
                    return None;
                }
                trace!(pattern = index, "form quantity pattern matched");
                Some(format!("{} {}", &caps["count"], form.to_lowercase()))
            })
    }

    fn bare(&self, text: &str) -> Option<String> {
        self.bare_forms
            .iter()
            .find_map(|pattern| pattern.find(text))
            .map(|m| m.as_str().to_lowercase())
    }
}

impl FieldExtractor for FormExtractor {
    fn field(&self) -> Field {
        Field::PharmaceuticalForm
    }

    fn extract(&self, text: &NormalizedText) -> Vec<String> {
        self.with_quantity(text.as_str())
            .or_else(|| self.bare(text.as_str()))
            .into_iter()
            .collect()
    }
}
