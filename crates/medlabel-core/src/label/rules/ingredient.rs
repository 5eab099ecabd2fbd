//! Active ingredient resolution.

use std::sync::Arc;

use regex::Regex;

use super::patterns::{INGREDIENT_AFTER_DOSAGE, INGREDIENT_BETWEEN_DASHES, INGREDIENT_CAPITALIZED};
use super::{run_cascade, Lexicon, NormalizedText, Strategy};
use crate::error::ExtractionError;
use crate::models::label::Field;

type IngredientStrategy =
    fn(&ActiveIngredientResolver, &str, Option<&str>) -> Option<Vec<String>>;

/// Resolves the generic substance, kept distinct from the product name.
#[derive(Debug, Clone)]
pub struct ActiveIngredientResolver {
    lexicon: Arc<Lexicon>,
    /// Dosage, dash, then a lowercase phrase ending in a marker.
    marker_after_dosage: Regex,
}

impl ActiveIngredientResolver {
    const STRATEGIES: [Strategy<IngredientStrategy>; 4] = [
        Strategy { name: "between_dashes", run: Self::between_dashes },
        Strategy { name: "marker_after_dosage", run: Self::marker_after_dosage },
        Strategy { name: "uppercase_after_dosage", run: Self::uppercase_after_dosage },
        Strategy { name: "marker_word", run: Self::marker_word },
    ];

    pub fn new(lexicon: Arc<Lexicon>) -> Result<Self, ExtractionError> {
        if lexicon.markers().is_empty() {
            return Err(ExtractionError::InvalidReference {
                list: "ingredient_markers".to_string(),
                reason: "at least one marker is required".to_string(),
            });
        }

        let markers = lexicon
            .markers()
            .iter()
            .map(|m| regex::escape(m))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(
            r"(?i)\d+(?:\.\d+)?\s*(?:mg|g|%|ml)\s*[–-]\s*([a-zàâäçéèêëîïôöùûü\s]+(?:{markers}))"
        );
        let marker_after_dosage =
            Regex::new(&pattern).map_err(|source| ExtractionError::Pattern {
                list: "ingredient_markers".to_string(),
                source,
            })?;

        Ok(Self {
            lexicon,
            marker_after_dosage,
        })
    }

    /// Resolve active ingredients. Empty when no strategy succeeds.
    pub fn resolve(&self, text: &NormalizedText, medication_name: Option<&str>) -> Vec<String> {
        run_cascade(Field::ActiveIngredient, &Self::STRATEGIES, |run| {
            run(self, text.as_str(), medication_name)
        })
        .unwrap_or_default()
    }

    fn between_dashes(&self, text: &str, name: Option<&str>) -> Option<Vec<String>> {
        let mut found: Vec<String> = Vec::new();
        for caps in INGREDIENT_BETWEEN_DASHES.captures_iter(text) {
            let Some(candidate) = caps.get(1).map(|m| m.as_str().trim()) else {
                continue;
            };
            if self.is_acceptable(candidate, name) && !found.iter().any(|f| f == candidate) {
                found.push(candidate.to_string());
            }
        }
        (!found.is_empty()).then_some(found)
    }

    fn marker_after_dosage(&self, text: &str, name: Option<&str>) -> Option<Vec<String>> {
        let candidate = self.marker_after_dosage.captures(text)?.get(1)?.as_str().trim();
        self.single(candidate, name)
    }

    fn uppercase_after_dosage(&self, text: &str, name: Option<&str>) -> Option<Vec<String>> {
        let candidate = INGREDIENT_AFTER_DOSAGE.captures(text)?.get(1)?.as_str();
        self.single(candidate, name)
    }

    fn marker_word(&self, text: &str, name: Option<&str>) -> Option<Vec<String>> {
        INGREDIENT_CAPITALIZED
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .find(|candidate| self.lexicon.has_marker(candidate))
            .and_then(|candidate| self.single(candidate, name))
    }

    fn single(&self, candidate: &str, name: Option<&str>) -> Option<Vec<String>> {
        self.is_acceptable(candidate, name)
            .then(|| vec![candidate.to_string()])
    }

    /// Non-empty, not excluded, and different from the medication name.
    fn is_acceptable(&self, candidate: &str, name: Option<&str>) -> bool {
        if candidate.is_empty() || self.lexicon.is_excluded(candidate) {
            return false;
        }
        match name {
            Some(name) if !name.is_empty() => candidate.to_lowercase() != name.to_lowercase(),
            _ => true,
        }
    }
}
