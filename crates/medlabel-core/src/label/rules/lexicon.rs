//! Compiled reference data shared by the resolvers.

use std::collections::HashSet;

use crate::error::ExtractionError;
use crate::models::reference::ReferenceData;

/// Immutable, case-folded view of [`ReferenceData`].
///
/// Manufacturers and stopwords are compared uppercase; forms and markers
/// lowercase. List order is preserved and duplicates are dropped.
#[derive(Debug, Clone)]
pub struct Lexicon {
    manufacturers: Vec<String>,
    manufacturer_set: HashSet<String>,
    stopwords: HashSet<String>,
    forms: Vec<String>,
    markers: Vec<String>,
}

impl Lexicon {
    pub fn new(reference: &ReferenceData) -> Result<Self, ExtractionError> {
        let manufacturers = fold_list("manufacturers", &reference.manufacturers, str::to_uppercase)?;
        let stopwords = fold_list("stopwords", &reference.stopwords, str::to_uppercase)?;
        let forms = fold_list("forms", &reference.forms, str::to_lowercase)?;
        let markers = fold_list("ingredient_markers", &reference.ingredient_markers, str::to_lowercase)?;

        Ok(Self {
            manufacturer_set: manufacturers.iter().cloned().collect(),
            manufacturers,
            stopwords: stopwords.into_iter().collect(),
            forms,
            markers,
        })
    }

    /// Registered manufacturers, uppercase, in priority order.
    pub fn manufacturers(&self) -> &[String] {
        &self.manufacturers
    }

    /// Form words, lowercase, in lexicon order.
    pub fn forms(&self) -> &[String] {
        &self.forms
    }

    /// Ingredient marker substrings, lowercase.
    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    pub fn is_manufacturer(&self, candidate: &str) -> bool {
        self.manufacturer_set.contains(&candidate.trim().to_uppercase())
    }

    pub fn is_stopword(&self, candidate: &str) -> bool {
        self.stopwords.contains(&candidate.trim().to_uppercase())
    }

    /// Whether a candidate may never be reported as a name or ingredient.
    pub fn is_excluded(&self, candidate: &str) -> bool {
        self.is_manufacturer(candidate) || self.is_stopword(candidate)
    }

    /// Whether a word contains one of the form lexicon entries.
    pub fn matches_form(&self, word: &str) -> bool {
        let word = word.to_lowercase();
        self.forms.iter().any(|form| word.contains(form.as_str()))
    }

    /// Whether a phrase contains one of the ingredient markers.
    pub fn has_marker(&self, phrase: &str) -> bool {
        let phrase = phrase.to_lowercase();
        self.markers.iter().any(|marker| phrase.contains(marker.as_str()))
    }
}

fn fold_list(
    list: &str,
    entries: &[String],
    fold: fn(&str) -> String,
) -> Result<Vec<String>, ExtractionError> {
    let mut seen = HashSet::new();
    let mut folded = Vec::with_capacity(entries.len());

    for entry in entries {
        let entry = entry.trim();
        if entry.is_empty() {
            return Err(ExtractionError::InvalidReference {
                list: list.to_string(),
                reason: "empty entry".to_string(),
            });
        }
        let value = fold(entry);
        if seen.insert(value.clone()) {
            folded.push(value);
        }
    }

    Ok(folded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_membership() {
        let lexicon = Lexicon::new(&ReferenceData::default()).unwrap();

        assert!(lexicon.is_manufacturer("Biopharm"));
        assert!(lexicon.is_manufacturer(" saidal "));
        assert!(!lexicon.is_manufacturer("BIOFENAC"));
        assert!(lexicon.is_stopword("vignette"));
        assert!(lexicon.is_excluded("Lot"));
        assert!(!lexicon.is_excluded("PARACETAMOL"));
    }

    #[test]
    fn test_form_and_marker_containment() {
        let lexicon = Lexicon::new(&ReferenceData::default()).unwrap();

        assert!(lexicon.matches_form("Comprimée"));
        assert!(lexicon.matches_form("GÉLULES"));
        assert!(!lexicon.matches_form("Opht"));
        assert!(lexicon.has_marker("Diclofénac Sodique"));
        assert!(!lexicon.has_marker("Paracétamol"));
    }

    #[test]
    fn test_order_kept_and_duplicates_dropped() {
        let reference = ReferenceData {
            manufacturers: vec!["saidal".into(), "Hikma".into(), "SAIDAL".into()],
            ..ReferenceData::default()
        };
        let lexicon = Lexicon::new(&reference).unwrap();

        assert_eq!(lexicon.manufacturers(), ["SAIDAL", "HIKMA"]);
    }

    #[test]
    fn test_empty_entry_rejected() {
        let reference = ReferenceData::default().with_form("  ");
        let err = Lexicon::new(&reference).unwrap_err();

        assert!(matches!(err, ExtractionError::InvalidReference { ref list, .. } if list == "forms"));
    }
}
