use super::patterns::LOT_PATTERNS;
use super::{collapse_whitespace, first_capture, FieldExtractor, NormalizedText};
use crate::models::label::Field;

/// Lot number after a "LOT", "N° LOT" or "Lot n°" label.
#[derive(Debug, Clone, Copy, Default)]
pub struct LotExtractor;

impl FieldExtractor for LotExtractor {
    fn field(&self) -> Field {
        Field::LotNumber
    }

    fn extract(&self, text: &NormalizedText) -> Vec<String> {
        first_capture(Field::LotNumber, &LOT_PATTERNS, text.as_str())
            .map(|lot| collapse_whitespace(&lot))
            .filter(|lot| !lot.is_empty())
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Vec<String> {
        LotExtractor.extract(&NormalizedText::new(text))
    }

    #[test]
    fn test_label_variants() {
        assert_eq!(extract("LOT 77A BIOCARE"), vec!["77A"]);
        assert_eq!(extract("Comprimés LOT: 12345 EXP: 12-2025"), vec!["12345"]);
        assert_eq!(extract("N° LOT: B2231 - FAB"), vec!["B2231"]);
    }

    #[test]
    fn test_slash_and_split_lots() {
        assert_eq!(extract("- LOT: 77/23 - FAB: 12/26"), vec!["77/23"]);
        assert_eq!(extract("Date Fab: 12/2024 - Lot n°: F10 0162"), vec!["F10 0162"]);
    }

    #[test]
    fn test_word_boundary() {
        assert!(extract("CLOTRIMAZOLE 1% crème").is_empty());
    }

    #[test]
    fn test_missing() {
        assert!(extract("AMOXICILLIN 500mg").is_empty());
    }
}
