use tracing::trace;

use super::patterns::DOSAGE_PATTERNS;
use super::{FieldExtractor, NormalizedText};
use crate::models::label::Field;

/// Collects every distinct strength token (`500mg`, `0.267mg/1.336mg`, `5%`).
///
/// Tokens are reported in order of appearance with whitespace removed.
#[derive(Debug, Clone, Copy, Default)]
pub struct DosageExtractor;

impl FieldExtractor for DosageExtractor {
    fn field(&self) -> Field {
        Field::Dosage
    }

    fn extract(&self, text: &NormalizedText) -> Vec<String> {
        let mut hits: Vec<(usize, String)> = DOSAGE_PATTERNS
            .iter()
            .flat_map(|pattern| pattern.find_iter(text.as_str()))
            .map(|m| (m.start(), m.as_str().split_whitespace().collect::<String>()))
            .collect();
        hits.sort_by_key(|(start, _)| *start);

        let mut tokens: Vec<String> = Vec::new();
        for (_, token) in hits {
            if !tokens.contains(&token) {
                tokens.push(token);
            }
        }

        trace!(count = tokens.len(), "dosage tokens");
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Vec<String> {
        DosageExtractor.extract(&NormalizedText::new(text))
    }

    #[test]
    fn test_whitespace_removed() {
        assert_eq!(extract("PREDNICORT 20 mg - prednisolone"), vec!["20mg"]);
    }

    #[test]
    fn test_combined_strength_is_one_token() {
        assert_eq!(extract("STERDEX 0.267mg/1.336mg - Dexaméthasone"), vec!["0.267mg/1.336mg"]);
    }

    #[test]
    fn test_two_strengths_in_order() {
        assert_eq!(extract("0.267mg and 1.336mg"), vec!["0.267mg", "1.336mg"]);
    }

    #[test]
    fn test_order_across_units() {
        assert_eq!(
            extract("sirop 5 ml contient 250mg et 2%"),
            vec!["5ml", "250mg", "2%"]
        );
    }

    #[test]
    fn test_duplicates_suppressed() {
        assert_eq!(extract("500mg AMOXICILLINE 500 mg 1g"), vec!["500mg", "1g"]);
    }

    #[test]
    fn test_micrograms() {
        assert_eq!(extract("100 mcg et 50µg"), vec!["100mcg", "50µg"]);
    }

    #[test]
    fn test_no_unit_no_token() {
        assert!(extract("B/20 gélules LOT 605 PPA 366.60DA").is_empty());
        assert!(extract("").is_empty());
    }
}
