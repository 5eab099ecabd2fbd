use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::trace;

use super::patterns::PRICE_PATTERNS;
use super::{FieldExtractor, NormalizedText};
use crate::models::label::Field;

/// Reference price from the first recognized label (TR, T.R, Tarif de
/// Référence, PPA, Prix+SHP, PRIX), suffixed with the currency unit.
#[derive(Debug, Clone)]
pub struct PriceExtractor {
    currency_unit: String,
}

impl PriceExtractor {
    pub fn new(currency_unit: impl Into<String>) -> Self {
        Self {
            currency_unit: currency_unit.into(),
        }
    }

    pub fn currency_unit(&self) -> &str {
        &self.currency_unit
    }
}

impl Default for PriceExtractor {
    fn default() -> Self {
        Self::new("DA")
    }
}

impl FieldExtractor for PriceExtractor {
    fn field(&self) -> Field {
        Field::Price
    }

    fn extract(&self, text: &NormalizedText) -> Vec<String> {
        for (index, pattern) in PRICE_PATTERNS.iter().enumerate() {
            let Some(amount) = pattern.captures(text.as_str()).and_then(|c| c.get(1)) else {
                continue;
            };
            let amount = amount.as_str();
            // The amount is reported as printed; parsing only validates it.
            if Decimal::from_str(amount).is_err() {
                trace!(pattern = index, amount, "price amount rejected");
                continue;
            }
            trace!(field = Field::Price.key(), pattern = index, "pattern matched");
            return vec![format!("{} {}", amount, self.currency_unit)];
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Vec<String> {
        PriceExtractor::default().extract(&NormalizedText::new(text))
    }

    #[test]
    fn test_tr_variants() {
        assert_eq!(extract("FAB 02-2024 TR: 62.5DA"), vec!["62.5 DA"]);
        assert_eq!(extract("Suppositoires/B10 - TR=87.80DA - PPA"), vec!["87.80 DA"]);
        assert_eq!(extract("T.R: 366.60 DA"), vec!["366.60 DA"]);
        assert_eq!(extract("FAB 08/23 - TR 115DA - B/20"), vec!["115 DA"]);
    }

    #[test]
    fn test_tr_preferred_over_ppa() {
        let text = "Prix: 389.5 + SHP 2.50 - PPA=392.00 DA - TR: 392.00 DA";
        assert_eq!(extract(text), vec!["392.00 DA"]);
    }

    #[test]
    fn test_tarif_de_reference() {
        let text = "Prix+SHP=98.19+0.00 - PPA=98.19 DA - Tarif de Réf = 50.00 DA";
        assert_eq!(extract(text), vec!["50.00 DA"]);
        assert_eq!(extract("Tarif de Référence: 120 DA"), vec!["120 DA"]);
    }

    #[test]
    fn test_ppa_and_prix() {
        assert_eq!(extract("FAB 10-24 PPA 366.60DA"), vec!["366.60 DA"]);
        assert_eq!(extract("LOT X999 - PRIX 125.50DA - SANOFI"), vec!["125.50 DA"]);
        assert_eq!(extract("Prix + SHP = 210.30"), vec!["210.30 DA"]);
    }

    #[test]
    fn test_ppa_with_surcharge_not_a_price() {
        assert!(extract("PPA=256.73+2.50 - 258.23 DA - T/D").is_empty());
    }

    #[test]
    fn test_oversized_amount_skipped() {
        let text = "TR: 99999999999999999999999999999999 DA - PPA 10.00 DA";
        assert_eq!(extract(text), vec!["10.00 DA"]);
    }

    #[test]
    fn test_custom_currency_unit() {
        let extractor = PriceExtractor::new("DZD");
        assert_eq!(
            extractor.extract(&NormalizedText::new("TR: 62.5DA")),
            vec!["62.5 DZD"]
        );
    }
}
