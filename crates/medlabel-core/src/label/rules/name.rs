//! Commercial medication name resolution.

use std::collections::HashMap;
use std::sync::Arc;

use regex::Regex;

use super::patterns::{NAME_AFTER_DOSAGE, NAME_ANYWHERE, NAME_AT_END, NAME_BEFORE_DOSAGE};
use super::{collapse_whitespace, run_cascade, Lexicon, NormalizedText, Strategy};
use crate::error::ExtractionError;
use crate::models::label::Field;

type NameStrategy = fn(&MedicationNameResolver, &str, Option<&str>) -> Option<String>;

/// Resolves the product name using the detected manufacturer as context.
///
/// Strategies run from most to least specific and the first accepted
/// candidate wins:
///
/// 1. `<manufacturer>-NAME` followed by a dosage, a dash or an "L.P" marker
/// 2. `NAME 500mg`
/// 3. `500mg NAME`
/// 4. an uppercase run closing the text
/// 5. the first uppercase run of three letters or more
///
/// A candidate is never a registered manufacturer or a stopword.
#[derive(Debug, Clone)]
pub struct MedicationNameResolver {
    lexicon: Arc<Lexicon>,
    after_manufacturer: HashMap<String, Regex>,
    trim_tokens: bool,
}

impl MedicationNameResolver {
    const STRATEGIES: [Strategy<NameStrategy>; 5] = [
        Strategy { name: "after_manufacturer", run: Self::after_manufacturer },
        Strategy { name: "before_dosage", run: Self::before_dosage },
        Strategy { name: "after_dosage", run: Self::after_dosage },
        Strategy { name: "at_end", run: Self::at_end },
        Strategy { name: "anywhere", run: Self::anywhere },
    ];

    pub fn new(lexicon: Arc<Lexicon>, trim_tokens: bool) -> Result<Self, ExtractionError> {
        let mut after_manufacturer = HashMap::new();
        for name in lexicon.manufacturers() {
            let pattern = Regex::new(&manufacturer_prefix_pattern(name)).map_err(|source| {
                ExtractionError::Pattern {
                    list: "manufacturers".to_string(),
                    source,
                }
            })?;
            after_manufacturer.insert(name.clone(), pattern);
        }

        Ok(Self {
            lexicon,
            after_manufacturer,
            trim_tokens,
        })
    }

    /// Resolve the medication name, if any strategy succeeds.
    pub fn resolve(&self, text: &NormalizedText, manufacturer: Option<&str>) -> Option<String> {
        run_cascade(Field::MedicationName, &Self::STRATEGIES, |run| {
            run(self, text.as_str(), manufacturer)
        })
    }

    fn after_manufacturer(&self, text: &str, manufacturer: Option<&str>) -> Option<String> {
        let manufacturer = manufacturer?.trim().to_uppercase();
        let caps = match self.after_manufacturer.get(&manufacturer) {
            Some(pattern) => pattern.captures(text)?,
            None => Regex::new(&manufacturer_prefix_pattern(&manufacturer))
                .ok()?
                .captures(text)?,
        };
        self.accept(caps.get(1)?.as_str())
    }

    fn before_dosage(&self, text: &str, _: Option<&str>) -> Option<String> {
        self.accept(NAME_BEFORE_DOSAGE.captures(text)?.get(1)?.as_str())
    }

    fn after_dosage(&self, text: &str, _: Option<&str>) -> Option<String> {
        self.accept(NAME_AFTER_DOSAGE.captures(text)?.get(1)?.as_str())
    }

    fn at_end(&self, text: &str, _: Option<&str>) -> Option<String> {
        self.accept(NAME_AT_END.captures(text)?.get(1)?.as_str())
    }

    fn anywhere(&self, text: &str, _: Option<&str>) -> Option<String> {
        NAME_ANYWHERE
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .filter_map(|m| self.accept(m.as_str()))
            .find(|candidate| candidate.chars().count() >= 3)
    }

    /// Clean a raw capture and apply the exclusion rule.
    fn accept(&self, raw: &str) -> Option<String> {
        let candidate = if self.trim_tokens {
            self.trim_excluded_tokens(raw)
        } else {
            collapse_whitespace(raw)
        };
        let candidate = trim_punctuation(&candidate);

        if candidate.is_empty() || self.lexicon.is_excluded(candidate) {
            return None;
        }
        Some(candidate.to_string())
    }

    /// Drop stopword and manufacturer tokens from both ends of a candidate.
    fn trim_excluded_tokens(&self, raw: &str) -> String {
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        let mut start = 0;
        let mut end = tokens.len();

        while start < end && self.lexicon.is_excluded(tokens[start]) {
            start += 1;
        }
        while end > start && self.lexicon.is_excluded(tokens[end - 1]) {
            end -= 1;
        }

        tokens[start..end].join(" ")
    }
}

fn manufacturer_prefix_pattern(manufacturer: &str) -> String {
    format!(
        r"(?i){}[-\s]+([A-Z][A-Z\s&.]+?)(?:\s+\d+(?:\.\d+)?(?:mg|g|%)|\s+-\s+|\s+L\.?P\.?)",
        regex::escape(manufacturer)
    )
}

fn trim_punctuation(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == '&' || c == '-')
}
