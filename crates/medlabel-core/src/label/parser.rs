//! Rule-based label parser assembling all field extractors.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::error::Result;
use crate::models::config::{ExtractionConfig, MedlabelConfig};
use crate::models::label::{ExtractionResult, Field};
use crate::models::reference::ReferenceData;

use super::rules::{
    ActiveIngredientResolver, DateExtractor, DosageExtractor, FieldExtractor, FormExtractor,
    Lexicon, LotExtractor, ManufacturerDetector, MedicationNameResolver, NormalizedText,
    PriceExtractor, RegistrationExtractor,
};
use super::LabelParser;

/// Label parser running the manufacturer → name → ingredient chain followed
/// by the independent single-field extractors.
///
/// Built once from reference data and immutable afterwards, so one parser
/// can be shared across threads.
pub struct RuleLabelParser {
    lexicon: Arc<Lexicon>,
    manufacturers: ManufacturerDetector,
    names: MedicationNameResolver,
    ingredients: ActiveIngredientResolver,
    extractors: Vec<Box<dyn FieldExtractor + Send + Sync>>,
}

impl RuleLabelParser {
    /// Build a parser from reference lists and extraction settings.
    pub fn new(reference: &ReferenceData, extraction: &ExtractionConfig) -> Result<Self> {
        let lexicon = Arc::new(Lexicon::new(reference)?);

        let extractors: Vec<Box<dyn FieldExtractor + Send + Sync>> = vec![
            Box::new(DosageExtractor),
            Box::new(FormExtractor::new(Arc::clone(&lexicon))?),
            Box::new(LotExtractor),
            Box::new(DateExtractor::manufacture()),
            Box::new(DateExtractor::expiry()),
            Box::new(PriceExtractor::new(extraction.currency_unit.clone())),
            Box::new(RegistrationExtractor),
        ];

        Ok(Self {
            manufacturers: ManufacturerDetector::new(Arc::clone(&lexicon))?,
            names: MedicationNameResolver::new(
                Arc::clone(&lexicon),
                extraction.trim_stopword_tokens,
            )?,
            ingredients: ActiveIngredientResolver::new(Arc::clone(&lexicon))?,
            extractors,
            lexicon,
        })
    }

    /// Build a parser from a full configuration.
    pub fn from_config(config: &MedlabelConfig) -> Result<Self> {
        Self::new(&config.reference, &config.extraction)
    }

    /// Compiled reference data used by this parser.
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }
}

impl LabelParser for RuleLabelParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();
        info!("Parsing label from {} characters of text", text.chars().count());

        let text = NormalizedText::new(text);
        let mut result = ExtractionResult::new();
        if text.is_empty() {
            debug!("Empty transcript, nothing to extract");
            return result;
        }

        let manufacturer = self.manufacturers.detect(&text);
        let name = self.names.resolve(&text, manufacturer.as_deref());
        let ingredients = self.ingredients.resolve(&text, name.as_deref());

        result.extend(Field::Manufacturer, manufacturer);
        result.extend(Field::MedicationName, name);
        result.extend(Field::ActiveIngredient, ingredients);

        for extractor in &self.extractors {
            result.extend(extractor.field(), extractor.extract(&text));
        }

        debug!(
            total = result.total_count(),
            fields = result.filled_fields(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Label extraction complete"
        );

        result
    }
}
