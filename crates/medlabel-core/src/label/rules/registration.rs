use super::patterns::{REGISTRATION_PATTERNS, TRAILING_YEAR};
use super::{collapse_whitespace, first_capture, FieldExtractor, NormalizedText};
use crate::models::label::Field;

/// D.E registration number.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistrationExtractor;

impl FieldExtractor for RegistrationExtractor {
    fn field(&self) -> Field {
        Field::RegistrationNumber
    }

    fn extract(&self, text: &NormalizedText) -> Vec<String> {
        let Some(raw) = first_capture(Field::RegistrationNumber, &REGISTRATION_PATTERNS, text.as_str())
        else {
            return Vec::new();
        };

        let value = collapse_whitespace(&raw);
        let value = TRAILING_YEAR.replace(&value, "");
        if value.is_empty() {
            return Vec::new();
        }
        vec![value.into_owned()]
    }
}
