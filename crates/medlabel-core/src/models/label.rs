//! Extraction result model for a single medicine label.

use serde::{Deserialize, Serialize};

/// One of the ten fields extracted from a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Manufacturer,
    MedicationName,
    ActiveIngredient,
    Dosage,
    PharmaceuticalForm,
    LotNumber,
    ManufactureDate,
    ExpiryDate,
    Price,
    RegistrationNumber,
}

impl Field {
    /// All fields in report order.
    pub const ALL: [Field; 10] = [
        Field::Manufacturer,
        Field::MedicationName,
        Field::ActiveIngredient,
        Field::Dosage,
        Field::PharmaceuticalForm,
        Field::LotNumber,
        Field::ManufactureDate,
        Field::ExpiryDate,
        Field::Price,
        Field::RegistrationNumber,
    ];

    /// Serialized key of the field.
    pub fn key(&self) -> &'static str {
        match self {
            Field::Manufacturer => "manufacturer",
            Field::MedicationName => "medication_name",
            Field::ActiveIngredient => "active_ingredient",
            Field::Dosage => "dosage",
            Field::PharmaceuticalForm => "pharmaceutical_form",
            Field::LotNumber => "lot_number",
            Field::ManufactureDate => "manufacture_date",
            Field::ExpiryDate => "expiry_date",
            Field::Price => "price",
            Field::RegistrationNumber => "registration_number",
        }
    }

    /// Human-readable label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Manufacturer => "Manufacturer",
            Field::MedicationName => "Medication name",
            Field::ActiveIngredient => "Active ingredient",
            Field::Dosage => "Dosage",
            Field::PharmaceuticalForm => "Pharmaceutical form",
            Field::LotNumber => "Lot number",
            Field::ManufactureDate => "Manufacture date",
            Field::ExpiryDate => "Expiry date",
            Field::Price => "Price",
            Field::RegistrationNumber => "Registration (D.E)",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Field::ALL.into_iter().find(|f| f.key() == key)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Fields extracted from one label transcript.
///
/// Every field is an ordered list of values in discovery order. Only
/// `dosage` is expected to carry more than one value in practice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionResult {
    pub manufacturer: Vec<String>,
    pub medication_name: Vec<String>,
    pub active_ingredient: Vec<String>,
    pub dosage: Vec<String>,
    pub pharmaceutical_form: Vec<String>,
    pub lot_number: Vec<String>,
    pub manufacture_date: Vec<String>,
    pub expiry_date: Vec<String>,
    pub price: Vec<String>,
    pub registration_number: Vec<String>,
}

impl ExtractionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values of a field.
    pub fn get(&self, field: Field) -> &[String] {
        match field {
            Field::Manufacturer => &self.manufacturer,
            Field::MedicationName => &self.medication_name,
            Field::ActiveIngredient => &self.active_ingredient,
            Field::Dosage => &self.dosage,
            Field::PharmaceuticalForm => &self.pharmaceutical_form,
            Field::LotNumber => &self.lot_number,
            Field::ManufactureDate => &self.manufacture_date,
            Field::ExpiryDate => &self.expiry_date,
            Field::Price => &self.price,
            Field::RegistrationNumber => &self.registration_number,
        }
    }

    fn get_mut(&mut self, field: Field) -> &mut Vec<String> {
        match field {
            Field::Manufacturer => &mut self.manufacturer,
            Field::MedicationName => &mut self.medication_name,
            Field::ActiveIngredient => &mut self.active_ingredient,
            Field::Dosage => &mut self.dosage,
            Field::PharmaceuticalForm => &mut self.pharmaceutical_form,
            Field::LotNumber => &mut self.lot_number,
            Field::ManufactureDate => &mut self.manufacture_date,
            Field::ExpiryDate => &mut self.expiry_date,
            Field::Price => &mut self.price,
            Field::RegistrationNumber => &mut self.registration_number,
        }
    }

    /// First value of a field, if any.
    pub fn first(&self, field: Field) -> Option<&str> {
        self.get(field).first().map(String::as_str)
    }

    /// Append a value unless it is already present. Returns whether it was added.
    pub fn push(&mut self, field: Field, value: impl Into<String>) -> bool {
        let value = value.into();
        let values = self.get_mut(field);
        if values.contains(&value) {
            return false;
        }
        values.push(value);
        true
    }

    /// Append several values, skipping duplicates.
    pub fn extend<I, S>(&mut self, field: Field, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for value in values {
            self.push(field, value);
        }
    }

    /// Iterate fields in report order with their values.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &[String])> + '_ {
        Field::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    /// Total number of values across all fields.
    pub fn total_count(&self) -> usize {
        self.iter().map(|(_, values)| values.len()).sum()
    }

    /// Number of fields holding at least one value.
    pub fn filled_fields(&self) -> usize {
        self.iter().filter(|(_, values)| !values.is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.total_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_suppresses_duplicates() {
        let mut result = ExtractionResult::new();
        assert!(result.push(Field::Dosage, "500mg"));
        assert!(result.push(Field::Dosage, "1g"));
        assert!(!result.push(Field::Dosage, "500mg"));

        assert_eq!(result.dosage, vec!["500mg", "1g"]);
        assert_eq!(result.total_count(), 2);
        assert_eq!(result.filled_fields(), 1);
    }

    #[test]
    fn test_serialized_keys() {
        let mut result = ExtractionResult::new();
        result.push(Field::LotNumber, "77A");

        let json = serde_json::to_value(&result).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), 10);
        for field in Field::ALL {
            assert!(object.contains_key(field.key()), "missing {}", field);
        }
        assert_eq!(json["lot_number"][0], "77A");
    }

    #[test]
    fn test_field_key_roundtrip() {
        for field in Field::ALL {
            assert_eq!(Field::from_key(field.key()), Some(field));
        }
        assert_eq!(Field::from_key("barcode"), None);
    }
}
