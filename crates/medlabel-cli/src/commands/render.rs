//! Output formats for extraction results.

use medlabel_core::{ExtractionResult, Field};

/// Separator between several values of one field in flat formats.
const VALUE_SEPARATOR: &str = "; ";

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn render(result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Csv => format_csv(std::slice::from_ref(result)),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

/// One CSV row per result, one column per field.
pub fn format_csv(results: &[ExtractionResult]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(Field::ALL.iter().map(|f| f.key()))?;
    for result in results {
        wtr.write_record(Field::ALL.iter().map(|f| joined(result, *f)))?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

/// Every field with its label, values or "not found".
pub fn format_text(result: &ExtractionResult) -> String {
    let width = Field::ALL.iter().map(|f| f.label().len()).max().unwrap_or(0);
    let mut output = String::new();

    for (field, values) in result.iter() {
        let shown = if values.is_empty() {
            "not found".to_string()
        } else {
            values.join(", ")
        };
        output.push_str(&format!("{:<width$} : {}\n", field.label(), shown, width = width));
    }

    output
}

/// Values of a field joined for flat output.
pub fn joined(result: &ExtractionResult, field: Field) -> String {
    result.get(field).join(VALUE_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> ExtractionResult {
        let mut result = ExtractionResult::new();
        result.push(Field::Manufacturer, "BIOCARE");
        result.push(Field::Dosage, "0.267mg");
        result.push(Field::Dosage, "1.336mg");
        result
    }

    #[test]
    fn test_text_lists_every_field() {
        let text = format_text(&sample());
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 10);
        assert!(lines[0].starts_with("Manufacturer"));
        assert!(lines[0].ends_with(": BIOCARE"));
        assert!(lines[1].ends_with(": not found"));
        assert!(lines[3].ends_with(": 0.267mg, 1.336mg"));
    }

    #[test]
    fn test_csv_header_and_row() {
        let csv = format_csv(&[sample()]).unwrap();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next().unwrap(),
            "manufacturer,medication_name,active_ingredient,dosage,pharmaceutical_form,lot_number,manufacture_date,expiry_date,price,registration_number"
        );
        assert_eq!(lines.next().unwrap(), "BIOCARE,,,0.267mg; 1.336mg,,,,,,");
    }

    #[test]
    fn test_json_uses_field_keys() {
        let json = render(&sample(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["manufacturer"][0], "BIOCARE");
        assert_eq!(value["dosage"].as_array().unwrap().len(), 2);
        assert!(value["lot_number"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_extensions() {
        assert_eq!(OutputFormat::Json.extension(), "json");
        assert_eq!(OutputFormat::Text.extension(), "txt");
    }
}
