//! Whitespace normalization of OCR transcripts.

use std::fmt;

/// Collapse every whitespace run (line breaks included) to one space and trim.
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A transcript flattened to a single line, with its uppercase form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    text: String,
    upper: String,
}

impl NormalizedText {
    pub fn new(raw: &str) -> Self {
        let text = normalize(raw);
        let upper = text.to_uppercase();
        Self { text, upper }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Uppercased text, used for case-folded registry matching.
    pub fn upper(&self) -> &str {
        &self.upper
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
