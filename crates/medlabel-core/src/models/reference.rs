//! Reference data: manufacturer registry and lexicons.

use serde::{Deserialize, Serialize};

/// Known manufacturers, in match priority order.
///
/// A name that contains another registered name must come first
/// (NADPHARMAGIC before NADPHARMA).
pub const DEFAULT_MANUFACTURERS: &[&str] = &[
    "SAIDAL",
    "BIOCARE",
    "BIOPHARM",
    "HIKMA",
    "PFIZER",
    "SANOFI",
    "BAYER",
    "NOVARTIS",
    "GSK",
    "GLAXOSMITHKLINE",
    "BIOGALENIC",
    "NADPHARMAGIC",
    "NADPHARMA",
    "ANTIBIOTICAL",
    "LAPROPHAN",
];

/// Pharmaceutical form words (French label vocabulary first).
pub const DEFAULT_FORMS: &[&str] = &[
    "comprimés",
    "comprimé",
    "comprimée",
    "gélules",
    "gélule",
    "sirop",
    "solution",
    "suspension",
    "crème",
    "pommade",
    "gel",
    "injection",
    "suppositoires",
    "suppositoire",
    "sachets",
    "sachet",
    "unidoses",
    "quadrispersible",
    "collyre",
    "gouttes",
    "tablets",
    "tablet",
    "capsules",
    "capsule",
    "syrup",
    "suppositories",
    "drops",
    "cream",
    "ointment",
];

/// Substrings that mark a chemical (salt, acid, ester) name.
pub const DEFAULT_INGREDIENT_MARKERS: &[&str] = &[
    "sodique",
    "chlorhydrate",
    "sulfate",
    "phosphate",
    "base",
    "acide",
    "sel",
    "ester",
    "sodium",
    "potassium",
    "hydrochloride",
    "acid",
];

/// Label keywords that are never a product or substance name.
pub const DEFAULT_STOPWORDS: &[&str] = &["VIGNETTE", "PRIX", "LOT", "FAB", "EXP", "PER"];

/// Reference lists used to build the extraction pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceData {
    /// Manufacturer registry, first match wins.
    pub manufacturers: Vec<String>,

    /// Pharmaceutical form lexicon.
    pub forms: Vec<String>,

    /// Active ingredient marker substrings.
    pub ingredient_markers: Vec<String>,

    /// Exclusion stopwords.
    pub stopwords: Vec<String>,
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self {
            manufacturers: to_owned(DEFAULT_MANUFACTURERS),
            forms: to_owned(DEFAULT_FORMS),
            ingredient_markers: to_owned(DEFAULT_INGREDIENT_MARKERS),
            stopwords: to_owned(DEFAULT_STOPWORDS),
        }
    }
}

impl ReferenceData {
    /// Add a manufacturer with the lowest priority.
    pub fn with_manufacturer(mut self, name: impl Into<String>) -> Self {
        self.manufacturers.push(name.into());
        self
    }

    /// Add a pharmaceutical form word.
    pub fn with_form(mut self, form: impl Into<String>) -> Self {
        self.forms.push(form.into());
        self
    }
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
