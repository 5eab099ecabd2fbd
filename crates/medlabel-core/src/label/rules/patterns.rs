//! Common regex patterns for Algerian medicine label extraction.
//!
//! Pattern lists are ordered: extractors take the first pattern that matches.
//! Patterns built from reference data (manufacturer shapes, ingredient
//! markers) live next to the extractor that compiles them.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Medication name. Case-sensitive: product names are printed uppercase.
    pub static ref NAME_BEFORE_DOSAGE: Regex = Regex::new(
        r"\b([A-Z][A-Z]+(?:\s+[A-Z.&]+)*)\s+\d+(?:\.\d+)?(?:mg|g|%)"
    ).unwrap();

    pub static ref NAME_AFTER_DOSAGE: Regex = Regex::new(
        r"\d+(?:\.\d+)?\s*(?:mg|g|%|ml)\s+([A-Z][A-Z]+(?:\s+[A-Z.&]+)*)"
    ).unwrap();

    pub static ref NAME_AT_END: Regex = Regex::new(
        r"(?:-\s+)?\b([A-Z]{3,}(?:\s+[A-Z.&]+)*)\s*$"
    ).unwrap();

    pub static ref NAME_ANYWHERE: Regex = Regex::new(
        r"\b([A-Z]{3,}(?:\s+[A-Z.&]+)*)\b"
    ).unwrap();

    // Active ingredient
    pub static ref INGREDIENT_BETWEEN_DASHES: Regex = Regex::new(
        r"-\s+([A-Z][a-zàâäçéèêëîïôöùûü]+(?:\s+[A-Z]?[a-zàâäçéèêëîïôöùûü]+)*)\s+-"
    ).unwrap();

    pub static ref INGREDIENT_AFTER_DOSAGE: Regex = Regex::new(
        r"\d+(?:\.\d+)?\s*(?:mg|g|%|ml)\s+([A-Z][A-Z]+)"
    ).unwrap();

    pub static ref INGREDIENT_CAPITALIZED: Regex = Regex::new(
        r"\b([A-Z][a-zàâäçéèêëîïôöùûü]+(?:\s+[a-zàâäçéèêëîïôöùûü]+)?)\b"
    ).unwrap();

    // Dosage, one pattern per unit
    pub static ref DOSAGE_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)\b\d+(?:\.\d+)?\s*mg(?:/\d+(?:\.\d+)?mg)?\b").unwrap(),
        Regex::new(r"(?i)\b\d+(?:\.\d+)?\s*g\b").unwrap(),
        Regex::new(r"(?i)\b\d+(?:\.\d+)?\s*ml\b").unwrap(),
        Regex::new(r"\b\d+(?:\.\d+)?\s*%").unwrap(),
        Regex::new(r"(?i)\b\d+(?:\.\d+)?\s*mcg\b").unwrap(),
        Regex::new(r"(?i)\b\d+(?:\.\d+)?\s*[µμ]g\b").unwrap(),
    ];

    // Pharmaceutical form: a count next to a form word, with an optional
    // box marker ("B/20", "E20", "boîte de 20")
    pub static ref FORM_QUANTITY_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)(?P<form>[a-zàâäçéèêëîïôöùûü]+)\s*/?\s*[be]/?(?P<count>\d+)").unwrap(),
        Regex::new(r"(?i)bo[iî]te\s+de\s+(?P<count>\d+)\s+(?P<form>[a-zàâäçéèêëîïôöùûü]+)").unwrap(),
        Regex::new(r"(?i)(?P<form>[a-zàâäçéèêëîïôöùûü]+)\s+bo[iî]te\s+de\s+(?P<count>\d+)").unwrap(),
        Regex::new(r"(?i)[be]/?(?P<count>\d+)\s+(?P<form>[a-zàâäçéèêëîïôöùûü]+)").unwrap(),
    ];

    // Lot number
    pub static ref LOT_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)\bLOT\s*[n°:]*\s*:?\s*([A-Z0-9]+(?:\s*/?\s*\d+)?)").unwrap(),
        Regex::new(r"(?i)N°?\s*LOT\s*:?\s*([A-Z0-9\s/]+?)(?:\s+-|\s+FAB|\s+PER|\s+EXP|$)").unwrap(),
        Regex::new(r"(?i)Lot\s+n°?\s*:?\s*([A-Z0-9\s]+?)(?:\s+-|\s+FAB|$)").unwrap(),
        Regex::new(r"(?i)\bLOT\s+([A-Z0-9]+)").unwrap(),
    ];

    // Manufacture date (FAB, Fabrication, FABRICATO)
    pub static ref MANUFACTURE_DATE_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)\bFAB(?:RICATION|RICATO?)?\s*[B:]?\s*:?\s*(\d{1,2}[-/]\d{2,4})").unwrap(),
        Regex::new(r"(?i)Date\s+Fab(?:rication)?\s*:?\s*(\d{1,2}[-/]\d{2,4})").unwrap(),
        Regex::new(r"(?i)\bFab\s*:?\s*(\d{1,2}[-/]\d{2,4})").unwrap(),
        Regex::new(r"(?i)FAB\s+(\d{2}-\d{4})").unwrap(),
        Regex::new(r"(?i)FAB\s+(\d{2}-\d{2})").unwrap(),
        Regex::new(r"(?i)\bFAB\s+(\d{2}/\d{4})").unwrap(),
    ];

    // Expiry date (EXP, PER, PERIODO, Péremption)
    pub static ref EXPIRY_DATE_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)\b(?:PER(?:IOD[OI])?|EXP(?:IRATION)?)\s*:?\s*(\d{1,2}[-/]\d{2,4})").unwrap(),
        Regex::new(r"(?i)Date\s+Exp(?:iration)?\s*:?\s*(\d{1,2}[-/]\d{2,4})").unwrap(),
        Regex::new(r"(?i)Péremption\s*:?\s*(\d{1,2}[-/]\d{2,4})").unwrap(),
        Regex::new(r"(?i)EXP\s+(\d{2}-\d{4})").unwrap(),
        Regex::new(r"(?i)EXP:\s*(\d{2}-\d{2})").unwrap(),
        Regex::new(r"(?i)\bEXP\s+(\d{2}/\d{4})").unwrap(),
    ];

    // Reference price (TR, T.R, Tarif de Référence, PPA, Prix+SHP, PRIX)
    pub static ref PRICE_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)\bTR\s*[=:]\s*(\d+(?:\.\d+)?)\s*DA").unwrap(),
        Regex::new(r"(?i)\bT\.R\s*[=:]\s*(\d+(?:\.\d+)?)\s*DA").unwrap(),
        Regex::new(r"(?i)Tarif\s+de\s+Réf?(?:érence)?\s*[=:]\s*(\d+(?:\.\d+)?)\s*DA").unwrap(),
        Regex::new(r"(?i)PPA\s*[=:+]?\s*(\d+(?:\.\d+)?)\s*DA").unwrap(),
        Regex::new(r"(?i)Prix\s*\+?\s*SHP\s*[=:]\s*(\d+(?:\.\d+)?)").unwrap(),
        Regex::new(r"(?i)PRIX\s*[=:]\s*(\d+(?:\.\d+)?)").unwrap(),
        Regex::new(r"(?i)PRIX\s+(\d+(?:\.\d+)?)DA").unwrap(),
        Regex::new(r"(?i)\bTR\s+(\d+(?:\.\d+)?)DA").unwrap(),
        Regex::new(r"(?i)\bT\.R\s+(\d+(?:\.\d+)?)DA").unwrap(),
    ];

    // D.E registration number. The label itself is matched case-sensitively
    // so the French preposition "de" is never taken for it.
    pub static ref REGISTRATION_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"\bD\.?E\b\s*[nN°]*\s*:?\s*([\d/A-Za-z\s]+?)(?:\s+-|\s+(?i:lot|fab)|\s+\d{4}/\d{4}|$)").unwrap(),
        Regex::new(r"N°\s*D\.?E\b\s*:?\s*([\d/A-Za-z\s]+?)(?:\s+-|$)").unwrap(),
    ];

    pub static ref TRAILING_YEAR: Regex = Regex::new(r"\s+\d{4}$").unwrap();
}
