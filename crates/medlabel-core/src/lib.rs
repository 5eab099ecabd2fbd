//! Core library for medicine label OCR processing.
//!
//! This crate provides:
//! - Text normalization for OCR transcripts
//! - Rule-based extraction of Algerian pharmaceutical label fields
//!   (manufacturer, name, active ingredient, dosage, form, lot, dates,
//!   reference price, D.E registration number)
//! - Reference data (manufacturer registry and lexicons) as configuration
//! - An append-only JSON journal for extraction results

pub mod error;
pub mod journal;
pub mod label;
pub mod models;

pub use error::{MedlabelError, Result};
pub use journal::{AppendOutcome, Journal, JournalEntry};
pub use label::{LabelParser, RuleLabelParser};
pub use label::rules::{normalize, NormalizedText};
pub use models::config::MedlabelConfig;
pub use models::label::{ExtractionResult, Field};
pub use models::reference::ReferenceData;
