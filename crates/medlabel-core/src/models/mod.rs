//! Data models: extraction results, reference data and configuration.

pub mod config;
pub mod label;
pub mod reference;
