//! Data models for configuration and extraction results.

pub mod config;
pub mod statement;

pub use config::PdfFieldsConfig;
pub use statement::{ExtractionResult, FieldName, FieldOutcome, StatementRecord};
