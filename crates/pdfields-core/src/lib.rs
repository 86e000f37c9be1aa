//! Core library for brokerage statement field extraction.
//!
//! This crate provides:
//! - PDF rendering to text, HTML or XML (lopdf + pdf-extract)
//! - Input folder discovery with working-directory fallback
//! - Regex field rules for statement layouts (bates, dates, trades, addresses, prices)
//! - Result sinks and the sequential batch pipeline

pub mod error;
pub mod models;
pub mod pdf;
pub mod pipeline;
pub mod scan;
pub mod sink;
pub mod statement;

#[cfg(any(test, feature = "test-support"))]
#[doc(hidden)]
pub mod test_support;

pub use error::{PdfFieldsError, Result};
pub use models::{ExtractionResult, FieldName, FieldOutcome, PdfFieldsConfig, StatementRecord};
pub use pdf::{ConvertOptions, PageRange, PdfConverter, PdfRenderer, RenderFormat};
pub use pipeline::{BatchReport, Invocation, Pipeline};
pub use scan::{ensure_dir, DirectoryScanner, PdfListing};
pub use sink::{DirectorySink, MemorySink, ResultSink};
pub use statement::{extract_element, RuleStatementParser, StatementParser};
