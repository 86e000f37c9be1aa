//! Brokerage statement field extraction module.

mod parser;
pub mod rules;

pub use parser::{RuleStatementParser, StatementParser};
pub use rules::{extract_element, ExtractionMatch, FieldExtractor};
