//! Extraction result models for brokerage statements.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::pdf::RenderFormat;

/// Named fields pulled out of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    Bates,
    Dates,
    Stock,
    AccountNumber,
    ToAddress,
    FromAddress,
    Price,
    Quantity,
    TradeDate,
    SettleDate,
    Cusip,
    FinancialAdvisor,
    Security,
    MemoLine,
}

impl FieldName {
    /// Every field, in report order.
    pub const ALL: [FieldName; 14] = [
        FieldName::Bates,
        FieldName::Dates,
        FieldName::Stock,
        FieldName::AccountNumber,
        FieldName::ToAddress,
        FieldName::FromAddress,
        FieldName::Price,
        FieldName::Quantity,
        FieldName::TradeDate,
        FieldName::SettleDate,
        FieldName::Cusip,
        FieldName::FinancialAdvisor,
        FieldName::Security,
        FieldName::MemoLine,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Bates => "bates",
            FieldName::Dates => "dates",
            FieldName::Stock => "stock",
            FieldName::AccountNumber => "account_number",
            FieldName::ToAddress => "to_address",
            FieldName::FromAddress => "from_address",
            FieldName::Price => "price",
            FieldName::Quantity => "quantity",
            FieldName::TradeDate => "trade_date",
            FieldName::SettleDate => "settle_date",
            FieldName::Cusip => "cusip",
            FieldName::FinancialAdvisor => "financial_advisor",
            FieldName::Security => "security",
            FieldName::MemoLine => "memo_line",
        }
    }

    /// Fields with no extraction rule yet.
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            FieldName::Quantity
                | FieldName::TradeDate
                | FieldName::SettleDate
                | FieldName::Cusip
                | FieldName::FinancialAdvisor
                | FieldName::Security
                | FieldName::MemoLine
        )
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of extracting one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "values", rename_all = "snake_case")]
pub enum FieldOutcome {
    /// The rule ran; the list may be empty.
    Matches(Vec<String>),
    /// No rule is defined for this field yet.
    Pending,
}

impl FieldOutcome {
    /// Matched values; empty for pending fields.
    pub fn values(&self) -> &[String] {
        match self {
            FieldOutcome::Matches(values) => values,
            FieldOutcome::Pending => &[],
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, FieldOutcome::Pending)
    }
}

/// Field outcomes for one statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractionResult {
    fields: BTreeMap<FieldName, FieldOutcome>,
}

impl ExtractionResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: FieldName, outcome: FieldOutcome) {
        self.fields.insert(name, outcome);
    }

    pub fn get(&self, name: FieldName) -> Option<&FieldOutcome> {
        self.fields.get(&name)
    }

    /// Matched values for `name`; empty when absent or pending.
    pub fn values(&self, name: FieldName) -> &[String] {
        self.get(name).map(FieldOutcome::values).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &FieldOutcome)> {
        self.fields.iter().map(|(name, outcome)| (*name, outcome))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Total number of matched values across all fields.
    pub fn match_count(&self) -> usize {
        self.fields.values().map(|o| o.values().len()).sum()
    }
}

/// Everything a sink receives about one processed statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementRecord {
    /// File name within the input directory.
    pub file_name: String,
    /// Full path the statement was read from.
    pub path: PathBuf,
    /// Pages in the source document.
    pub page_count: u32,
    /// Pages that were rendered.
    pub pages: Vec<u32>,
    /// Rendering format the fields were extracted from.
    pub format: RenderFormat,
    /// Length of the rendered text in characters.
    pub char_count: usize,
    /// Extracted fields.
    pub fields: ExtractionResult,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl StatementRecord {
    /// File name without the `.pdf` suffix.
    pub fn stem(&self) -> &str {
        self.file_name
            .strip_suffix(crate::scan::PDF_SUFFIX)
            .unwrap_or(&self.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pending_fields() {
        let pending: Vec<_> = FieldName::ALL.iter().filter(|f| f.is_pending()).collect();
        assert_eq!(pending.len(), 7);
        assert!(!FieldName::Stock.is_pending());
        assert!(FieldName::Cusip.is_pending());
    }

    #[test]
    fn test_pending_differs_from_empty() {
        let mut result = ExtractionResult::new();
        result.insert(FieldName::Price, FieldOutcome::Matches(vec![]));
        result.insert(FieldName::Cusip, FieldOutcome::Pending);

        assert_ne!(result.get(FieldName::Price), result.get(FieldName::Cusip));
        assert!(result.values(FieldName::Price).is_empty());
        assert!(result.values(FieldName::Cusip).is_empty());
        assert!(result.get(FieldName::Bates).is_none());
    }

    #[test]
    fn test_serialize_result() {
        let mut result = ExtractionResult::new();
        result.insert(FieldName::Stock, FieldOutcome::Matches(vec!["100 SH XYZ CORP".into()]));
        result.insert(FieldName::Bates, FieldOutcome::Matches(vec![]));
        result.insert(FieldName::MemoLine, FieldOutcome::Pending);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "bates": {"status": "matches", "values": []},
                "stock": {"status": "matches", "values": ["100 SH XYZ CORP"]},
                "memo_line": {"status": "pending"},
            })
        );

        let back: ExtractionResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_record_stem() {
        let record = StatementRecord {
            file_name: "statement1.pdf".to_string(),
            path: PathBuf::from("in/statement1.pdf"),
            page_count: 2,
            pages: vec![1, 2],
            format: RenderFormat::Text,
            char_count: 10,
            fields: ExtractionResult::new(),
            processing_time_ms: 3,
        };
        assert_eq!(record.stem(), "statement1");
    }
}
