//! Rule-based statement parser applying every named field rule.

use tracing::debug;

use crate::models::statement::{ExtractionResult, FieldName, FieldOutcome};

use super::rules::{
    AccountNumberExtractor, BatesExtractor, DatePairExtractor, FieldExtractor, FromAddressExtractor,
    PriceExtractor, StockExtractor, ToAddressExtractor,
};

/// Trait for statement parsing.
pub trait StatementParser {
    /// Extract every known field from rendered statement text.
    fn parse(&self, text: &str) -> ExtractionResult;
}

/// Parser built on the regex rules in [`super::rules`].
#[derive(Debug, Clone, Default)]
pub struct RuleStatementParser {
    /// Leave fields without a rule out of the result.
    skip_pending: bool,
}

impl RuleStatementParser {
    /// Create a parser that reports placeholder fields as pending.
    pub fn new() -> Self {
        Self { skip_pending: false }
    }

    /// Set whether placeholder fields are omitted.
    pub fn with_skip_pending(mut self, skip: bool) -> Self {
        self.skip_pending = skip;
        self
    }

    /// Run the rule for a single field.
    pub fn extract_field(&self, field: FieldName, text: &str) -> FieldOutcome {
        let found = match field {
            FieldName::Bates => BatesExtractor::new().extract_all(text),
            FieldName::Dates => DatePairExtractor::new().extract_all(text),
            FieldName::Stock => StockExtractor::new().extract_all(text),
            FieldName::AccountNumber => AccountNumberExtractor::new().extract_all(text),
            FieldName::ToAddress => ToAddressExtractor::new().extract_all(text),
            FieldName::FromAddress => FromAddressExtractor::new().extract_all(text),
            FieldName::Price => PriceExtractor::new().extract_all(text),
            FieldName::Quantity
            | FieldName::TradeDate
            | FieldName::SettleDate
            | FieldName::Cusip
            | FieldName::FinancialAdvisor
            | FieldName::Security
            | FieldName::MemoLine => return FieldOutcome::Pending,
        };

        FieldOutcome::Matches(found.into_iter().map(|m| m.value).collect())
    }
}

impl StatementParser for RuleStatementParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let mut result = ExtractionResult::new();

        for field in FieldName::ALL {
            if self.skip_pending && field.is_pending() {
                continue;
            }
            let outcome = self.extract_field(field, text);
            debug!("{}: {} matches", field, outcome.values().len());
            result.insert(field, outcome);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const STATEMENT: &str = "Merrill Lynch\nOffice Serving Your Account\n250 VESEY STREET\nNEW YORK NY 10080\n\
JANE Q INVESTOR\n12 HARBOR LANE\nPORTLAND ME 04101-2201\n\
Account Number: 7AB-40412\n\
Trade Date Settlement Date\n06/14/2022 06/16/2022\n\
BOUGHT\n100 SH XYZ CORP\n\
Price\n31.4500\n\
MLPF&S-CONF-0004417\x0c";

    #[test]
    fn test_parse_full_statement() {
        let result = RuleStatementParser::new().parse(STATEMENT);

        assert_eq!(result.len(), FieldName::ALL.len());
        assert_eq!(result.values(FieldName::Stock), &["100 SH XYZ CORP".to_string()]);
        assert_eq!(result.values(FieldName::AccountNumber), &["7AB-40412".to_string()]);
        assert_eq!(result.values(FieldName::Dates), &["06/14/2022 06/16/2022".to_string()]);
        assert_eq!(result.values(FieldName::Price), &["31.4500".to_string()]);
        assert_eq!(result.values(FieldName::Bates), &["0004417".to_string()]);
        assert_eq!(
            result.values(FieldName::FromAddress),
            &["250 VESEY STREET\nNEW YORK NY 10080".to_string()]
        );
        assert_eq!(
            result.values(FieldName::ToAddress),
            &["12 HARBOR LANE\nPORTLAND ME 04101-2201".to_string()]
        );
    }

    #[test]
    fn test_placeholders_are_pending() {
        let result = RuleStatementParser::new().parse(STATEMENT);

        for field in FieldName::ALL.iter().filter(|f| f.is_pending()) {
            assert_eq!(result.get(*field), Some(&FieldOutcome::Pending), "{field}");
        }
    }

    #[test]
    fn test_empty_text_gives_empty_matches() {
        let result = RuleStatementParser::new().parse("");

        assert_eq!(result.get(FieldName::Stock), Some(&FieldOutcome::Matches(vec![])));
        assert_eq!(result.match_count(), 0);
    }

    #[test]
    fn test_skip_pending() {
        let result = RuleStatementParser::new().with_skip_pending(true).parse(STATEMENT);

        assert_eq!(result.len(), 7);
        assert!(result.iter().all(|(_, outcome)| !outcome.is_pending()));
    }

    #[test]
    fn test_stock_line_from_two_page_text() {
        let text = "STATEMENT PAGE 1\n\x0cBOUGHT\n100 SH XYZ CORP\n\x0c";
        let outcome = RuleStatementParser::new().extract_field(FieldName::Stock, text);
        assert_eq!(outcome, FieldOutcome::Matches(vec!["100 SH XYZ CORP".to_string()]));
    }
}
