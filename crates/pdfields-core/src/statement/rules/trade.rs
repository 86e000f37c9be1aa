//! Trade confirmation fields: bates stamps, dates, line items, accounts, prices.

use regex::Regex;

use super::patterns::{ACCOUNT_NUMBER, BATES, DATE_PAIR, PRICE_LABEL, PRICE_VALUE, STOCK_LINE};
use super::{find_all, next_boundary, ExtractionMatch, FieldExtractor};

macro_rules! plain_extractor {
    ($(#[$doc:meta])* $name:ident, $pattern:expr) => {
        $(#[$doc])*
        #[derive(Debug, Default, Clone, Copy)]
        pub struct $name;

        impl $name {
            pub fn new() -> Self {
                Self
            }
        }

        impl FieldExtractor for $name {
            type Output = ExtractionMatch<String>;

            fn extract_all(&self, text: &str) -> Vec<Self::Output> {
                let re: &Regex = &$pattern;
                find_all(re, text)
            }
        }
    };
}

plain_extractor!(
    /// Bates stamp numbers (6 or 7 digits).
    BatesExtractor,
    BATES
);

plain_extractor!(
    /// Trade and settlement date pairs.
    DatePairExtractor,
    DATE_PAIR
);

plain_extractor!(
    /// Line following each SOLD/BOUGHT marker.
    StockExtractor,
    STOCK_LINE
);

plain_extractor!(
    /// Account numbers.
    AccountNumberExtractor,
    ACCOUNT_NUMBER
);

/// Trade price after a `Price` label. The value must start on the label's
/// line or a later one, never on a bare line break.
#[derive(Debug, Default, Clone, Copy)]
pub struct PriceExtractor;

impl PriceExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for PriceExtractor {
    type Output = ExtractionMatch<String>;

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();
        let mut pos = 0;

        while let Some(label) = PRICE_LABEL.find_at(text, pos) {
            // At least one whitespace character belongs to the label
            let first = next_boundary(text, label.start() + "Price".len());

            // Give whitespace back until the value starts on a character other than a line break
            let value_start = std::iter::once(label.end())
                .chain(
                    text[first..label.end()]
                        .char_indices()
                        .rev()
                        .map(|(i, _)| first + i),
                )
                .find(|&p| text[p..].chars().next().is_some_and(|c| c != '\n'));

            let Some(start) = value_start else {
                pos = next_boundary(text, label.start());
                continue;
            };

            let value = PRICE_VALUE.find(&text[start..]).map_or("", |m| m.as_str());
            let end = start + value.len();
            results.push(ExtractionMatch::new(
                value.to_string(),
                &text[label.start()..end],
                label.start(),
                end,
            ));
            pos = end;
        }

        results
    }
}
