//! Rule-based field extractors for brokerage statements.

pub mod address;
pub mod patterns;
pub mod trade;

pub use address::{FromAddressExtractor, ToAddressExtractor};
pub use trade::{AccountNumberExtractor, BatesExtractor, DatePairExtractor, PriceExtractor, StockExtractor};

use regex::{Captures, Regex};

use crate::error::ExtractionError;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// One matched field value and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte span of the whole match in the source text.
    pub position: (usize, usize),
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            value,
            position: (start, end),
            source: source.into(),
        }
    }
}

/// Compile `pattern` and return all non-overlapping matches in `text`.
///
/// Yields capture group 1 when the pattern has groups and the whole match
/// otherwise. An empty pattern yields nothing.
pub fn extract_element(text: &str, pattern: &str) -> Result<Vec<String>, ExtractionError> {
    if pattern.is_empty() {
        return Ok(Vec::new());
    }
    let re = Regex::new(pattern).map_err(|source| ExtractionError::InvalidPattern {
        field: pattern.to_string(),
        source,
    })?;

    Ok(find_all(&re, text).into_iter().map(|m| m.value).collect())
}

/// All matches of a compiled pattern.
pub fn find_all(re: &Regex, text: &str) -> Vec<ExtractionMatch<String>> {
    find_all_guarded(re, text, |_, _| true)
}

/// All matches of `re` accepted by `guard`.
///
/// A rejected candidate does not consume input: the search resumes one
/// character after the candidate's start, so a later overlapping match can
/// still be found.
pub fn find_all_guarded<F>(re: &Regex, text: &str, guard: F) -> Vec<ExtractionMatch<String>>
where
    F: Fn(&str, &Captures<'_>) -> bool,
{
    let mut results = Vec::new();
    let mut pos = 0;

    while pos <= text.len() {
        let Some(caps) = re.captures_at(text, pos) else {
            break;
        };
        let Some(whole) = caps.get(0) else {
            break;
        };

        if !guard(text, &caps) {
            pos = next_boundary(text, whole.start());
            continue;
        }

        let value = if re.captures_len() > 1 {
            caps.get(1).map(|m| m.as_str()).unwrap_or_default()
        } else {
            whole.as_str()
        };
        results.push(ExtractionMatch::new(
            value.to_string(),
            whole.as_str(),
            whole.start(),
            whole.end(),
        ));

        pos = if whole.end() > whole.start() {
            whole.end()
        } else {
            next_boundary(text, whole.end())
        };
    }

    results
}

pub(crate) fn next_boundary(text: &str, at: usize) -> usize {
    at + text[at..].chars().next().map_or(1, char::len_utf8)
}
