//! Mailing address extraction.

use regex::Captures;

use super::patterns::{ADDRESS, FROM_ADDRESS, OFFICE_HEADING};
use super::{find_all, find_all_guarded, ExtractionMatch, FieldExtractor};

/// Destination (client) addresses: any street + city/state/ZIP block that is
/// not the branch office block and does not start in the middle of a number.
#[derive(Debug, Default, Clone, Copy)]
pub struct ToAddressExtractor;

/// Source address: the block printed under the branch office heading.
#[derive(Debug, Default, Clone, Copy)]
pub struct FromAddressExtractor;

impl ToAddressExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FromAddressExtractor {
    pub fn new() -> Self {
        Self
    }
}

fn starts_client_block(text: &str, caps: &Captures<'_>) -> bool {
    let Some(whole) = caps.get(0) else {
        return false;
    };
    let before = &text[..whole.start()];

    if before.ends_with(OFFICE_HEADING) {
        return false;
    }
    !before.chars().next_back().is_some_and(|c| c.is_ascii_digit())
}

impl FieldExtractor for ToAddressExtractor {
    type Output = ExtractionMatch<String>;

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        find_all_guarded(&ADDRESS, text, starts_client_block)
    }
}

impl FieldExtractor for FromAddressExtractor {
    type Output = ExtractionMatch<String>;

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        find_all(&FROM_ADDRESS, text)
    }
}
