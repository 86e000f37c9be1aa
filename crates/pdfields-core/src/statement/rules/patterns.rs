//! Regex patterns for the brokerage statement layout.
//!
//! The `regex` crate has no look-around or backtracking, so the address and
//! price rules compile only their consuming parts here; the context checks
//! live in [`super::address`] and [`super::trade`].

use lazy_static::lazy_static;
use regex::Regex;

/// Bates stamp: the digits after the second hyphen, e.g. `ML-STMT-0001234`.
pub const BATES_SRC: &str = r".*-.*-(\d{6,7})";

/// Two dates separated by a single space or newline (trade / settlement).
pub const DATE_PAIR_SRC: &str = r"\d{2}/\d{2}/\d{2,4}[\n\s]\d{2}/\d{2}/\d{2,4}";

/// The line after a SOLD/BOUGHT marker.
pub const STOCK_LINE_SRC: &str = r"(?:SOLD|BOUGHT)[\n\s]+(.+)";

/// Account number such as `5XY-12345`.
pub const ACCOUNT_NUMBER_SRC: &str = r"[[:digit:]][[:alpha:]][[:alpha:]]-\d+";

/// Street line plus city/state/ZIP line.
pub const ADDRESS_SRC: &str = r"([0-9]{1,3} .+\n.+ [A-Z]{2} [0-9]{5}[-]*[0-9]{0,4})";

/// Heading printed right above the branch office address.
pub const OFFICE_HEADING: &str = "Office Serving Your Account\n";

/// Branch office address block.
pub const FROM_ADDRESS_SRC: &str = r"Merrill Lynch\nOffice Serving Your Account\n([0-9]{1,3} .+\n.+ [A-Z]{2} [0-9]{5}[-]*[0-9]{0,4})";

/// `Price` label and the whitespace after it.
pub const PRICE_LABEL_SRC: &str = r"Price[\n\s]+";

/// Signed decimal at the start of the input; may be empty.
pub const PRICE_VALUE_SRC: &str = r"^[+-]?[0-9]*(?:\.[0-9]+)?";

lazy_static! {
    pub static ref BATES: Regex = Regex::new(BATES_SRC).unwrap();

    pub static ref DATE_PAIR: Regex = Regex::new(DATE_PAIR_SRC).unwrap();

    pub static ref STOCK_LINE: Regex = Regex::new(STOCK_LINE_SRC).unwrap();

    pub static ref ACCOUNT_NUMBER: Regex = Regex::new(ACCOUNT_NUMBER_SRC).unwrap();

    pub static ref ADDRESS: Regex = Regex::new(ADDRESS_SRC).unwrap();

    pub static ref FROM_ADDRESS: Regex = Regex::new(FROM_ADDRESS_SRC).unwrap();

    pub static ref PRICE_LABEL: Regex = Regex::new(PRICE_LABEL_SRC).unwrap();

    pub static ref PRICE_VALUE: Regex = Regex::new(PRICE_VALUE_SRC).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_patterns_compile() {
        for re in [
            &*BATES,
            &*DATE_PAIR,
            &*STOCK_LINE,
            &*ACCOUNT_NUMBER,
            &*ADDRESS,
            &*FROM_ADDRESS,
            &*PRICE_LABEL,
            &*PRICE_VALUE,
        ] {
            assert!(re.captures_len() >= 1);
        }
    }
}
