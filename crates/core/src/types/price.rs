//! Decimal values read from catalog data.
//!
//! Prices and ratings arrive as strings. They are only ever compared,
//! never summed or converted, so no currency is attached.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product price in the store's single display currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Parse a price like `"24.50"` or `"$24.50"`.
    ///
    /// Returns `None` for anything that is not a plain decimal after an
    /// optional leading `$`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
        parse_decimal(digits).map(Self)
    }

    /// The amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

/// Parse a trimmed decimal string, returning `None` on failure.
#[must_use]
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s.trim()).ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let price = Price::parse("24.5").unwrap();
        assert_eq!(price.amount(), Decimal::new(245, 1));
    }

    #[test]
    fn test_parse_dollar_prefix() {
        assert_eq!(Price::parse(" $9.99 "), Price::parse("9.99"));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Price::parse("").is_none());
        assert!(Price::parse("free").is_none());
        assert!(Price::parse("$").is_none());
    }

    #[test]
    fn test_ordering() {
        assert!(Price::parse("9.99").unwrap() < Price::parse("10").unwrap());
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::parse("5").unwrap().to_string(), "$5.00");
    }
}
