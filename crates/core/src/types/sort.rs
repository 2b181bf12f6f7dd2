//! Catalog sort orders.

use serde::{Deserialize, Serialize};

/// How the product grid is ordered.
///
/// Parsing never fails: unknown values keep the original order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Keep catalog order.
    #[default]
    Original,
    /// Cheapest first.
    PriceLow,
    /// Most expensive first.
    PriceHigh,
    /// Alphabetical by name.
    Name,
    /// Highest rated first.
    Rating,
}

impl SortKey {
    /// Parse a sort key from its select-box value.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "price-low" => Self::PriceLow,
            "price-high" => Self::PriceHigh,
            "name" => Self::Name,
            "rating" => Self::Rating,
            _ => Self::Original,
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Original => write!(f, "original"),
            Self::PriceLow => write!(f, "price-low"),
            Self::PriceHigh => write!(f, "price-high"),
            Self::Name => write!(f, "name"),
            Self::Rating => write!(f, "rating"),
        }
    }
}
