//! Product catalog: loading, filtering, and sorting.
//!
//! The catalog is a JSON array of product cards. Filtering and sorting are
//! pure functions over cards; [`crate::page::Page`] applies them to the grid.

use std::cmp::Ordering;
use std::path::Path;

use dewdrop_core::{Price, Product, ProductId, SortKey, parse_decimal};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Filter value that matches every card.
pub const ALL: &str = "all";

/// Errors loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A product as listed in the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    /// Price as displayed, e.g. `"24.00"`.
    #[serde(default)]
    pub price: String,
    /// Average rating as displayed, e.g. `"4.5"`.
    #[serde(default)]
    pub rating: String,
    /// Skin types the product suits.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Full-size image URL, loaded lazily.
    #[serde(default)]
    pub image: Option<String>,
}

impl ProductCard {
    /// Parsed price, if the price string is a valid decimal.
    #[must_use]
    pub fn parsed_price(&self) -> Option<Price> {
        Price::parse(&self.price)
    }

    /// Parsed rating, if the rating string is a valid decimal.
    #[must_use]
    pub fn parsed_rating(&self) -> Option<Decimal> {
        parse_decimal(&self.rating)
    }

    /// The product record captured when this card is added to the cart.
    #[must_use]
    pub fn to_product(&self) -> Product {
        let mut product = Product::new(self.id.clone())
            .with_field("name", self.name.as_str())
            .with_field("category", self.category.as_str())
            .with_field("price", self.price.as_str());
        if let Some(image) = &self.image {
            product = product.with_field("image", image.as_str());
        }
        product
    }
}

/// The full product list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    cards: Vec<ProductCard>,
}

impl Catalog {
    /// Wrap a list of cards.
    #[must_use]
    pub const fn new(cards: Vec<ProductCard>) -> Self {
        Self { cards }
    }

    /// Parse a catalog from JSON.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if the JSON is not an array of cards.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        Ok(Self::new(serde_json::from_str(raw)?))
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json(&raw)?;
        tracing::debug!(path = %path.display(), products = catalog.cards.len(), "Loaded catalog");
        Ok(catalog)
    }

    /// Look up a card by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&ProductCard> {
        self.cards.iter().find(|card| &card.id == id)
    }

    /// All cards in catalog order.
    #[must_use]
    pub fn cards(&self) -> &[ProductCard] {
        &self.cards
    }

    /// Consume the catalog, returning its cards.
    #[must_use]
    pub fn into_cards(self) -> Vec<ProductCard> {
        self.cards
    }
}

// =============================================================================
// Filtering
// =============================================================================

/// Whether `card` belongs in `category` (`"all"` matches everything).
#[must_use]
pub fn category_matches(category: &str, card: &ProductCard) -> bool {
    category == ALL || card.category == category
}

/// Sidebar filter state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: String,
    pub skin: String,
    pub search: String,
}

impl Default for ProductFilter {
    /// The cleared state: every category, every skin type, no search.
    fn default() -> Self {
        Self {
            category: ALL.to_string(),
            skin: ALL.to_string(),
            search: String::new(),
        }
    }
}

impl ProductFilter {
    /// Whether `card` passes every active criterion.
    ///
    /// Skin and search comparisons are case-insensitive substring matches.
    #[must_use]
    pub fn matches(&self, card: &ProductCard) -> bool {
        if !category_matches(&self.category, card) {
            return false;
        }

        if self.skin != ALL {
            let tags = card.tags.join(" ").to_lowercase();
            if !tags.contains(&self.skin.to_lowercase()) {
                return false;
            }
        }

        let search = self.search.to_lowercase();
        search.is_empty() || card.name.to_lowercase().contains(&search)
    }

    /// Cards that pass the filter, in order.
    pub fn apply<'a>(&'a self, cards: &'a [ProductCard]) -> impl Iterator<Item = &'a ProductCard> {
        cards.iter().filter(|card| self.matches(card))
    }
}

/// Text for the results counter.
#[must_use]
pub fn results_label(visible: usize, total: usize) -> String {
    format!("Showing {visible} of {total} products")
}

// =============================================================================
// Sorting
// =============================================================================

/// Sort cards in place. The sort is stable.
pub fn sort_cards(cards: &mut [ProductCard], key: SortKey) {
    sort_by_key(cards, key, |card| card);
}

/// Sort any list of items that carry a card. The sort is stable.
///
/// Cards whose price or rating does not parse go after all cards that do.
pub fn sort_by_key<T>(items: &mut [T], key: SortKey, card_of: impl Fn(&T) -> &ProductCard) {
    match key {
        SortKey::Original => {}
        SortKey::PriceLow => items.sort_by(|a, b| {
            parsed_first(card_of(a).parsed_price(), card_of(b).parsed_price(), Ordering::Less)
        }),
        SortKey::PriceHigh => items.sort_by(|a, b| {
            parsed_first(card_of(a).parsed_price(), card_of(b).parsed_price(), Ordering::Greater)
        }),
        SortKey::Name => items.sort_by_cached_key(|item| card_of(item).name.to_lowercase()),
        SortKey::Rating => items.sort_by(|a, b| {
            parsed_first(card_of(a).parsed_rating(), card_of(b).parsed_rating(), Ordering::Greater)
        }),
    }
}

/// Order two optional values with `None` last.
///
/// `direction` is `Less` for ascending and `Greater` for descending.
fn parsed_first<T: Ord>(a: Option<T>, b: Option<T>, direction: Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) if direction == Ordering::Less => a.cmp(&b),
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
