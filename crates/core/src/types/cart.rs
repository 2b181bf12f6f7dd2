//! The in-memory cart.
//!
//! `Cart` is a plain owned value: an ordered list of [`LineItem`]s with at
//! most one entry per product id. It knows nothing about storage or
//! display; the storefront crate wraps it with those collaborators.

use std::num::NonZeroU64;

use serde::Serialize;
use serde_json::Value;

use super::id::ProductId;
use super::product::{LineItem, Product};

/// Ordered cart contents.
///
/// Insertion order is kept for display only.
///
/// ## Examples
///
/// ```
/// use dewdrop_core::{Cart, Product, ProductId};
///
/// let mut cart = Cart::default();
/// let serum = Product::new(ProductId::parse("a").unwrap());
///
/// cart.add(&serum);
/// cart.add(&serum);
/// assert_eq!(cart.len(), 1);
/// assert_eq!(cart.count(), 2);
/// assert_eq!(cart.to_json().unwrap(), r#"[{"id":"a","quantity":2}]"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Build a cart from a snapshot.
    ///
    /// Entries sharing an id are merged into the first one, summing their
    /// quantities.
    #[must_use]
    pub fn new(snapshot: Vec<LineItem>) -> Self {
        let mut items: Vec<LineItem> = Vec::with_capacity(snapshot.len());
        for item in snapshot {
            if let Some(existing) = items.iter_mut().find(|existing| existing.id() == item.id()) {
                existing.add_quantity(item.quantity());
            } else {
                items.push(item);
            }
        }
        Self { items }
    }

    /// Load a cart from its persisted JSON form.
    ///
    /// Never fails: anything that is not a JSON array yields an empty cart,
    /// and array entries that are not valid line items are dropped.
    #[must_use]
    pub fn from_json(raw: &str) -> Self {
        Self::from_json_lossy(raw).0
    }

    /// Like [`Cart::from_json`], also returning how many array entries
    /// were dropped as invalid.
    #[must_use]
    pub fn from_json_lossy(raw: &str) -> (Self, usize) {
        let Ok(Value::Array(entries)) = serde_json::from_str::<Value>(raw) else {
            return (Self::default(), 0);
        };

        let total = entries.len();
        let snapshot: Vec<LineItem> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value::<LineItem>(entry).ok())
            .collect();
        let dropped = total - snapshot.len();
        (Self::new(snapshot), dropped)
    }

    /// Serialize to the persisted JSON array.
    ///
    /// # Errors
    ///
    /// Returns an error if a captured field cannot be serialized.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.items)
    }

    /// Add one unit of `product`.
    ///
    /// Increments the quantity of an existing entry with the same id, or
    /// appends a new entry with quantity 1. Returns the resulting quantity.
    pub fn add(&mut self, product: &Product) -> NonZeroU64 {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id() == product.id()) {
            return existing.add_quantity(NonZeroU64::MIN);
        }
        self.items.push(LineItem::from_product(product));
        NonZeroU64::MIN
    }

    /// Remove the entry for `id`.
    ///
    /// Returns `false` if there was no such entry.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        self.items.len() != before
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of quantities across all entries.
    ///
    /// Recomputed on every call.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.items
            .iter()
            .fold(0_u64, |total, item| total.saturating_add(item.quantity().get()))
    }

    /// The entry for `id`, if any.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// All entries in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct products.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
