//! Product records and cart line items.

use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::ProductId;

/// Arbitrary product fields captured alongside the id.
pub type Fields = Map<String, Value>;

/// Keys owned by the cart; never copied from a product record.
const RESERVED_KEYS: &[&str] = &["id", "quantity"];

/// Errors that can occur when building a [`Product`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductError {
    /// The product record is not a JSON object.
    #[error("product record must be a JSON object")]
    NotAnObject,
    /// The product record has no `id` field.
    #[error("product record is missing an id")]
    MissingId,
    /// The `id` field is neither a string nor an integer.
    #[error("product id must be a string or an integer, got {0}")]
    InvalidId(String),
    /// The `id` field is empty or only whitespace.
    #[error("product id cannot be empty")]
    EmptyId,
    /// The input could not be parsed as JSON.
    #[error("invalid product JSON: {0}")]
    Json(String),
}

/// A product record as captured when it is added to the cart.
///
/// The id is mandatory and validated; every other field is carried
/// through untouched so the cart can render whatever the catalog provided.
///
/// ## Examples
///
/// ```
/// use dewdrop_core::Product;
/// use serde_json::json;
///
/// let product = Product::from_value(json!({"id": "a", "name": "Serum"})).unwrap();
/// assert_eq!(product.id().as_str(), "a");
///
/// assert!(Product::from_value(json!({"name": "No id"})).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    fields: Fields,
}

impl Product {
    /// Create a product with no extra fields.
    #[must_use]
    pub fn new(id: ProductId) -> Self {
        Self {
            id,
            fields: Fields::new(),
        }
    }

    /// Add a field to the product.
    ///
    /// `id` and `quantity` are owned by the cart and are ignored here.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if !RESERVED_KEYS.contains(&key.as_str()) {
            self.fields.insert(key, value.into());
        }
        self
    }

    /// Build a product from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not an object, or if its `id` is
    /// missing, blank, or neither a string nor an integer.
    pub fn from_value(value: Value) -> Result<Self, ProductError> {
        let Value::Object(mut fields) = value else {
            return Err(ProductError::NotAnObject);
        };

        let id = match fields.remove("id") {
            None | Some(Value::Null) => return Err(ProductError::MissingId),
            Some(Value::String(s)) => ProductId::parse(&s)?,
            Some(Value::Number(n)) if n.is_i64() || n.is_u64() => {
                serde_json::from_value(Value::Number(n))
                    .map_err(|e| ProductError::InvalidId(e.to_string()))?
            }
            Some(other) => return Err(ProductError::InvalidId(other.to_string())),
        };
        fields.remove("quantity");

        Ok(Self { id, fields })
    }

    /// Parse a product from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::Json`] for malformed JSON, otherwise the
    /// same errors as [`Product::from_value`].
    pub fn from_json(raw: &str) -> Result<Self, ProductError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| ProductError::Json(e.to_string()))?;
        Self::from_value(value)
    }

    /// The product id.
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.id
    }

    /// All non-reserved fields.
    #[must_use]
    pub const fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Look up a single field.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

/// One product entry in the cart plus its quantity.
///
/// Serialized flat, as `{"id": .., "quantity": .., <fields>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    id: ProductId,
    quantity: NonZeroU64,
    #[serde(flatten)]
    fields: Fields,
}

impl LineItem {
    /// A new line item for `product` with quantity 1.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            quantity: NonZeroU64::MIN,
            fields: product.fields.clone(),
        }
    }

    /// The product id.
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.id
    }

    /// The quantity, always at least one.
    #[must_use]
    pub const fn quantity(&self) -> NonZeroU64 {
        self.quantity
    }

    /// Product fields captured when the item was first added.
    #[must_use]
    pub const fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Look up a single field.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Increase the quantity, saturating at `u64::MAX`.
    pub(crate) fn add_quantity(&mut self, amount: NonZeroU64) -> NonZeroU64 {
        self.quantity = self.quantity.saturating_add(amount.get());
        self.quantity
    }
}
