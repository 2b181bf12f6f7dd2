//! Product identifiers.
//!
//! Catalog and cart entries are keyed by an opaque id. Saved carts and
//! catalogs may carry ids as JSON strings or integers; both are accepted
//! and written back in the form they arrived in. The only constraint is
//! that a string id is not blank.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::product::ProductError;

/// A non-blank product identifier.
///
/// ## Examples
///
/// ```
/// use dewdrop_core::ProductId;
///
/// assert!(ProductId::parse("serum-01").is_ok());
/// assert!(ProductId::parse("").is_err());
/// assert!(ProductId::parse("   ").is_err());
///
/// // Integer ids compare equal to their decimal text.
/// assert_eq!(ProductId::from_integer(7), ProductId::parse("7").unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct ProductId {
    raw: String,
    integer: bool,
}

impl ProductId {
    /// Parse a `ProductId` from a string.
    ///
    /// The id is stored verbatim; surrounding whitespace is not stripped
    /// so that ids round-trip exactly through storage.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::EmptyId`] if the input is empty or only
    /// whitespace.
    pub fn parse(s: &str) -> Result<Self, ProductError> {
        if s.trim().is_empty() {
            return Err(ProductError::EmptyId);
        }
        Ok(Self {
            raw: s.to_owned(),
            integer: false,
        })
    }

    /// An id that is serialized as a JSON integer.
    #[must_use]
    pub fn from_integer(n: impl Into<i128>) -> Self {
        Self {
            raw: n.into().to_string(),
            integer: true,
        }
    }

    /// Whether this id is written to JSON as an integer.
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        self.integer
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Consumes the id and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.raw
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl std::str::FromStr for ProductId {
    type Err = ProductError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

// Identity is the textual form; `integer` only decides the JSON encoding.
impl PartialEq for ProductId {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for ProductId {}

impl Hash for ProductId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl PartialOrd for ProductId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ProductId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl Serialize for ProductId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.integer {
            if let Ok(n) = self.raw.parse::<i64>() {
                return serializer.serialize_i64(n);
            }
            if let Ok(n) = self.raw.parse::<u64>() {
                return serializer.serialize_u64(n);
            }
        }
        serializer.serialize_str(&self.raw)
    }
}

struct ProductIdVisitor;

impl Visitor<'_> for ProductIdVisitor {
    type Value = ProductId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-blank string or an integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        ProductId::parse(v).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(ProductId::from_integer(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(ProductId::from_integer(v))
    }
}

// Strings go through `parse` so a stored blank id is rejected.
impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ProductIdVisitor)
    }
}
