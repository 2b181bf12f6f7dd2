//! Core types for the Dewdrop storefront.
//!
//! This module provides type-safe wrappers for the storefront's domain
//! concepts.

pub mod cart;
pub mod email;
pub mod id;
pub mod price;
pub mod product;
pub mod sort;
pub mod theme;

pub use cart::Cart;
pub use email::{Email, EmailError};
pub use id::ProductId;
pub use price::{Price, parse_decimal};
pub use product::{Fields, LineItem, Product, ProductError};
pub use sort::SortKey;
pub use theme::{Theme, ThemeIcon};
