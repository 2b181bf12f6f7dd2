//! Dewdrop Core - Shared types library.
//!
//! This crate provides common types used across all Dewdrop components:
//! - `storefront` - Cart, theme, catalog and page logic
//! - `cli` - Command-line driver over file-backed storage
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! timers. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product ids and records, the cart, prices, emails, and
//!   display preferences

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
