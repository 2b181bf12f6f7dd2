//! Dewdrop storefront library.
//!
//! The shopper-facing behaviour of the storefront: a persisted cart with
//! count display and notifications, the theme toggle, catalog filtering and
//! sorting, lazy images, form validation, and the search hand-off. Hosts
//! (the CLI, tests) drive it through [`state::Storefront`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod display;
pub mod error;
pub mod forms;
pub mod lazy_images;
pub mod notify;
pub mod page;
pub mod search;
pub mod state;
pub mod storage;
pub mod theme;
