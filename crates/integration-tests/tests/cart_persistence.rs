//! Integration tests for cart and theme persistence on disk.
//!
//! Each "page load" opens a fresh store handle over the same data
//! directory, the way a reload reads browser storage again.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use dewdrop_core::{Product, ProductId, Theme, ThemeIcon};
use dewdrop_integration_tests::TestContext;
use dewdrop_storefront::cart::CartService;
use dewdrop_storefront::notify::LogNotifier;
use dewdrop_storefront::page::Page;
use dewdrop_storefront::state::Storefront;
use dewdrop_storefront::storage::keys;
use dewdrop_storefront::theme::ThemeController;

fn load_cart(ctx: &TestContext) -> CartService {
    CartService::load(
        ctx.storage().unwrap(),
        Box::new(|_count: u64| {}),
        Arc::new(LogNotifier),
    )
}

fn product(id: &str) -> Product {
    Product::new(ProductId::parse(id).unwrap())
}

// =============================================================================
// Cart
// =============================================================================

#[test]
fn test_cart_survives_reload() {
    let ctx = TestContext::new().unwrap();

    let mut cart = load_cart(&ctx);
    cart.add_to_cart(&product("serum-01").with_field("name", "Vitamin C Serum"));
    cart.add_to_cart(&product("serum-01"));
    cart.add_to_cart(&product("toner-01"));

    let reloaded = load_cart(&ctx);
    assert_eq!(reloaded.count(), 3);
    assert_eq!(reloaded.cart(), cart.cart());

    let serum = reloaded
        .cart()
        .get(&ProductId::parse("serum-01").unwrap())
        .unwrap();
    assert_eq!(serum.quantity().get(), 2);
    assert_eq!(serum.field("name").unwrap(), "Vitamin C Serum");
}

#[test]
fn test_saved_cart_is_flat_json() {
    let ctx = TestContext::new().unwrap();
    let mut cart = load_cart(&ctx);
    cart.add_to_cart(&product("clean-01").with_field("price", "12.50"));

    let raw = ctx.storage().unwrap().get(keys::CART).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{"id": "clean-01", "quantity": 1, "price": "12.50"}])
    );
}

#[test]
fn test_remove_and_clear_survive_reload() {
    let ctx = TestContext::new().unwrap();
    let mut cart = load_cart(&ctx);
    cart.add_to_cart(&product("a"));
    cart.add_to_cart(&product("b"));
    cart.remove_from_cart(&ProductId::parse("a").unwrap());

    let mut reloaded = load_cart(&ctx);
    let ids: Vec<&str> = reloaded
        .cart()
        .items()
        .iter()
        .map(|i| i.id().as_str())
        .collect();
    assert_eq!(ids, ["b"]);

    reloaded.clear_cart();
    assert!(load_cart(&ctx).cart().is_empty());
}

#[test]
fn test_corrupt_cart_file_loads_empty() {
    let ctx = TestContext::new().unwrap();
    ctx.storage()
        .unwrap()
        .set(keys::CART, r#"[{"id":"a","quantity":"#)
        .unwrap();

    let mut cart = load_cart(&ctx);
    assert!(cart.cart().is_empty());

    cart.add_to_cart(&product("a"));
    assert_eq!(load_cart(&ctx).count(), 1);
}

#[test]
fn test_partially_valid_cart_keeps_good_entries() {
    let ctx = TestContext::new().unwrap();
    ctx.storage()
        .unwrap()
        .set(
            keys::CART,
            r#"[{"id":"a","quantity":2},{"quantity":1},{"id":"b","quantity":0},{"id":"a","quantity":1}]"#,
        )
        .unwrap();

    let cart = load_cart(&ctx);
    assert_eq!(cart.cart().len(), 1);
    assert_eq!(cart.count(), 3);
}

// =============================================================================
// Theme
// =============================================================================

#[test]
fn test_theme_survives_reload() {
    let ctx = TestContext::new().unwrap();

    let mut theme = ThemeController::load(ctx.storage().unwrap(), Theme::Light);
    assert_eq!(theme.toggle(), Theme::Dark);

    let reloaded = ThemeController::load(ctx.storage().unwrap(), Theme::Light);
    assert_eq!(reloaded.current(), Theme::Dark);
    assert_eq!(reloaded.icon(), ThemeIcon::Moon);
}

#[test]
fn test_storefront_reload_restores_badge_and_theme() {
    let ctx = TestContext::new().unwrap();
    let page = || {
        Page::new()
            .with_theme_toggle()
            .with_link("cart.html", "Cart")
    };

    let mut first = Storefront::new(&ctx.config, ctx.storage().unwrap(), page());
    first.on_page_load();
    first.add_to_cart(&product("serum-01"));
    first.add_to_cart(&product("serum-01"));
    first.toggle_theme();

    let mut second = Storefront::new(&ctx.config, ctx.storage().unwrap(), page());
    second.on_page_load();
    let snapshot = second.page().snapshot();
    assert_eq!(snapshot.links[0].label, "Cart (2)");
    assert_eq!(snapshot.theme, Some(Theme::Dark));
    assert_eq!(snapshot.theme_toggle, Some(ThemeIcon::Moon));
}
