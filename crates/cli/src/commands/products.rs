//! Catalog listing command.

use std::io::Write;

use dewdrop_core::SortKey;
use dewdrop_storefront::catalog::ProductFilter;
use dewdrop_storefront::display::CART_HREF;
use dewdrop_storefront::page::Page;
use dewdrop_storefront::state::Storefront;

use super::{CommandResult, Session};

/// List catalog products matching the filters, in the requested order.
///
/// Without `--search`, the query saved by `dewdrop search` is used.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or output cannot be
/// written.
pub fn list(
    session: &Session,
    out: &mut dyn Write,
    category: String,
    skin: String,
    search: Option<String>,
    sort: &str,
) -> CommandResult {
    let catalog = session.catalog()?;
    let page = Page::new()
        .with_link(CART_HREF, "Cart")
        .with_results_count()
        .with_cards(catalog.into_cards());

    let mut shop = Storefront::with_session(
        &session.config,
        session.storage.clone(),
        session.session.clone(),
        page,
    );
    shop.on_page_load();

    let search = search.unwrap_or_else(|| shop.filter().search.clone());
    shop.set_filter(ProductFilter {
        category,
        skin,
        search,
    });
    shop.sort(SortKey::parse(sort));

    let page = shop.page().snapshot();
    for card in page.visible_cards() {
        let price = card
            .parsed_price()
            .map_or_else(|| card.price.clone(), |p| p.to_string());
        writeln!(
            out,
            "{:<16} {:<32} {:<12} {:>8}  {}",
            card.id.as_str(),
            card.name,
            card.category,
            price,
            card.rating
        )?;
    }
    if let Some(label) = page.results_count {
        writeln!(out, "{label}")?;
    }
    if let Some(cart) = page.links.first() {
        writeln!(out, "{}", cart.label)?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::tests::{output, session};
    use crate::commands::{cart, search as search_cmd};

    fn ids(listing: &str) -> Vec<&str> {
        listing
            .lines()
            .take_while(|line| !line.starts_with("Showing"))
            .filter_map(|line| line.split_whitespace().next())
            .collect()
    }

    fn all(session: &Session, sort: &str) -> String {
        output(|out| list(session, out, "all".into(), "all".into(), None, sort))
    }

    #[test]
    fn test_lists_everything_with_summary() {
        let (_dir, session) = session();
        let listing = all(&session, "");

        assert_eq!(ids(&listing), ["serum-01", "clean-01", "7"]);
        assert!(listing.contains("$30.00"));
        assert!(listing.ends_with("Showing 3 of 3 products\nCart (0)\n"));
    }

    #[test]
    fn test_filters_and_sort() {
        let (_dir, session) = session();
        let listing = output(|out| {
            list(&session, out, "all".into(), "dry".into(), None, "price-high")
        });
        assert_eq!(ids(&listing), ["7", "clean-01"]);
        assert!(listing.contains("Showing 2 of 3 products"));

        let listing = output(|out| {
            list(&session, out, "serums".into(), "all".into(), None, "name")
        });
        assert_eq!(ids(&listing), ["7", "serum-01"]);
    }

    #[test]
    fn test_saved_search_applies_until_overridden() {
        let (_dir, session) = session();
        output(|out| search_cmd::submit(&session, out, "serum"));

        assert_eq!(ids(&all(&session, "")), ["serum-01", "7"]);

        let listing = output(|out| {
            list(&session, out, "all".into(), "all".into(), Some("cleanser".into()), "")
        });
        assert_eq!(ids(&listing), ["clean-01"]);
    }

    #[test]
    fn test_cart_badge_reflects_saved_cart() {
        let (_dir, session) = session();
        output(|out| cart::add(&session, out, "serum-01", Vec::new()));
        output(|out| cart::add(&session, out, "7", Vec::new()));

        assert!(all(&session, "").ends_with("Cart (2)\n"));
    }
}
