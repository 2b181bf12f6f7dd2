//! In-process model of the rendered storefront page.
//!
//! Only the parts the storefront logic reads or rewrites are modelled:
//! cart links, the theme toggle, the product grid, category filter buttons,
//! the results counter, the mobile nav menu, and images. Optional elements
//! are `Option`s; updates aimed at a missing element are skipped.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use dewdrop_core::{SortKey, Theme, ThemeIcon};

use crate::catalog::{self, ProductCard, ProductFilter};
use crate::lazy_images::LazyImage;

/// Entrance animation stagger between consecutive cards.
pub const FADE_IN_STEP: Duration = Duration::from_millis(100);

/// A navigation link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub label: String,
}

/// A product card in the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub card: ProductCard,
    pub visible: bool,
    pub fade_in: bool,
    pub animation_delay: Duration,
}

/// A category filter button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterButton {
    pub category: String,
    pub active: bool,
}

/// The storefront page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// The root `data-theme` attribute.
    pub theme: Option<Theme>,
    /// Icon on the theme toggle; `None` if the page has no toggle.
    pub theme_toggle: Option<ThemeIcon>,
    pub links: Vec<Link>,
    pub cards: Vec<CardView>,
    pub filter_buttons: Vec<FilterButton>,
    /// Text of the results counter; `None` if the page has no counter.
    pub results_count: Option<String>,
    /// Whether the mobile nav menu is open; `None` if there is no menu.
    pub mobile_menu_open: Option<bool>,
    pub images: Vec<LazyImage>,
}

impl Page {
    /// An empty page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a navigation link.
    #[must_use]
    pub fn with_link(mut self, href: &str, label: &str) -> Self {
        self.links.push(Link {
            href: href.to_string(),
            label: label.to_string(),
        });
        self
    }

    /// Add the theme toggle button.
    #[must_use]
    pub const fn with_theme_toggle(mut self) -> Self {
        self.theme_toggle = Some(ThemeIcon::Sun);
        self
    }

    /// Add the product grid. Cards with an image also get a deferred image.
    #[must_use]
    pub fn with_cards(mut self, cards: impl IntoIterator<Item = ProductCard>) -> Self {
        for card in cards {
            if let Some(url) = &card.image {
                self.images.push(LazyImage::deferred(url));
            }
            self.cards.push(CardView {
                card,
                visible: true,
                fade_in: false,
                animation_delay: Duration::ZERO,
            });
        }
        self
    }

    /// Add one filter button per category.
    #[must_use]
    pub fn with_filter_buttons(mut self, categories: &[&str]) -> Self {
        self.filter_buttons
            .extend(categories.iter().map(|category| FilterButton {
                category: (*category).to_string(),
                active: false,
            }));
        self
    }

    /// Add the results counter.
    #[must_use]
    pub fn with_results_count(mut self) -> Self {
        self.results_count = Some(String::new());
        self
    }

    /// Add the collapsible mobile nav menu (closed).
    #[must_use]
    pub const fn with_nav_menu(mut self) -> Self {
        self.mobile_menu_open = Some(false);
        self
    }

    /// Add an image that is not part of a product card.
    #[must_use]
    pub fn with_image(mut self, image: LazyImage) -> Self {
        self.images.push(image);
        self
    }

    /// Open or close the mobile menu. Returns the new state.
    pub fn toggle_mobile_menu(&mut self) -> Option<bool> {
        let open = self.mobile_menu_open.as_mut()?;
        *open = !*open;
        Some(*open)
    }

    /// Stagger card entrance animations in grid order.
    pub fn apply_entrance_animation(&mut self) {
        let mut delay = Duration::ZERO;
        for view in &mut self.cards {
            view.animation_delay = delay;
            view.fade_in = true;
            delay += FADE_IN_STEP;
        }
    }

    /// Show only cards in `category` (or all, for `"all"`) and mark the
    /// matching filter button active.
    pub fn apply_category(&mut self, category: &str) {
        for view in &mut self.cards {
            view.visible = catalog::category_matches(category, &view.card);
        }
        for button in &mut self.filter_buttons {
            button.active = button.category == category;
        }
    }

    /// Apply the sidebar filter and update the results counter.
    ///
    /// Returns the number of visible cards.
    pub fn apply_filter(&mut self, filter: &ProductFilter) -> usize {
        let mut visible = 0;
        for view in &mut self.cards {
            view.visible = filter.matches(&view.card);
            if view.visible {
                visible += 1;
            }
        }
        let total = self.cards.len();
        if let Some(label) = self.results_count.as_mut() {
            *label = catalog::results_label(visible, total);
        }
        visible
    }

    /// Reorder the grid.
    pub fn apply_sort(&mut self, key: SortKey) {
        catalog::sort_by_key(&mut self.cards, key, |view| &view.card);
    }

    /// Cards currently shown, in grid order.
    pub fn visible_cards(&self) -> impl Iterator<Item = &ProductCard> {
        self.cards.iter().filter(|v| v.visible).map(|v| &v.card)
    }
}

/// A page shared between the storefront and its display collaborators.
#[derive(Debug, Clone, Default)]
pub struct SharedPage(Arc<Mutex<Page>>);

impl SharedPage {
    /// Wrap a page.
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self(Arc::new(Mutex::new(page)))
    }

    /// Run `f` with mutable access to the page.
    pub fn with<R>(&self, f: impl FnOnce(&mut Page) -> R) -> R {
        let mut page = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut page)
    }

    /// A copy of the current page.
    #[must_use]
    pub fn snapshot(&self) -> Page {
        self.with(|page| page.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::tests::card;

    fn grid() -> Page {
        Page::new()
            .with_cards([
                card("a", "Serum", "serums", "30", "4.5", &["oily"]),
                card("b", "Cleanser", "cleansers", "12", "4.0", &["dry"]),
                card("c", "Toner", "serums", "18", "4.8", &["oily", "combination"]),
            ])
            .with_filter_buttons(&["all", "serums", "cleansers"])
            .with_results_count()
    }

    fn visible_ids(page: &Page) -> Vec<&str> {
        page.visible_cards().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_entrance_animation_staggers() {
        let mut page = grid();
        page.apply_entrance_animation();

        let delays: Vec<u128> = page
            .cards
            .iter()
            .map(|v| v.animation_delay.as_millis())
            .collect();
        assert_eq!(delays, [0, 100, 200]);
        assert!(page.cards.iter().all(|v| v.fade_in));
    }

    #[test]
    fn test_apply_category() {
        let mut page = grid();
        page.apply_category("serums");

        assert_eq!(visible_ids(&page), ["a", "c"]);
        let active: Vec<&str> = page
            .filter_buttons
            .iter()
            .filter(|b| b.active)
            .map(|b| b.category.as_str())
            .collect();
        assert_eq!(active, ["serums"]);

        page.apply_category("all");
        assert_eq!(visible_ids(&page), ["a", "b", "c"]);
    }

    #[test]
    fn test_apply_filter_updates_counter() {
        let mut page = grid();
        let filter = ProductFilter {
            skin: "oily".to_string(),
            ..ProductFilter::default()
        };

        assert_eq!(page.apply_filter(&filter), 2);
        assert_eq!(
            page.results_count.as_deref(),
            Some("Showing 2 of 3 products")
        );
    }

    #[test]
    fn test_apply_filter_without_counter() {
        let mut page = grid();
        page.results_count = None;
        assert_eq!(page.apply_filter(&ProductFilter::default()), 3);
        assert!(page.results_count.is_none());
    }

    #[test]
    fn test_apply_sort() {
        let mut page = grid();
        page.apply_sort(SortKey::PriceLow);
        let order: Vec<&str> = page.cards.iter().map(|v| v.card.id.as_str()).collect();
        assert_eq!(order, ["b", "c", "a"]);
    }

    #[test]
    fn test_toggle_mobile_menu() {
        let mut page = Page::new().with_nav_menu();
        assert_eq!(page.toggle_mobile_menu(), Some(true));
        assert_eq!(page.toggle_mobile_menu(), Some(false));
    }

    #[test]
    fn test_toggle_missing_mobile_menu() {
        let mut page = Page::new();
        assert_eq!(page.toggle_mobile_menu(), None);
    }

    #[test]
    fn test_card_images_are_deferred() {
        let mut serum = card("a", "Serum", "serums", "30", "4.5", &[]);
        serum.image = Some("img/serum.jpg".to_string());
        let page = Page::new().with_cards([serum]);

        assert_eq!(page.images.len(), 1);
        assert_eq!(page.images[0].data_src.as_deref(), Some("img/serum.jpg"));
        assert!(page.images[0].src.is_none());
    }

    #[test]
    fn test_shared_page_mutation_is_visible() {
        let shared = SharedPage::new(Page::new().with_nav_menu());
        let other = shared.clone();
        other.with(Page::toggle_mobile_menu);
        assert_eq!(shared.snapshot().mobile_menu_open, Some(true));
    }
}
