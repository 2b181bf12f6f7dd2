//! Storefront session state.
//!
//! `Storefront` owns everything one shopper's page needs: the cart service,
//! the theme controller, the page itself, notifications, and the catalog
//! filter. Handlers receive it explicitly; there is no global state.

use std::num::NonZeroU64;
use std::sync::Arc;

use dewdrop_core::{Product, ProductId, SortKey, Theme};
use tracing::instrument;

use crate::cart::CartService;
use crate::catalog::ProductFilter;
use crate::config::StorefrontConfig;
use crate::display::CartLinkBadge;
use crate::forms::{self, FormField};
use crate::lazy_images::{Intersection, LazyLoader};
use crate::notify::ToastCenter;
use crate::page::{Page, SharedPage};
use crate::search;
use crate::storage::{KeyValueStore, MemoryStore};
use crate::theme::ThemeController;

/// One shopper's storefront session.
pub struct Storefront {
    cart: CartService,
    theme: ThemeController,
    page: SharedPage,
    toasts: ToastCenter,
    session: Arc<dyn KeyValueStore>,
    lazy: LazyLoader,
    filter: ProductFilter,
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("cart", &self.cart)
            .field("theme", &self.theme)
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

impl Storefront {
    /// Build a session over `storage` with a fresh session store.
    pub fn new(config: &StorefrontConfig, storage: Arc<dyn KeyValueStore>, page: Page) -> Self {
        Self::with_session(config, storage, Arc::new(MemoryStore::new()), page)
    }

    /// Build a session with an explicit session store (the per-tab store
    /// that carries the search query between pages).
    pub fn with_session(
        config: &StorefrontConfig,
        storage: Arc<dyn KeyValueStore>,
        session: Arc<dyn KeyValueStore>,
        page: Page,
    ) -> Self {
        let page = SharedPage::new(page);
        let toasts = ToastCenter::new(config.toast_lifetime, config.toast_overlap);
        let cart = CartService::load(
            Arc::clone(&storage),
            Box::new(CartLinkBadge::new(page.clone())),
            Arc::new(toasts.clone()),
        );
        let theme = ThemeController::load(storage, config.default_theme);

        Self {
            cart,
            theme,
            page,
            toasts,
            session,
            lazy: LazyLoader::new(),
            filter: ProductFilter::default(),
        }
    }

    /// Use a host without intersection support for images.
    #[must_use]
    pub fn without_lazy_loading(mut self) -> Self {
        self.lazy = LazyLoader::unsupported();
        self
    }

    /// Initialise the page: theme, entrance animation, cart count, image
    /// observation, and the initial filter (seeded from a saved search).
    #[instrument(skip(self))]
    pub fn on_page_load(&mut self) {
        if let Some(query) = search::saved_search(self.session.as_ref()) {
            self.filter.search = query;
        }

        let theme = &self.theme;
        let lazy = &mut self.lazy;
        let filter = &self.filter;
        let visible = self.page.with(|page| {
            theme.apply(page);
            page.apply_entrance_animation();
            lazy.observe(&page.images);
            page.apply_filter(filter)
        });
        self.cart.refresh_display();

        tracing::debug!(visible, "Page loaded");
    }

    // -------------------------------------------------------------------------
    // Cart
    // -------------------------------------------------------------------------

    /// Add one unit of `product` to the cart.
    pub fn add_to_cart(&mut self, product: &Product) -> NonZeroU64 {
        self.cart.add_to_cart(product)
    }

    /// Remove `id` from the cart.
    pub fn remove_from_cart(&mut self, id: &ProductId) -> bool {
        self.cart.remove_from_cart(id)
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear_cart();
    }

    /// The cart service.
    #[must_use]
    pub const fn cart(&self) -> &CartService {
        &self.cart
    }

    // -------------------------------------------------------------------------
    // Theme and navigation
    // -------------------------------------------------------------------------

    /// Switch between light and dark.
    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.theme.toggle();
        let controller = &self.theme;
        self.page.with(|page| controller.apply(page));
        theme
    }

    /// The current theme.
    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme.current()
    }

    /// Open or close the mobile menu.
    pub fn toggle_mobile_menu(&self) -> Option<bool> {
        self.page.with(Page::toggle_mobile_menu)
    }

    /// Hand a header search to the products page.
    pub fn submit_search(&self, query: &str) -> Option<&'static str> {
        search::submit_search(query, self.session.as_ref())
    }

    // -------------------------------------------------------------------------
    // Catalog
    // -------------------------------------------------------------------------

    /// Quick category filter from the filter buttons.
    pub fn filter_category(&self, category: &str) {
        self.page.with(|page| page.apply_category(category));
    }

    /// Replace the sidebar filter and apply it. Returns the visible count.
    pub fn set_filter(&mut self, filter: ProductFilter) -> usize {
        self.filter = filter;
        let filter = &self.filter;
        self.page.with(|page| page.apply_filter(filter))
    }

    /// Reset the sidebar filter. Returns the visible count.
    pub fn clear_filters(&mut self) -> usize {
        self.set_filter(ProductFilter::default())
    }

    /// The active sidebar filter.
    #[must_use]
    pub const fn filter(&self) -> &ProductFilter {
        &self.filter
    }

    /// Reorder the product grid.
    pub fn sort(&self, key: SortKey) {
        self.page.with(|page| page.apply_sort(key));
    }

    // -------------------------------------------------------------------------
    // Images and forms
    // -------------------------------------------------------------------------

    /// Handle visibility changes for page images.
    pub fn on_intersection(&mut self, entries: &[Intersection]) -> usize {
        let lazy = &mut self.lazy;
        self.page
            .with(|page| lazy.on_intersection(&mut page.images, entries))
    }

    /// Validate a form before submission.
    #[allow(clippy::unused_self)]
    pub fn validate_form(&self, fields: &mut [FormField]) -> bool {
        forms::validate_form(fields)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The shared page.
    #[must_use]
    pub const fn page(&self) -> &SharedPage {
        &self.page
    }

    /// The notification area.
    #[must_use]
    pub const fn toasts(&self) -> &ToastCenter {
        &self.toasts
    }
}
