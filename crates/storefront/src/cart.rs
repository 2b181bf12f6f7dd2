//! Cart service.
//!
//! Wraps the in-memory [`Cart`] with its collaborators: the cart is loaded
//! from storage once, written back after every mutation, and each mutation
//! refreshes the count display and raises a notification.

use std::num::NonZeroU64;
use std::sync::Arc;

use dewdrop_core::{Cart, Product, ProductId};
use tracing::instrument;

use crate::display::CartDisplay;
use crate::notify::Notifier;
use crate::storage::{KeyValueStore, keys};

/// Notification after a successful add.
pub const ADDED_MESSAGE: &str = "Product added to cart!";

/// Notification after a remove.
pub const REMOVED_MESSAGE: &str = "Product removed from cart!";

/// Notification after the cart is emptied.
pub const CLEARED_MESSAGE: &str = "Cart cleared!";

/// The shopper's cart and the collaborators that mirror it.
pub struct CartService {
    cart: Cart,
    storage: Arc<dyn KeyValueStore>,
    display: Box<dyn CartDisplay>,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for CartService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartService")
            .field("cart", &self.cart)
            .finish_non_exhaustive()
    }
}

impl CartService {
    /// Load the persisted cart.
    ///
    /// A missing, unreadable, or malformed value gives an empty cart.
    /// Entries that are not valid line items are dropped with a warning.
    pub fn load(
        storage: Arc<dyn KeyValueStore>,
        display: Box<dyn CartDisplay>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let cart = match storage.get(keys::CART) {
            Ok(Some(raw)) => {
                let (cart, dropped) = Cart::from_json_lossy(&raw);
                if dropped > 0 {
                    tracing::warn!(dropped, "Dropped invalid entries from saved cart");
                }
                cart
            }
            Ok(None) => Cart::default(),
            Err(e) => {
                tracing::warn!("Failed to read saved cart, starting empty: {e}");
                Cart::default()
            }
        };
        tracing::debug!(items = cart.len(), count = cart.count(), "Cart loaded");
        Self::with_cart(cart, storage, display, notifier)
    }

    /// Start from an explicit snapshot instead of storage.
    ///
    /// Nothing is written until the first mutation.
    pub fn with_cart(
        cart: Cart,
        storage: Arc<dyn KeyValueStore>,
        display: Box<dyn CartDisplay>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            cart,
            storage,
            display,
            notifier,
        }
    }

    /// Add one unit of `product`. Returns its new quantity.
    #[instrument(skip(self, product), fields(product_id = %product.id()))]
    pub fn add_to_cart(&mut self, product: &Product) -> NonZeroU64 {
        let quantity = self.cart.add(product);
        tracing::debug!(quantity = quantity.get(), "Added to cart");
        self.after_mutation(ADDED_MESSAGE);
        quantity
    }

    /// Remove `id` from the cart. Returns whether it was present.
    ///
    /// Removing an absent id changes nothing in the cart, but storage,
    /// display and notification are still refreshed.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub fn remove_from_cart(&mut self, id: &ProductId) -> bool {
        let removed = self.cart.remove(id);
        tracing::debug!(removed, "Removed from cart");
        self.after_mutation(REMOVED_MESSAGE);
        removed
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.after_mutation(CLEARED_MESSAGE);
    }

    /// The derived item count.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.cart.count()
    }

    /// The current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Push the current count to the display.
    pub fn refresh_display(&self) {
        self.display.show_count(self.cart.count());
    }

    fn after_mutation(&self, message: &str) {
        self.persist();
        self.refresh_display();
        self.notifier.notify(message);
    }

    fn persist(&self) {
        let raw = match self.cart.to_json() {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!("Failed to serialize cart: {e}");
                return;
            }
        };
        if let Err(e) = self.storage.set(keys::CART, &raw) {
            tracing::warn!("Failed to save cart: {e}");
        }
    }
}
