//! Cart count display.

use crate::page::SharedPage;

/// Link target of the cart buttons.
pub const CART_HREF: &str = "cart.html";

/// Only labels containing this word are rewritten.
pub const CART_MARKER: &str = "Cart";

/// Shows the cart's derived count somewhere on screen.
pub trait CartDisplay {
    /// Render `count` as the current number of items in the cart.
    fn show_count(&self, count: u64);
}

impl<F: Fn(u64)> CartDisplay for F {
    fn show_count(&self, count: u64) {
        self(count);
    }
}

/// The label a cart link should show, or `None` if the label has no marker.
#[must_use]
pub fn cart_label(label: &str, count: u64) -> Option<String> {
    label
        .contains(CART_MARKER)
        .then(|| format!("{CART_MARKER} ({count})"))
}

/// Rewrites the labels of every cart link on a page.
#[derive(Debug, Clone)]
pub struct CartLinkBadge {
    page: SharedPage,
}

impl CartLinkBadge {
    /// Update cart links on `page`.
    #[must_use]
    pub const fn new(page: SharedPage) -> Self {
        Self { page }
    }
}

impl CartDisplay for CartLinkBadge {
    fn show_count(&self, count: u64) {
        self.page.with(|page| {
            for link in page.links.iter_mut().filter(|l| l.href == CART_HREF) {
                if let Some(label) = cart_label(&link.label, count) {
                    link.label = label;
                }
            }
        });
    }
}
