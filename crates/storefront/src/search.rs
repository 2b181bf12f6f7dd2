//! Search box hand-off to the product listing.
//!
//! The header search box does not search itself: it stashes the query in
//! session storage and sends the shopper to the products page, which picks
//! the query up as its initial search filter.

use crate::storage::{KeyValueStore, keys};

/// Page the search box navigates to.
pub const PRODUCTS_PAGE: &str = "products.html";

/// Submit a search.
///
/// Returns the page to navigate to, or `None` for a blank query. A failure
/// to save the query is logged and the navigation still happens.
pub fn submit_search(query: &str, session: &dyn KeyValueStore) -> Option<&'static str> {
    if query.trim().is_empty() {
        return None;
    }
    if let Err(e) = session.set(keys::SEARCH_QUERY, query) {
        tracing::warn!("Failed to save search query: {e}");
    }
    Some(PRODUCTS_PAGE)
}

/// The query saved by the last [`submit_search`], if any.
#[must_use]
pub fn saved_search(session: &dyn KeyValueStore) -> Option<String> {
    match session.get(keys::SEARCH_QUERY) {
        Ok(query) => query.filter(|q| !q.trim().is_empty()),
        Err(e) => {
            tracing::warn!("Failed to read search query: {e}");
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_blank_query_is_noop() {
        let session = MemoryStore::new();
        assert_eq!(submit_search("   ", &session), None);
        assert_eq!(session.get(keys::SEARCH_QUERY).unwrap(), None);
    }

    #[test]
    fn test_query_saved_and_navigates() {
        let session = MemoryStore::new();
        assert_eq!(submit_search("vitamin c", &session), Some(PRODUCTS_PAGE));
        assert_eq!(saved_search(&session).as_deref(), Some("vitamin c"));
    }

    #[test]
    fn test_saved_search_empty_session() {
        assert_eq!(saved_search(&MemoryStore::new()), None);
    }
}
