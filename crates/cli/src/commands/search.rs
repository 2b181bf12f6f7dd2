//! Search hand-off command.

use std::io::Write;

use dewdrop_storefront::search;

use super::{CommandResult, Session};

/// Save `query` for the next `products` listing.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn submit(session: &Session, out: &mut dyn Write, query: &str) -> CommandResult {
    match search::submit_search(query, session.session.as_ref()) {
        Some(page) => {
            tracing::debug!(query, page, "Search handed off");
            writeln!(out, "Search saved; run `dewdrop products` to see results")?;
        }
        None => writeln!(out, "Empty search ignored")?,
    }
    Ok(())
}
