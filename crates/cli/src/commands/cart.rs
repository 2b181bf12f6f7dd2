//! Cart commands.
//!
//! These run the cart service directly: the count badge and notifications
//! go to the log, and each command writes its result to `out`.

use std::io::Write;
use std::sync::Arc;

use dewdrop_core::{Product, ProductId};
use dewdrop_storefront::cart::CartService;
use dewdrop_storefront::notify::LogNotifier;
use serde_json::Value;
use tracing::info;

use super::{CommandResult, Session};

fn service(session: &Session) -> CartService {
    CartService::load(
        Arc::clone(&session.storage),
        Box::new(|count: u64| info!(count, "Cart updated")),
        Arc::new(LogNotifier),
    )
}

/// Build the product to add: the catalog record when there is one, plus any
/// fields given on the command line.
fn product(session: &Session, id: ProductId, fields: Vec<(String, Value)>) -> Product {
    let base = match session.catalog() {
        Ok(catalog) => catalog.get(&id).map(|card| card.to_product()),
        Err(e) => {
            tracing::warn!("Catalog unavailable, adding bare product: {e}");
            None
        }
    };
    fields
        .into_iter()
        .fold(base.unwrap_or_else(|| Product::new(id)), |product, (key, value)| {
            product.with_field(key, value)
        })
}

/// Display name of a product record, falling back to its id.
fn name_of<'a>(name: Option<&'a Value>, id: &'a ProductId) -> &'a str {
    name.and_then(Value::as_str).unwrap_or_else(|| id.as_str())
}

/// Add one unit of `id`.
///
/// # Errors
///
/// Returns an error if `id` is blank or output cannot be written.
pub fn add(
    session: &Session,
    out: &mut dyn Write,
    id: &str,
    fields: Vec<(String, Value)>,
) -> CommandResult {
    let id = ProductId::parse(id)?;
    let product = product(session, id, fields);
    let quantity = service(session).add_to_cart(&product);
    writeln!(
        out,
        "Added {} (quantity {quantity})",
        name_of(product.field("name"), product.id())
    )?;
    Ok(())
}

/// Remove every unit of `id`.
///
/// # Errors
///
/// Returns an error if `id` is blank or output cannot be written.
pub fn remove(session: &Session, out: &mut dyn Write, id: &str) -> CommandResult {
    let id = ProductId::parse(id)?;
    if service(session).remove_from_cart(&id) {
        writeln!(out, "Removed {id}")?;
    } else {
        writeln!(out, "{id} was not in the cart")?;
    }
    Ok(())
}

/// List the cart's line items.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn show(session: &Session, out: &mut dyn Write) -> CommandResult {
    let service = service(session);
    let cart = service.cart();
    if cart.is_empty() {
        writeln!(out, "Cart is empty")?;
        return Ok(());
    }
    for item in cart.items() {
        writeln!(
            out,
            "{} x{} ({})",
            name_of(item.field("name"), item.id()),
            item.quantity(),
            item.id()
        )?;
    }
    writeln!(out, "Total items: {}", service.count())?;
    Ok(())
}

/// Write the total item count.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn count(session: &Session, out: &mut dyn Write) -> CommandResult {
    writeln!(out, "{}", service(session).count())?;
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn clear(session: &Session, out: &mut dyn Write) -> CommandResult {
    service(session).clear_cart();
    writeln!(out, "Cart cleared")?;
    Ok(())
}
