//! Theme commands.

use std::io::Write;
use std::sync::Arc;

use dewdrop_storefront::theme::ThemeController;

use super::{CommandResult, Session};

fn controller(session: &Session) -> ThemeController {
    ThemeController::load(Arc::clone(&session.storage), session.config.default_theme)
}

/// Write the current theme.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn show(session: &Session, out: &mut dyn Write) -> CommandResult {
    writeln!(out, "{}", controller(session).current())?;
    Ok(())
}

/// Switch between light and dark and write the new theme.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn toggle(session: &Session, out: &mut dyn Write) -> CommandResult {
    writeln!(out, "{}", controller(session).toggle())?;
    Ok(())
}
