//! Theme toggle with persisted preference.

use std::sync::Arc;

use dewdrop_core::{Theme, ThemeIcon};
use tracing::instrument;

use crate::page::Page;
use crate::storage::{KeyValueStore, keys};

/// Owns the current theme and keeps it in storage.
pub struct ThemeController {
    storage: Arc<dyn KeyValueStore>,
    theme: Theme,
}

impl std::fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeController")
            .field("theme", &self.theme)
            .finish_non_exhaustive()
    }
}

impl ThemeController {
    /// Load the saved theme, falling back to `default` when nothing valid
    /// is stored.
    pub fn load(storage: Arc<dyn KeyValueStore>, default: Theme) -> Self {
        let theme = match storage.get(keys::THEME) {
            Ok(Some(saved)) => saved.parse().unwrap_or_else(|e| {
                tracing::warn!("Ignoring saved theme: {e}");
                default
            }),
            Ok(None) => default,
            Err(e) => {
                tracing::warn!("Failed to read saved theme: {e}");
                default
            }
        };
        Self { storage, theme }
    }

    /// The current theme.
    #[must_use]
    pub const fn current(&self) -> Theme {
        self.theme
    }

    /// The toggle icon for the current theme.
    #[must_use]
    pub const fn icon(&self) -> ThemeIcon {
        self.theme.icon()
    }

    /// Switch theme and save it. Returns the new theme.
    #[instrument(skip(self), fields(from = %self.theme))]
    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        if let Err(e) = self.storage.set(keys::THEME, self.theme.as_str()) {
            tracing::warn!("Failed to save theme: {e}");
        }
        tracing::debug!(theme = %self.theme, "Theme toggled");
        self.theme
    }

    /// Write the theme and toggle icon into the page.
    pub fn apply(&self, page: &mut Page) {
        page.theme = Some(self.theme);
        if let Some(icon) = page.theme_toggle.as_mut() {
            *icon = self.theme.icon();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_default_when_unsaved() {
        let controller = ThemeController::load(Arc::new(MemoryStore::new()), Theme::Light);
        assert_eq!(controller.current(), Theme::Light);
        assert_eq!(controller.icon(), ThemeIcon::Sun);
    }

    #[test]
    fn test_loads_saved_theme() {
        let storage = Arc::new(MemoryStore::with_entries([(keys::THEME, "dark")]));
        let controller = ThemeController::load(storage, Theme::Light);
        assert_eq!(controller.current(), Theme::Dark);
    }

    #[test]
    fn test_unknown_saved_theme_uses_default() {
        let storage = Arc::new(MemoryStore::with_entries([(keys::THEME, "neon")]));
        let controller = ThemeController::load(storage, Theme::Dark);
        assert_eq!(controller.current(), Theme::Dark);
    }

    #[test]
    fn test_toggle_persists() {
        let storage = Arc::new(MemoryStore::new());
        let mut controller = ThemeController::load(storage.clone(), Theme::Light);

        assert_eq!(controller.toggle(), Theme::Dark);
        assert_eq!(storage.get(keys::THEME).unwrap().as_deref(), Some("dark"));
        assert_eq!(controller.icon(), ThemeIcon::Moon);

        assert_eq!(controller.toggle(), Theme::Light);
        assert_eq!(storage.get(keys::THEME).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_apply_updates_page() {
        let storage = Arc::new(MemoryStore::with_entries([(keys::THEME, "dark")]));
        let controller = ThemeController::load(storage, Theme::Light);
        let mut page = Page::new().with_theme_toggle();

        controller.apply(&mut page);
        assert_eq!(page.theme, Some(Theme::Dark));
        assert_eq!(page.theme_toggle, Some(ThemeIcon::Moon));
    }

    #[test]
    fn test_apply_without_toggle_button() {
        let controller = ThemeController::load(Arc::new(MemoryStore::new()), Theme::Light);
        let mut page = Page::new();

        controller.apply(&mut page);
        assert_eq!(page.theme, Some(Theme::Light));
        assert!(page.theme_toggle.is_none());
    }
}
