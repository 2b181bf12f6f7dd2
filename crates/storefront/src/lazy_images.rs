//! Deferred image loading.
//!
//! Images start with only a `data_src`. Once the host reports that an
//! observed image has scrolled into view, its real source is set and it is
//! no longer observed.

use std::collections::BTreeSet;

/// An image whose source may be deferred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LazyImage {
    /// Source to load once visible.
    pub data_src: Option<String>,
    /// Source currently loaded.
    pub src: Option<String>,
    /// Whether the placeholder styling is applied.
    pub lazy: bool,
}

impl LazyImage {
    /// An image that should load `url` once visible.
    #[must_use]
    pub fn deferred(url: &str) -> Self {
        Self {
            data_src: Some(url.to_string()),
            src: None,
            lazy: true,
        }
    }

    /// An image that is already loaded.
    #[must_use]
    pub fn eager(url: &str) -> Self {
        Self {
            data_src: None,
            src: Some(url.to_string()),
            lazy: false,
        }
    }
}

/// A visibility change reported by the host for the image at `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intersection {
    pub index: usize,
    pub is_intersecting: bool,
}

/// Tracks which images are waiting to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LazyLoader {
    supported: bool,
    observed: BTreeSet<usize>,
}

impl Default for LazyLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl LazyLoader {
    /// A loader for a host that reports intersections.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            supported: true,
            observed: BTreeSet::new(),
        }
    }

    /// A loader for a host without intersection support. Nothing is ever
    /// observed, so deferred images keep their placeholder.
    #[must_use]
    pub const fn unsupported() -> Self {
        Self {
            supported: false,
            observed: BTreeSet::new(),
        }
    }

    /// Start observing every image that has a deferred source.
    ///
    /// Returns the number of images now observed.
    pub fn observe(&mut self, images: &[LazyImage]) -> usize {
        if !self.supported {
            return 0;
        }
        self.observed.extend(
            images
                .iter()
                .enumerate()
                .filter(|(_, image)| image.data_src.is_some())
                .map(|(index, _)| index),
        );
        self.observed.len()
    }

    /// Whether the image at `index` is still waiting to load.
    #[must_use]
    pub fn is_observing(&self, index: usize) -> bool {
        self.observed.contains(&index)
    }

    /// Load every observed image that became visible.
    ///
    /// Returns the number of images loaded.
    pub fn on_intersection(&mut self, images: &mut [LazyImage], entries: &[Intersection]) -> usize {
        let mut loaded = 0;
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            if !self.observed.contains(&entry.index) {
                continue;
            }
            let Some(image) = images.get_mut(entry.index) else {
                self.observed.remove(&entry.index);
                continue;
            };
            if let Some(src) = image.data_src.clone() {
                image.src = Some(src);
            }
            image.lazy = false;
            self.observed.remove(&entry.index);
            loaded += 1;
        }
        if loaded > 0 {
            tracing::debug!(loaded, remaining = self.observed.len(), "Loaded lazy images");
        }
        loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images() -> Vec<LazyImage> {
        vec![
            LazyImage::deferred("a.jpg"),
            LazyImage::eager("logo.svg"),
            LazyImage::deferred("b.jpg"),
        ]
    }

    const fn seen(index: usize) -> Intersection {
        Intersection {
            index,
            is_intersecting: true,
        }
    }

    #[test]
    fn test_observe_only_deferred() {
        let mut loader = LazyLoader::new();
        assert_eq!(loader.observe(&images()), 2);
        assert!(loader.is_observing(0));
        assert!(!loader.is_observing(1));
        assert!(loader.is_observing(2));
    }

    #[test]
    fn test_intersection_loads_and_unobserves() {
        let mut images = images();
        let mut loader = LazyLoader::new();
        loader.observe(&images);

        assert_eq!(loader.on_intersection(&mut images, &[seen(2)]), 1);
        assert_eq!(images[2].src.as_deref(), Some("b.jpg"));
        assert!(!images[2].lazy);
        assert!(!loader.is_observing(2));

        // Image 0 untouched.
        assert!(images[0].src.is_none());
        assert!(images[0].lazy);
    }

    #[test]
    fn test_non_intersecting_entries_ignored() {
        let mut images = images();
        let mut loader = LazyLoader::new();
        loader.observe(&images);

        let entry = Intersection {
            index: 0,
            is_intersecting: false,
        };
        assert_eq!(loader.on_intersection(&mut images, &[entry]), 0);
        assert!(loader.is_observing(0));
    }

    #[test]
    fn test_repeat_intersection_loads_once() {
        let mut images = images();
        let mut loader = LazyLoader::new();
        loader.observe(&images);

        assert_eq!(loader.on_intersection(&mut images, &[seen(0)]), 1);
        assert_eq!(loader.on_intersection(&mut images, &[seen(0)]), 0);
    }

    #[test]
    fn test_unobserved_index_ignored() {
        let mut images = images();
        let mut loader = LazyLoader::new();
        loader.observe(&images);

        assert_eq!(loader.on_intersection(&mut images, &[seen(1), seen(42)]), 0);
        assert_eq!(images[1].src.as_deref(), Some("logo.svg"));
    }

    #[test]
    fn test_unsupported_host_never_loads() {
        let mut images = images();
        let mut loader = LazyLoader::unsupported();

        assert_eq!(loader.observe(&images), 0);
        assert_eq!(loader.on_intersection(&mut images, &[seen(0)]), 0);
        assert!(images[0].lazy);
    }
}
