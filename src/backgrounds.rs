//! Built-in flyer backgrounds.
//!
//! Paths are site-relative and resolve against the configured asset root
//! (see [`crate::loader::UrlImageLoader`]).

use serde::Serialize;

/// A named background image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BackgroundPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub path: &'static str,
}

const fn preset(id: &'static str, name: &'static str, path: &'static str) -> BackgroundPreset {
    BackgroundPreset { id, name, path }
}

/// All presets, in display order.
pub const PRESETS: &[BackgroundPreset] = &[
    preset("bg-1", "Minimal White", "/backgrounds/minimal-white.jpg"),
    preset("bg-2", "Light Wood", "/backgrounds/light-wood.jpg"),
    preset("bg-3", "Dark Wood", "/backgrounds/dark-wood.jpg"),
    preset("bg-4", "Marble", "/backgrounds/marble.jpg"),
    preset("bg-5", "Concrete", "/backgrounds/concrete.jpg"),
    preset("bg-6", "Slate", "/backgrounds/slate.jpg"),
    preset("bg-7", "Linen", "/backgrounds/linen.jpg"),
    preset("bg-8", "Chalkboard", "/backgrounds/chalkboard.jpg"),
    preset("bg-9", "Rustic", "/backgrounds/rustic.jpg"),
    preset("bg-10", "Vintage Paper", "/backgrounds/vintage-paper.jpg"),
    preset("bg-11", "Elegant Gold", "/backgrounds/elegant-gold.jpg"),
    preset("bg-12", "Modern Black", "/backgrounds/modern-black.jpg"),
    preset("bg-13", "Botanical", "/backgrounds/botanical.jpg"),
    preset("bg-14", "Geometric", "/backgrounds/geometric.jpg"),
    preset("bg-15", "Watercolor", "/backgrounds/watercolor.jpg"),
];

/// Look up a preset by id (`bg-4`).
pub fn by_id(id: &str) -> Option<&'static BackgroundPreset> {
    PRESETS.iter().find(|p| p.id.eq_ignore_ascii_case(id.trim()))
}

/// Expand a preset id to its path; anything else passes through unchanged.
pub fn resolve(location: &str) -> String {
    by_id(location)
        .map(|p| p.path.to_string())
        .unwrap_or_else(|| location.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_presets_are_unique() {
        let ids: HashSet<_> = PRESETS.iter().map(|p| p.id).collect();
        let paths: HashSet<_> = PRESETS.iter().map(|p| p.path).collect();
        assert_eq!(PRESETS.len(), 15);
        assert_eq!(ids.len(), PRESETS.len());
        assert_eq!(paths.len(), PRESETS.len());
        assert!(PRESETS.iter().all(|p| p.path.starts_with("/backgrounds/")));
    }

    #[test]
    fn test_by_id() {
        assert_eq!(by_id("bg-4").map(|p| p.name), Some("Marble"));
        assert_eq!(by_id("BG-8").map(|p| p.name), Some("Chalkboard"));
        assert!(by_id("bg-99").is_none());
    }

    #[test]
    fn test_resolve() {
        assert_eq!(resolve("bg-2"), "/backgrounds/light-wood.jpg");
        assert_eq!(resolve("https://cdn.example.com/x.jpg"), "https://cdn.example.com/x.jpg");
    }
}
