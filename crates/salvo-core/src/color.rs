//! Color matching classes and their display colors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Matching class shared by firing units and the targets they may engage.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ColorId(pub u8);

/// Linear RGBA color, components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::opaque(1.0, 1.0, 1.0);
    pub const RED: Rgba = Rgba::opaque(1.0, 0.0, 0.0);
    pub const GREEN: Rgba = Rgba::opaque(0.0, 1.0, 0.0);
    pub const BLUE: Rgba = Rgba::opaque(0.0, 0.0, 1.0);
    pub const YELLOW: Rgba = Rgba::opaque(1.0, 0.92, 0.016);
    pub const MAGENTA: Rgba = Rgba::opaque(1.0, 0.0, 1.0);
    pub const CYAN: Rgba = Rgba::opaque(0.0, 1.0, 1.0);

    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::WHITE
    }
}

/// One palette entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorEntry {
    pub id: ColorId,
    pub name: String,
    pub rgba: Rgba,
}

/// Static lookup from [`ColorId`] to display color and name.
///
/// Unknown ids resolve to [`ColorRegistry::FALLBACK`], never an error.
#[derive(Debug, Clone, Default)]
pub struct ColorRegistry {
    entries: BTreeMap<ColorId, ColorEntry>,
}

impl ColorRegistry {
    /// Color returned for ids missing from the palette.
    pub const FALLBACK: Rgba = Rgba::WHITE;

    /// Build a registry from palette entries. Later duplicates replace earlier ones.
    pub fn new(entries: impl IntoIterator<Item = ColorEntry>) -> Self {
        Self {
            entries: entries.into_iter().map(|e| (e.id, e)).collect(),
        }
    }

    /// The built-in six-color palette (ids 0..=5).
    pub fn default_palette() -> Vec<ColorEntry> {
        [
            ("red", Rgba::RED),
            ("green", Rgba::GREEN),
            ("blue", Rgba::BLUE),
            ("yellow", Rgba::YELLOW),
            ("magenta", Rgba::MAGENTA),
            ("cyan", Rgba::CYAN),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (name, rgba))| ColorEntry {
            id: ColorId(i as u8),
            name: name.to_string(),
            rgba,
        })
        .collect()
    }

    pub fn color_of(&self, id: ColorId) -> Rgba {
        self.entries
            .get(&id)
            .map(|e| e.rgba)
            .unwrap_or(Self::FALLBACK)
    }

    pub fn name_of(&self, id: ColorId) -> Option<&str> {
        self.entries.get(&id).map(|e| e.name.as_str())
    }

    pub fn contains(&self, id: ColorId) -> bool {
        self.entries.contains_key(&id)
    }

    /// All registered ids in ascending order.
    pub fn all_ids(&self) -> Vec<ColorId> {
        self.entries.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Display for ColorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "C{}", self.0)
    }
}
