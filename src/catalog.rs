//! Static item catalog: default size, label, price and palette icon per kind.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::CUSTOM_ITEM_SIZE;
use crate::geometry::Size;

/// The type of a placed item.
///
/// Serialized as its lowercase name. Any string deserializes: names outside
/// the catalog become `Other` and use the placeholder entry. Names are
/// trimmed first, and a blank name is `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemKind {
    Bureau,
    Stoel,
    Monitor,
    Plant,
    Lamp,
    Kast,
    Whiteboard,
    Koffie,
    Printer,
    Boeken,
    /// Named by the user, no photo.
    Custom,
    /// Named by the user, backed by an image URL.
    CustomPhoto,
    /// Not in the catalog.
    Other(String),
}

impl ItemKind {
    /// Every palette kind, in palette order.
    pub const PALETTE: [ItemKind; 10] = [
        Self::Bureau,
        Self::Stoel,
        Self::Monitor,
        Self::Plant,
        Self::Lamp,
        Self::Kast,
        Self::Whiteboard,
        Self::Koffie,
        Self::Printer,
        Self::Boeken,
    ];

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Bureau => "bureau",
            Self::Stoel => "stoel",
            Self::Monitor => "monitor",
            Self::Plant => "plant",
            Self::Lamp => "lamp",
            Self::Kast => "kast",
            Self::Whiteboard => "whiteboard",
            Self::Koffie => "koffie",
            Self::Printer => "printer",
            Self::Boeken => "boeken",
            Self::Custom => "custom",
            Self::CustomPhoto => "custom-photo",
            Self::Other(name) => name,
        }
    }

    /// Catalog defaults for this kind.
    #[must_use]
    pub fn entry(&self) -> CatalogEntry {
        let (width, height, label, price, icon) = match self {
            Self::Bureau => (120.0, 80.0, "Bureau", 1000, "🪑"),
            Self::Stoel => (60.0, 60.0, "Stoel", 500, "💺"),
            Self::Monitor => (80.0, 60.0, "Monitor", 250, "🖥️"),
            Self::Plant => (50.0, 70.0, "Plant", 40, "🌱"),
            Self::Lamp => (40.0, 80.0, "Lamp", 60, "💡"),
            Self::Kast => (80.0, 120.0, "Kast", 350, "🗄️"),
            Self::Whiteboard => (140.0, 100.0, "Whiteboard", 200, "📋"),
            Self::Koffie => (100.0, 100.0, "Koffie", 150, "☕"),
            Self::Printer => (70.0, 50.0, "Printer", 300, "🖨️"),
            Self::Boeken => (60.0, 140.0, "Boeken", 80, "📚"),
            Self::Custom => (CUSTOM_ITEM_SIZE, CUSTOM_ITEM_SIZE, "Mijn Item", 0, "✨"),
            Self::CustomPhoto => (CUSTOM_ITEM_SIZE, CUSTOM_ITEM_SIZE, "Foto Item", 0, "📷"),
            Self::Other(_) => (80.0, 80.0, "Item", 0, "📦"),
        };
        CatalogEntry { size: Size::new(width, height), label, price, icon }
    }
}

impl From<&str> for ItemKind {
    /// Names are trimmed; a blank name is `Custom`.
    fn from(name: &str) -> Self {
        match name.trim() {
            "" => Self::Custom,
            "bureau" => Self::Bureau,
            "stoel" => Self::Stoel,
            "monitor" => Self::Monitor,
            "plant" => Self::Plant,
            "lamp" => Self::Lamp,
            "kast" => Self::Kast,
            "whiteboard" => Self::Whiteboard,
            "koffie" => Self::Koffie,
            "printer" => Self::Printer,
            "boeken" => Self::Boeken,
            "custom" => Self::Custom,
            "custom-photo" => Self::CustomPhoto,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ItemKind {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<ItemKind> for String {
    fn from(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only defaults for one kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogEntry {
    pub size: Size,
    pub label: &'static str,
    pub price: u64,
    pub icon: &'static str,
}
