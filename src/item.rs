//! Item model: one placed, priced, positioned object on the canvas.
//!
//! Items are plain data. All mutation goes through [`crate::registry::Registry`],
//! which is the only holder of `&mut Item`; the view layer reads items and
//! re-renders from them.

#[cfg(test)]
#[path = "item_test.rs"]
mod item_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::ItemKind;
use crate::error::LayoutError;
use crate::geometry::{Point, Size, Transform};

/// Unique, stable identifier of an item within a registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Trailing counter of a minted `<kind>_<n>` id, if it has one.
    #[must_use]
    pub fn counter_suffix(&self) -> Option<u64> {
        let (_, tail) = self.0.rsplit_once('_')?;
        tail.parse().ok()
    }
}

impl From<&str> for ItemId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for ItemId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================
// Price
// =============================================================

/// Non-negative integer price in currency-agnostic units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);

    #[must_use]
    pub const fn new(units: u64) -> Self {
        Self(units)
    }

    #[must_use]
    pub const fn units(self) -> u64 {
        self.0
    }
}

fn invalid_price(raw: impl fmt::Display) -> LayoutError {
    LayoutError::InvalidInput(format!("price must be a non-negative integer, got {raw}"))
}

impl TryFrom<i64> for Price {
    type Error = LayoutError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value).map(Price).map_err(|_| invalid_price(value))
    }
}

impl TryFrom<i32> for Price {
    type Error = LayoutError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Price::try_from(i64::from(value))
    }
}

impl TryFrom<f64> for Price {
    type Error = LayoutError;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value >= u64::MAX as f64 {
            return Err(invalid_price(value));
        }
        Ok(Price(value as u64))
    }
}

impl TryFrom<&str> for Price {
    type Error = LayoutError;

    fn try_from(raw: &str) -> Result<Self, Self::Error> {
        raw.trim().parse::<u64>().map(Price).map_err(|_| invalid_price(format!("{raw:?}")))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================
// Item
// =============================================================

/// Image backing for custom-photo items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRef {
    /// Image URL; `None` after the photo was cleared back to the backup color.
    pub url: Option<String>,
    /// Color shown while the image loads or when it fails.
    pub backup_color: String,
}

/// One placed item.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub kind: ItemKind,
    pub label: String,
    /// Top-left corner, canvas-local.
    pub position: Point,
    /// Layout box used for clamping; unaffected by `transform`.
    pub size: Size,
    pub transform: Transform,
    /// CSS filter string; `None` means no filter.
    pub color_filter: Option<String>,
    pub price: Price,
    pub photo: Option<PhotoRef>,
    pub selected: bool,
}

/// Optional overrides applied on top of catalog defaults when adding an item.
#[derive(Debug, Clone, Default)]
pub struct ItemOverrides {
    pub label: Option<String>,
    pub size: Option<Size>,
    pub price: Option<Price>,
    /// Fixed spawn point instead of random placement. Still clamped.
    pub position: Option<Point>,
    pub photo: Option<PhotoRef>,
}

/// Normalize a color-filter input: empty or `"none"` means no filter.
#[must_use]
pub fn normalize_filter(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "none" { None } else { Some(trimmed.to_string()) }
}
