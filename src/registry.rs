//! Registry: the live, insertion-ordered collection of placed items.
//!
//! The registry is the single writer for items. It owns id minting (a
//! monotonic counter), the exclusive selection, and every edit operation.
//! Order only matters for rendering stack order; cost aggregation reads it
//! but does not depend on it beyond first-seen group order.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use rand::Rng;
use tracing::{debug, warn};

use crate::catalog::ItemKind;
use crate::consts::{DEFAULT_BACKUP_COLOR, PLACEMENT_MARGIN, PLACEMENT_SPAN_TRIM};
use crate::error::LayoutError;
use crate::geometry::{Point, Size, Transform, clamp_position, compose_transform};
use crate::item::{Item, ItemId, ItemOverrides, PhotoRef, Price, normalize_filter};

/// In-memory store of placed items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    items: Vec<Item>,
    next_id: u64,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from already-formed items (snapshot restore).
    ///
    /// Later duplicates of an id are dropped, only the first selected item
    /// stays selected, and the id counter resumes past the highest suffix.
    #[must_use]
    pub fn from_items(items: Vec<Item>) -> Self {
        let mut registry = Self::new();
        for item in items {
            registry.push_restored(item);
        }
        registry
    }

    /// Append a restored item, keeping ids unique and the selection exclusive.
    /// Returns false if an item with the same id is already present.
    pub(crate) fn push_restored(&mut self, mut item: Item) -> bool {
        if self.contains(&item.id) {
            return false;
        }
        if item.selected && self.selected().is_some() {
            item.selected = false;
        }
        if let Some(n) = item.id.counter_suffix() {
            self.resume_counter(n);
        }
        self.items.push(item);
        true
    }

    /// Make sure future ids are minted past `n`.
    pub(crate) fn resume_counter(&mut self, n: u64) {
        self.next_id = self.next_id.max(n);
    }

    /// Last counter value used for id minting.
    #[must_use]
    pub fn counter(&self) -> u64 {
        self.next_id
    }

    /// Mint a fresh `<kind>_<n>` id that is not in use.
    ///
    /// Once the counter is exhausted (only reachable through a restored
    /// snapshot carrying a huge suffix) the lowest free `n` is used instead.
    pub fn mint_id(&mut self, kind: &ItemKind) -> ItemId {
        while let Some(n) = self.next_id.checked_add(1) {
            self.next_id = n;
            let id = ItemId::from(format!("{kind}_{n}"));
            if !self.contains(&id) {
                return id;
            }
        }
        warn!(%kind, "id counter exhausted; reusing lowest free id");
        let mut n: u64 = 1;
        loop {
            let id = ItemId::from(format!("{kind}_{n}"));
            if !self.contains(&id) {
                return id;
            }
            n += 1;
        }
    }

    /// Add an item of `kind`, applying `overrides` over the catalog defaults.
    ///
    /// Without an explicit position the item lands at a random spot biased
    /// away from the canvas edges. Unknown kinds use the placeholder entry.
    pub fn add_item<R: Rng + ?Sized>(
        &mut self,
        kind: ItemKind,
        overrides: ItemOverrides,
        canvas: Size,
        rng: &mut R,
    ) -> Item {
        let entry = kind.entry();
        let size = overrides.size.map_or(entry.size, |s| sanitize_size(s, entry.size));
        let position = match overrides.position {
            Some(p) => clamp_position(p, size, canvas),
            None => random_position(size, canvas, rng),
        };
        let item = Item {
            id: self.mint_id(&kind),
            label: label_or_default(overrides.label.as_deref(), entry.label),
            kind,
            position,
            size,
            transform: Transform::default(),
            color_filter: None,
            price: overrides.price.unwrap_or(Price::new(entry.price)),
            photo: overrides.photo.map(sanitize_photo),
            selected: false,
        };
        debug!(id = %item.id, kind = %item.kind, x = item.position.x, y = item.position.y, "item added");
        self.items.push(item.clone());
        item
    }

    /// Remove an item, returning it if it was present. Unknown ids are a no-op.
    ///
    /// Removing the selected item clears the selection with it.
    pub fn remove_item(&mut self, id: &ItemId) -> Option<Item> {
        let idx = self.index_of(id)?;
        Some(self.items.remove(idx))
    }

    /// Make `id` the only selected item. Returns false (and changes nothing)
    /// if the id is unknown.
    pub fn select_item(&mut self, id: &ItemId) -> bool {
        if !self.contains(id) {
            return false;
        }
        for item in &mut self.items {
            item.selected = item.id == *id;
        }
        true
    }

    /// Clear the selection, returning the previously selected id.
    pub fn deselect(&mut self) -> Option<ItemId> {
        let item = self.items.iter_mut().find(|i| i.selected)?;
        item.selected = false;
        Some(item.id.clone())
    }

    /// The selected item, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&Item> {
        self.items.iter().find(|i| i.selected)
    }

    /// Set the label to `text` trimmed; empty text reverts to the catalog label.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    pub fn update_label(&mut self, id: &ItemId, text: &str) -> Result<(), LayoutError> {
        let item = self.get_mut(id)?;
        item.label = label_or_default(Some(text), item.kind.entry().label);
        debug!(%id, label = %item.label, "label updated");
        Ok(())
    }

    /// Set the price after validating it is a non-negative integer.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a bad price (item unchanged) or `NotFound`.
    pub fn update_price<P>(&mut self, id: &ItemId, price: P) -> Result<Price, LayoutError>
    where
        P: TryInto<Price, Error = LayoutError>,
    {
        let price = price.try_into()?;
        let item = self.get_mut(id)?;
        item.price = price;
        debug!(%id, %price, "price updated");
        Ok(price)
    }

    /// Replace both scale and rotation.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for malformed values (item unchanged) or `NotFound`.
    pub fn update_transform(&mut self, id: &ItemId, scale_percent: f64, rotation_deg: f64) -> Result<(), LayoutError> {
        let transform = compose_transform(scale_percent, rotation_deg)?;
        self.get_mut(id)?.transform = transform;
        Ok(())
    }

    /// Size slider: change the scale, keep the last rotation.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` or `NotFound`.
    pub fn update_scale(&mut self, id: &ItemId, scale_percent: f64) -> Result<(), LayoutError> {
        let item = self.get_mut(id)?;
        item.transform = item.transform.with_scale_percent(scale_percent)?;
        Ok(())
    }

    /// Rotation slider: change the rotation, keep the last scale.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` or `NotFound`.
    pub fn update_rotation(&mut self, id: &ItemId, rotation_deg: f64) -> Result<(), LayoutError> {
        let item = self.get_mut(id)?;
        item.transform = item.transform.with_rotation(rotation_deg)?;
        Ok(())
    }

    /// Set or clear (`"none"` / empty) the CSS color filter.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    pub fn update_color_filter(&mut self, id: &ItemId, filter: &str) -> Result<(), LayoutError> {
        self.get_mut(id)?.color_filter = normalize_filter(filter);
        Ok(())
    }

    /// Point the item at a new image URL, keeping its backup color.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty URL or `NotFound`.
    pub fn update_photo(&mut self, id: &ItemId, url: &str) -> Result<(), LayoutError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(LayoutError::InvalidInput("photo url must not be empty".into()));
        }
        let item = self.get_mut(id)?;
        match item.photo.as_mut() {
            Some(photo) => photo.url = Some(url.to_string()),
            None => {
                item.photo = Some(PhotoRef { url: Some(url.to_string()), backup_color: DEFAULT_BACKUP_COLOR.to_string() });
            }
        }
        Ok(())
    }

    /// Drop the image URL so the item falls back to its backup color.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    pub fn clear_photo(&mut self, id: &ItemId) -> Result<(), LayoutError> {
        if let Some(photo) = self.get_mut(id)?.photo.as_mut() {
            photo.url = None;
        }
        Ok(())
    }

    /// Move an item, clamping against its unscaled size and `canvas`.
    /// Returns the position actually written.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    pub fn set_position(&mut self, id: &ItemId, proposed: Point, canvas: Size) -> Result<Point, LayoutError> {
        let item = self.get_mut(id)?;
        item.position = clamp_position(proposed, item.size, canvas);
        Ok(item.position)
    }

    /// Remove every item, reset id minting and the selection.
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_id = 0;
    }

    /// Look up an item by id.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == *id)
    }

    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.index_of(id).is_some()
    }

    /// Items in insertion (stacking) order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// Number of items in the registry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the registry holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn index_of(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|i| i.id == *id)
    }

    fn get_mut(&mut self, id: &ItemId) -> Result<&mut Item, LayoutError> {
        self.items
            .iter_mut()
            .find(|i| i.id == *id)
            .ok_or_else(|| LayoutError::NotFound(id.clone()))
    }
}

/// Trimmed `label`, or the catalog label when it is missing or blank.
fn label_or_default(label: Option<&str>, catalog_label: &str) -> String {
    match label.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => catalog_label.to_string(),
    }
}

/// Replace any non-finite or negative dimension with the catalog one.
fn sanitize_size(size: Size, fallback: Size) -> Size {
    let dim = |v: f64, d: f64| if v.is_finite() && v >= 0.0 { v } else { d };
    Size::new(dim(size.width, fallback.width), dim(size.height, fallback.height))
}

/// Blank URLs mean no image; a blank backup color takes the default.
fn sanitize_photo(photo: PhotoRef) -> PhotoRef {
    let url = photo.url.as_deref().map(str::trim).filter(|u| !u.is_empty()).map(str::to_string);
    let backup = photo.backup_color.trim();
    let backup_color = if backup.is_empty() { DEFAULT_BACKUP_COLOR } else { backup };
    PhotoRef { url, backup_color: backup_color.to_string() }
}

fn random_position<R: Rng + ?Sized>(size: Size, canvas: Size, rng: &mut R) -> Point {
    let x = PLACEMENT_MARGIN + random_offset(canvas.width - size.width - PLACEMENT_SPAN_TRIM, rng);
    let y = PLACEMENT_MARGIN + random_offset(canvas.height - size.height - PLACEMENT_SPAN_TRIM, rng);
    clamp_position(Point::new(x, y), size, canvas)
}

fn random_offset<R: Rng + ?Sized>(span: f64, rng: &mut R) -> f64 {
    if span.is_finite() && span > 0.0 { rng.random_range(0.0..span) } else { 0.0 }
}
