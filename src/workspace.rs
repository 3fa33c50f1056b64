//! Workspace: the session object the UI shell owns.
//!
//! DESIGN
//! ======
//! `Workspace` holds everything that used to be free-floating state in the
//! browser client: the registry, the active drag, the placement RNG, the
//! canvas size and the cached cost summary. The host forwards discrete input
//! events here and re-renders from the returned [`Action`]s; nothing in this
//! crate touches the view directly.
//!
//! The cost summary is recomputed on every add, remove, price edit, label
//! edit, clear and restore.

#[cfg(test)]
#[path = "workspace_test.rs"]
mod workspace_test;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::catalog::ItemKind;
use crate::config::WorkspaceConfig;
use crate::consts::{CUSTOM_ITEM_SIZE, CUSTOM_SPAWN, DEFAULT_BACKUP_COLOR};
use crate::cost::{CostSummary, compute_cost_summary};
use crate::drag::DragSession;
use crate::error::LayoutError;
use crate::geometry::{Point, Size};
use crate::item::{Item, ItemId, ItemOverrides, PhotoRef, Price};
use crate::layout::{self, Snapshot};
use crate::registry::Registry;
use crate::storage::KeyValueStore;

/// What the view layer must re-render after an operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    ItemCreated(Item),
    ItemUpdated { id: ItemId },
    ItemMoved { id: ItemId, position: Point },
    ItemDeleted { id: ItemId },
    SelectionChanged { id: Option<ItemId> },
    SetCursor(String),
    Cleared,
    LayoutSaved,
    LayoutRestored { count: usize },
}

pub struct Workspace {
    config: WorkspaceConfig,
    canvas: Size,
    registry: Registry,
    drag: DragSession,
    rng: StdRng,
    costs: CostSummary,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(WorkspaceConfig::default())
    }
}

impl Workspace {
    #[must_use]
    pub fn new(config: WorkspaceConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            canvas: config.canvas,
            config,
            registry: Registry::new(),
            drag: DragSession::new(),
            rng,
            costs: CostSummary::default(),
        }
    }

    // --- Canvas ---

    /// Record the current canvas size. Clamping uses whatever size is set at
    /// the time of each operation; existing positions are not re-clamped.
    pub fn set_canvas_size(&mut self, canvas: Size) {
        self.canvas = canvas;
    }

    // --- Adding ---

    /// Add a catalog item (or placeholder for an unknown kind) at a random spot.
    pub fn add_item(&mut self, kind: impl Into<ItemKind>) -> Action {
        self.add_item_with(kind.into(), ItemOverrides::default())
    }

    /// Add an item with explicit overrides over its catalog defaults.
    pub fn add_item_with(&mut self, kind: ItemKind, overrides: ItemOverrides) -> Action {
        let item = self.registry.add_item(kind, overrides, self.canvas, &mut self.rng);
        info!(id = %item.id, kind = %item.kind, total = self.registry.len(), "item added");
        self.recompute_costs();
        Action::ItemCreated(item)
    }

    /// Add a user-named item without a photo at the fixed spawn point.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty name.
    pub fn add_custom_item(&mut self, name: &str) -> Result<Action, LayoutError> {
        let name = required("item name", name)?;
        Ok(self.add_item_with(
            ItemKind::Custom,
            ItemOverrides {
                label: Some(name.to_string()),
                position: Some(Point::new(CUSTOM_SPAWN, CUSTOM_SPAWN)),
                ..Default::default()
            },
        ))
    }

    /// Add a user-named item backed by an image URL.
    ///
    /// `size` defaults to 100×100 and `backup_color` to the default swatch.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty name or URL, or a non-positive size.
    pub fn add_custom_photo(
        &mut self,
        name: &str,
        url: &str,
        size: Option<Size>,
        backup_color: Option<&str>,
    ) -> Result<Action, LayoutError> {
        let name = required("item name", name)?;
        let url = required("photo url", url)?;
        let size = size.unwrap_or(Size::new(CUSTOM_ITEM_SIZE, CUSTOM_ITEM_SIZE));
        if !(size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0) {
            return Err(reject(LayoutError::InvalidInput(format!(
                "item size must be positive, got {}x{}",
                size.width, size.height
            ))));
        }
        let backup_color = backup_color.map(str::trim).filter(|c| !c.is_empty()).unwrap_or(DEFAULT_BACKUP_COLOR);
        Ok(self.add_item_with(
            ItemKind::CustomPhoto,
            ItemOverrides {
                label: Some(name.to_string()),
                size: Some(size),
                position: Some(Point::new(CUSTOM_SPAWN, CUSTOM_SPAWN)),
                photo: Some(PhotoRef { url: Some(url.to_string()), backup_color: backup_color.to_string() }),
                ..Default::default()
            },
        ))
    }

    // --- Removing / selection ---

    /// Remove an item. Unknown ids are a silent no-op.
    pub fn remove_item(&mut self, id: &ItemId) -> Action {
        let Some(item) = self.registry.remove_item(id) else {
            debug!(%id, "remove of unknown item ignored");
            return Action::None;
        };
        if self.drag.active_item() == Some(&item.id) {
            self.drag.end();
        }
        info!(%id, total = self.registry.len(), "item removed");
        self.recompute_costs();
        Action::ItemDeleted { id: item.id }
    }

    /// Remove whichever item is selected, if any.
    pub fn delete_selected(&mut self) -> Action {
        match self.registry.selected().map(|i| i.id.clone()) {
            Some(id) => self.remove_item(&id),
            None => Action::None,
        }
    }

    /// Select `id` exclusively. Unknown ids leave the selection unchanged.
    pub fn select_item(&mut self, id: &ItemId) -> Action {
        if self.registry.select_item(id) {
            Action::SelectionChanged { id: Some(id.clone()) }
        } else {
            Action::None
        }
    }

    /// Clear the selection.
    pub fn deselect(&mut self) -> Action {
        match self.registry.deselect() {
            Some(_) => Action::SelectionChanged { id: None },
            None => Action::None,
        }
    }

    // --- Edits ---

    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    pub fn update_label(&mut self, id: &ItemId, text: &str) -> Result<Action, LayoutError> {
        self.registry.update_label(id, text).map_err(reject)?;
        self.recompute_costs();
        Ok(Action::ItemUpdated { id: id.clone() })
    }

    /// # Errors
    ///
    /// Returns `InvalidInput` for a negative or non-integer price, or `NotFound`.
    pub fn update_price<P>(&mut self, id: &ItemId, price: P) -> Result<Action, LayoutError>
    where
        P: TryInto<Price, Error = LayoutError>,
    {
        self.registry.update_price(id, price).map_err(reject)?;
        self.recompute_costs();
        Ok(Action::ItemUpdated { id: id.clone() })
    }

    /// # Errors
    ///
    /// Returns `InvalidInput` for malformed values, or `NotFound`.
    pub fn update_transform(&mut self, id: &ItemId, scale_percent: f64, rotation_deg: f64) -> Result<Action, LayoutError> {
        self.registry.update_transform(id, scale_percent, rotation_deg).map_err(reject)?;
        Ok(Action::ItemUpdated { id: id.clone() })
    }

    /// # Errors
    ///
    /// Returns `InvalidInput` or `NotFound`.
    pub fn update_scale(&mut self, id: &ItemId, scale_percent: f64) -> Result<Action, LayoutError> {
        self.registry.update_scale(id, scale_percent).map_err(reject)?;
        Ok(Action::ItemUpdated { id: id.clone() })
    }

    /// # Errors
    ///
    /// Returns `InvalidInput` or `NotFound`.
    pub fn update_rotation(&mut self, id: &ItemId, rotation_deg: f64) -> Result<Action, LayoutError> {
        self.registry.update_rotation(id, rotation_deg).map_err(reject)?;
        Ok(Action::ItemUpdated { id: id.clone() })
    }

    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    pub fn update_color_filter(&mut self, id: &ItemId, filter: &str) -> Result<Action, LayoutError> {
        self.registry.update_color_filter(id, filter).map_err(reject)?;
        Ok(Action::ItemUpdated { id: id.clone() })
    }

    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty URL, or `NotFound`.
    pub fn update_photo(&mut self, id: &ItemId, url: &str) -> Result<Action, LayoutError> {
        self.registry.update_photo(id, url).map_err(reject)?;
        Ok(Action::ItemUpdated { id: id.clone() })
    }

    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    pub fn clear_photo(&mut self, id: &ItemId) -> Result<Action, LayoutError> {
        self.registry.clear_photo(id).map_err(reject)?;
        Ok(Action::ItemUpdated { id: id.clone() })
    }

    /// Remove everything, reset id minting and drop any active drag.
    pub fn clear(&mut self) -> Action {
        let removed = self.registry.len();
        self.drag.end();
        self.registry.clear();
        self.recompute_costs();
        info!(removed, "workspace cleared");
        Action::Cleared
    }

    // --- Pointer input ---

    /// Pointer pressed on an item: select it and start dragging. Ignored
    /// while another drag is active.
    pub fn pointer_down(&mut self, id: &ItemId, pointer: Point) -> Vec<Action> {
        if !self.drag.begin(&self.registry, id, pointer) {
            return Vec::new();
        }
        vec![self.select_item(id), Action::SetCursor("grabbing".into())]
    }

    pub fn pointer_move(&mut self, pointer: Point) -> Vec<Action> {
        let Some(position) = self.drag.update(&mut self.registry, pointer, self.canvas) else {
            return Vec::new();
        };
        match self.drag.active_item() {
            Some(id) => vec![Action::ItemMoved { id: id.clone(), position }],
            None => Vec::new(),
        }
    }

    pub fn pointer_up(&mut self) -> Vec<Action> {
        match self.drag.end() {
            Some(_) => vec![Action::SetCursor(String::new())],
            None => Vec::new(),
        }
    }

    // --- Persistence ---

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        layout::serialize(&self.registry)
    }

    /// # Errors
    ///
    /// Returns `CorruptSnapshot` if encoding fails.
    pub fn snapshot_json(&self) -> Result<String, LayoutError> {
        self.snapshot().to_json()
    }

    /// Replace the registry wholesale with the snapshot's contents.
    ///
    /// # Errors
    ///
    /// Returns `CorruptSnapshot` for structurally broken data; the current
    /// registry is left untouched in that case.
    pub fn restore_json(&mut self, json: &str) -> Result<Action, LayoutError> {
        let registry = layout::restore(json).map_err(reject)?;
        self.drag.end();
        self.registry = registry;
        self.recompute_costs();
        Ok(Action::LayoutRestored { count: self.registry.len() })
    }

    /// Persist the current layout under the configured storage key.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the host refuses the write.
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<Action, LayoutError> {
        let json = self.snapshot_json()?;
        store.set(&self.config.storage_key, json).map_err(reject)?;
        info!(key = %self.config.storage_key, count = self.registry.len(), "layout saved");
        Ok(Action::LayoutSaved)
    }

    /// Restore the layout stored under the configured key. Returns `false`
    /// when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns `CorruptSnapshot` if the stored data is broken.
    pub fn load(&mut self, store: &dyn KeyValueStore) -> Result<bool, LayoutError> {
        let Some(json) = store.get(&self.config.storage_key) else {
            return Ok(false);
        };
        self.restore_json(&json)?;
        Ok(true)
    }

    #[must_use]
    pub fn has_saved_layout(&self, store: &dyn KeyValueStore) -> bool {
        store.get(&self.config.storage_key).is_some()
    }

    // --- Queries ---

    #[must_use]
    pub fn canvas(&self) -> Size {
        self.canvas
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.registry.get(id)
    }

    /// The currently selected item's id, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&ItemId> {
        self.registry.selected().map(|i| &i.id)
    }

    #[must_use]
    pub fn drag(&self) -> &DragSession {
        &self.drag
    }

    #[must_use]
    pub fn cost_summary(&self) -> &CostSummary {
        &self.costs
    }

    fn recompute_costs(&mut self) {
        self.costs = compute_cost_summary(&self.registry);
        debug!(total = self.costs.total_cost, groups = self.costs.by_label.len(), "cost summary recomputed");
    }
}

fn required<'a>(what: &str, raw: &'a str) -> Result<&'a str, LayoutError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(reject(LayoutError::InvalidInput(format!("{what} must not be empty"))));
    }
    Ok(trimmed)
}

fn reject(e: LayoutError) -> LayoutError {
    warn!(error = %e, code = crate::error::ErrorCode::error_code(&e), "operation rejected");
    e
}
