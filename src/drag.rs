//! Drag session: the gesture state machine for moving one item with the pointer.
//!
//! `Idle -> Dragging -> Idle`. Only one pointer is tracked; a pointer-down
//! that arrives while a drag is active is ignored until the drag ends. Each
//! move writes the latest clamped position straight into the registry, so
//! rapid moves simply supersede each other and no history is kept.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use tracing::debug;

use crate::geometry::{Point, Size};
use crate::item::ItemId;
use crate::registry::Registry;

/// Internal state for the drag state machine.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is moving an item across the canvas.
    Dragging {
        /// Id of the item being dragged.
        id: ItemId,
        /// Pointer position minus item origin at pointer-down.
        offset: Point,
        /// Item position at pointer-down, for callers that want to revert.
        origin: Point,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &DragState {
        &self.state
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Id of the item under drag, if any.
    #[must_use]
    pub fn active_item(&self) -> Option<&ItemId> {
        match &self.state {
            DragState::Dragging { id, .. } => Some(id),
            DragState::Idle => None,
        }
    }

    /// Position the active item had when the drag began.
    #[must_use]
    pub fn origin(&self) -> Option<Point> {
        match &self.state {
            DragState::Dragging { origin, .. } => Some(*origin),
            DragState::Idle => None,
        }
    }

    /// Start dragging `id`. Returns false when a drag is already active or
    /// the item does not exist; in both cases nothing changes.
    pub fn begin(&mut self, registry: &Registry, id: &ItemId, pointer: Point) -> bool {
        if self.is_dragging() {
            return false;
        }
        let Some(item) = registry.get(id) else {
            return false;
        };
        let origin = item.position;
        debug!(%id, x = origin.x, y = origin.y, "drag started");
        self.state = DragState::Dragging { id: id.clone(), offset: pointer - origin, origin };
        true
    }

    /// Move the active item so the grab offset follows `pointer`, clamped to
    /// `canvas` using the item's unscaled size. Returns the written position,
    /// or `None` when idle (or the item vanished mid-drag).
    pub fn update(&mut self, registry: &mut Registry, pointer: Point, canvas: Size) -> Option<Point> {
        let DragState::Dragging { id, offset, .. } = &self.state else {
            return None;
        };
        match registry.set_position(id, pointer - *offset, canvas) {
            Ok(p) => Some(p),
            Err(e) => {
                debug!(error = %e, "drag target gone; ending drag");
                self.state = DragState::Idle;
                None
            }
        }
    }

    /// End the drag, committing whatever position was last written. Idempotent.
    /// Returns the id that was being dragged.
    pub fn end(&mut self) -> Option<ItemId> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging { id, .. } => {
                debug!(%id, "drag ended");
                Some(id)
            }
            DragState::Idle => None,
        }
    }
}
