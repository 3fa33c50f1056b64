//! Shared numeric and string constants for the workspace core.

// ── Placement ───────────────────────────────────────────────────

/// Minimum distance from the top-left canvas edge for randomly placed items.
pub const PLACEMENT_MARGIN: f64 = 50.0;

/// Subtracted from the free span so random placement also stays clear of the far edge.
pub const PLACEMENT_SPAN_TRIM: f64 = 100.0;

/// Spawn point for custom and custom-photo items.
pub const CUSTOM_SPAWN: f64 = 50.0;

// ── Canvas ──────────────────────────────────────────────────────

/// Canvas width used when the host has not reported one.
pub const DEFAULT_CANVAS_WIDTH: f64 = 800.0;

/// Canvas height used when the host has not reported one.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;

// ── Items ───────────────────────────────────────────────────────

/// Default edge length of custom and custom-photo items.
pub const CUSTOM_ITEM_SIZE: f64 = 100.0;

/// Fallback color shown behind (or instead of) a custom photo.
pub const DEFAULT_BACKUP_COLOR: &str = "#3498db";

// ── Persistence ─────────────────────────────────────────────────

/// Key under which the layout snapshot lives in host storage.
pub const DEFAULT_STORAGE_KEY: &str = "werkplekLayout";

/// Schema version written by this crate.
pub const SNAPSHOT_VERSION: &str = "3.0";
