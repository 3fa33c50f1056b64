//! Layout serializer: registry <-> versioned JSON snapshot.
//!
//! DESIGN
//! ======
//! Writing goes through typed [`ItemRecord`]s. Reading goes through a lenient
//! accessor over `serde_json::Value` so that a missing or malformed field
//! takes its documented default instead of failing the whole restore. Only
//! structural damage (unparsable JSON, no `items` array, a record that is not
//! an object) is `CorruptSnapshot`.
//!
//! Snapshots written by the earlier browser client (`"1.0"`, `"2.0"`) are
//! still readable: they spell kind as `type`, the label as `textContent`, and
//! store lengths as CSS strings such as `"120px"`.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{info, warn};

use crate::catalog::ItemKind;
use crate::consts::{DEFAULT_BACKUP_COLOR, SNAPSHOT_VERSION};
use crate::error::LayoutError;
use crate::geometry::{Point, Size, Transform};
use crate::item::{Item, ItemId, PhotoRef, Price, normalize_filter};
use crate::registry::Registry;

/// Version assumed for snapshots that carry no version tag.
const LEGACY_VERSION: &str = "1.0";

// =============================================================
// Types
// =============================================================

/// A serialized capture of the whole registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: String,
    /// RFC 3339 time of capture.
    pub timestamp: String,
    /// Id counter at capture time, so restored registries keep minting forward.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counter: Option<u64>,
    pub items: Vec<ItemRecord>,
}

/// Persisted form of one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub kind: ItemKind,
    pub id: ItemId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// CSS transform, e.g. `scale(1.2) rotate(45deg)`.
    pub transform: String,
    /// CSS filter; empty when absent.
    pub filter: String,
    pub label: String,
    pub price: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_color: Option<String>,
    #[serde(default)]
    pub selected: bool,
}

impl From<&Item> for ItemRecord {
    fn from(item: &Item) -> Self {
        Self {
            kind: item.kind.clone(),
            id: item.id.clone(),
            x: item.position.x,
            y: item.position.y,
            width: item.size.width,
            height: item.size.height,
            transform: item.transform.to_string(),
            filter: item.color_filter.clone().unwrap_or_default(),
            label: item.label.clone(),
            price: item.price.units(),
            photo_url: item.photo.as_ref().and_then(|p| p.url.clone()),
            backup_color: item.photo.as_ref().map(|p| p.backup_color.clone()),
            selected: item.selected,
        }
    }
}

impl Snapshot {
    /// Encode as a JSON string for the host store.
    ///
    /// # Errors
    ///
    /// Returns `CorruptSnapshot` if encoding fails.
    pub fn to_json(&self) -> Result<String, LayoutError> {
        serde_json::to_string(self).map_err(|e| LayoutError::CorruptSnapshot(format!("encode failed: {e}")))
    }

    /// Parsed capture time, if the timestamp is valid RFC 3339.
    #[must_use]
    pub fn saved_at(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::parse(&self.timestamp, &Rfc3339).ok()
    }
}

// =============================================================
// Serialize
// =============================================================

/// Capture the registry in insertion order.
#[must_use]
pub fn serialize(registry: &Registry) -> Snapshot {
    let timestamp = match OffsetDateTime::now_utc().format(&Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            warn!(error = %e, "snapshot timestamp formatting failed");
            String::new()
        }
    };
    Snapshot {
        version: SNAPSHOT_VERSION.to_string(),
        timestamp,
        counter: Some(registry.counter()),
        items: registry.iter().map(ItemRecord::from).collect(),
    }
}

// =============================================================
// Restore
// =============================================================

/// Rebuild a registry from snapshot JSON. The result replaces the caller's
/// registry wholesale; on error the caller's registry is untouched.
///
/// # Errors
///
/// Returns `CorruptSnapshot` for unparsable JSON, a non-object root, a
/// missing `items` array, or an item record that is not an object.
pub fn restore(json: &str) -> Result<Registry, LayoutError> {
    let root: Value =
        serde_json::from_str(json).map_err(|e| LayoutError::CorruptSnapshot(format!("unparsable snapshot: {e}")))?;
    restore_value(&root)
}

/// Rebuild a registry from an already-parsed snapshot value.
///
/// # Errors
///
/// See [`restore`].
pub fn restore_value(root: &Value) -> Result<Registry, LayoutError> {
    let Some(root) = root.as_object() else {
        return Err(LayoutError::CorruptSnapshot("snapshot root is not an object".into()));
    };
    let Some(records) = root.get("items").and_then(Value::as_array) else {
        return Err(LayoutError::CorruptSnapshot("snapshot has no items array".into()));
    };
    let version = root.get("version").and_then(Value::as_str).unwrap_or(LEGACY_VERSION);
    if !matches!(version, "1.0" | "2.0" | SNAPSHOT_VERSION) {
        warn!(%version, "unknown snapshot version; restoring leniently");
    }

    let mut fields = Vec::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        let Some(obj) = record.as_object() else {
            return Err(LayoutError::CorruptSnapshot(format!("item record {idx} is not an object")));
        };
        fields.push(RecordFields::new(obj));
    }

    let mut registry = Registry::new();
    if let Some(counter) = root.get("counter").and_then(Value::as_u64) {
        registry.resume_counter(counter);
    }

    // Reserve every recorded id's counter before minting any missing ones.
    for id in fields.iter().filter_map(RecordFields::id) {
        if let Some(n) = id.counter_suffix() {
            registry.resume_counter(n);
        }
    }
    for (idx, record) in fields.iter().enumerate() {
        let id = match record.id() {
            Some(id) => id,
            None => registry.mint_id(&record.kind()),
        };
        if !registry.push_restored(record.to_item(id)) {
            warn!(%idx, "duplicate item id in snapshot; record dropped");
        }
    }

    info!(%version, count = registry.len(), "snapshot restored");
    Ok(registry)
}

/// Lenient typed access to one item record, current or legacy spelling.
struct RecordFields<'a> {
    value: &'a Map<String, Value>,
}

impl<'a> RecordFields<'a> {
    fn new(value: &'a Map<String, Value>) -> Self {
        Self { value }
    }

    fn first(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter().find_map(|k| self.value.get(*k).filter(|v| !v.is_null()))
    }

    fn text(&self, keys: &[&str]) -> Option<&'a str> {
        self.first(keys).and_then(Value::as_str)
    }

    /// Non-empty trimmed string.
    fn non_empty(&self, keys: &[&str]) -> Option<&'a str> {
        self.text(keys).map(str::trim).filter(|s| !s.is_empty())
    }

    /// A length as a JSON number or a CSS string like `"120px"`.
    fn length(&self, keys: &[&str]) -> Option<f64> {
        let raw = self.first(keys)?;
        let n = match raw {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => parse_css_length(s)?,
            _ => return None,
        };
        (n.is_finite() && n >= 0.0).then_some(n)
    }

    fn kind(&self) -> ItemKind {
        self.text(&["kind", "type"]).map_or(ItemKind::Custom, ItemKind::from)
    }

    fn id(&self) -> Option<ItemId> {
        self.non_empty(&["id"]).map(ItemId::from)
    }

    fn price(&self) -> Price {
        match self.first(&["price"]) {
            Some(Value::Number(n)) => match (n.as_u64(), n.as_f64()) {
                (Some(units), _) => Price::new(units),
                (None, Some(f)) => Price::try_from(f).unwrap_or(Price::ZERO),
                (None, None) => Price::ZERO,
            },
            Some(Value::String(s)) => Price::try_from(s.as_str()).unwrap_or(Price::ZERO),
            _ => Price::ZERO,
        }
    }

    fn selected(&self) -> bool {
        if let Some(flag) = self.first(&["selected"]).and_then(Value::as_bool) {
            return flag;
        }
        self.text(&["className"]).is_some_and(|c| c.split_whitespace().any(|cls| cls == "selected"))
    }

    fn photo(&self) -> Option<PhotoRef> {
        let url = self.non_empty(&["photoUrl"]);
        let backup = self.non_empty(&["backupColor"]);
        if url.is_none() && backup.is_none() {
            return None;
        }
        Some(PhotoRef {
            url: url.map(str::to_string),
            backup_color: backup.unwrap_or(DEFAULT_BACKUP_COLOR).to_string(),
        })
    }

    fn to_item(&self, id: ItemId) -> Item {
        let kind = self.kind();
        let entry = kind.entry();
        let position = Point::new(self.length(&["x", "left"]).unwrap_or(0.0), self.length(&["y", "top"]).unwrap_or(0.0));
        let size = Size::new(
            self.length(&["width"]).unwrap_or(entry.size.width),
            self.length(&["height"]).unwrap_or(entry.size.height),
        );
        let transform = self.text(&["transform"]).and_then(Transform::parse_css).unwrap_or_default();
        let label = self.non_empty(&["label", "textContent"]).unwrap_or(entry.label).to_string();
        Item {
            id,
            label,
            position,
            size,
            transform,
            color_filter: self.text(&["filter"]).and_then(normalize_filter),
            price: self.price(),
            photo: self.photo(),
            selected: self.selected(),
            kind,
        }
    }
}

/// Parse `"120px"`, `"120"` or `" 12.5px "` into a number.
fn parse_css_length(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
    digits.parse().ok()
}
