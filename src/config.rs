//! Workspace configuration parsed from environment variables.

use tracing::warn;

use crate::consts::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_STORAGE_KEY};
use crate::geometry::Size;

#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceConfig {
    /// Canvas size assumed until the host reports the real one.
    pub canvas: Size,
    /// Storage key for the persisted snapshot.
    pub storage_key: String,
    /// Seed for item placement; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            canvas: Size::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            seed: None,
        }
    }
}

impl WorkspaceConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `WERKPLEK_CANVAS_WIDTH`: default 800
    /// - `WERKPLEK_CANVAS_HEIGHT`: default 600
    /// - `WERKPLEK_STORAGE_KEY`: default `werkplekLayout`
    /// - `WERKPLEK_SEED`: fixed placement seed, unset for OS randomness
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`], reading values through `lookup`.
    /// Unparsable or non-positive values fall back to their defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let width = parse_dimension("WERKPLEK_CANVAS_WIDTH", lookup("WERKPLEK_CANVAS_WIDTH"), defaults.canvas.width);
        let height = parse_dimension("WERKPLEK_CANVAS_HEIGHT", lookup("WERKPLEK_CANVAS_HEIGHT"), defaults.canvas.height);
        let storage_key = lookup("WERKPLEK_STORAGE_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .unwrap_or(defaults.storage_key);
        let seed = lookup("WERKPLEK_SEED").and_then(|raw| match raw.trim().parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(e) => {
                warn!(value = %raw, error = %e, "WERKPLEK_SEED is not a u64; seeding from the OS");
                None
            }
        });
        Self { canvas: Size::new(width, height), storage_key, seed }
    }
}

fn parse_dimension(var: &str, raw: Option<String>, default: f64) -> f64 {
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v,
        Ok(v) => {
            warn!(%var, value = v, default, "canvas dimension must be positive; using default");
            default
        }
        Err(e) => {
            warn!(%var, value = %raw, error = %e, default, "unparsable canvas dimension; using default");
            default
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
