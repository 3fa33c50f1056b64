//! Geometry: canvas-local points and sizes, bounds clamping, and the
//! scale + rotation transform descriptor.
//!
//! Size and transform are deliberately separate. `Size` is the layout box
//! used for clamping during drags; `Transform` is purely visual, so a scaled
//! item still clamps against its unscaled box.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// A point in canvas-local coordinates (origin at the canvas top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Width and height in length units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Clamp a proposed top-left position so the item box stays inside the canvas.
///
/// Each axis is clamped independently to `[0, canvas - item]`. When the item
/// is larger than the canvas on an axis, that axis clamps to 0: the item may
/// overflow but is never offset negatively. A non-finite result lands on 0.
#[must_use]
pub fn clamp_position(proposed: Point, item: Size, canvas: Size) -> Point {
    Point::new(clamp_axis(proposed.x, item.width, canvas.width), clamp_axis(proposed.y, item.height, canvas.height))
}

fn clamp_axis(value: f64, item_dim: f64, canvas_dim: f64) -> f64 {
    let max = (canvas_dim - item_dim).max(0.0);
    let clamped = value.clamp(0.0, max);
    if clamped.is_finite() { clamped } else { 0.0 }
}

// =============================================================
// Transform
// =============================================================

/// Visual scale + rotation of an item, applied scale-then-rotate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Linear scale factor, always > 0.
    pub scale: f64,
    /// Rotation in degrees as entered; renderers interpret it mod 360.
    pub rotation: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self { scale: 1.0, rotation: 0.0 }
    }
}

/// Build a transform from a user-facing scale percentage (100 = unscaled)
/// and a rotation in degrees.
///
/// # Errors
///
/// Returns `InvalidInput` if either value is non-finite or the scale is not positive.
pub fn compose_transform(scale_percent: f64, rotation_deg: f64) -> Result<Transform, LayoutError> {
    Ok(Transform { scale: scale_factor(scale_percent)?, rotation: checked_rotation(rotation_deg)? })
}

fn scale_factor(scale_percent: f64) -> Result<f64, LayoutError> {
    if !scale_percent.is_finite() || scale_percent <= 0.0 {
        return Err(LayoutError::InvalidInput(format!("scale must be a positive percentage, got {scale_percent}")));
    }
    Ok(scale_percent / 100.0)
}

fn checked_rotation(rotation_deg: f64) -> Result<f64, LayoutError> {
    if !rotation_deg.is_finite() {
        return Err(LayoutError::InvalidInput(format!("rotation must be finite, got {rotation_deg}")));
    }
    Ok(rotation_deg)
}

impl Transform {
    /// Scale as the percentage shown on the size slider.
    #[must_use]
    pub fn scale_percent(&self) -> f64 {
        self.scale * 100.0
    }

    /// Replace the scale, keeping the current rotation.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a non-finite or non-positive percentage.
    pub fn with_scale_percent(self, scale_percent: f64) -> Result<Self, LayoutError> {
        Ok(Self { scale: scale_factor(scale_percent)?, ..self })
    }

    /// Replace the rotation, keeping the current scale.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a non-finite angle.
    pub fn with_rotation(self, rotation_deg: f64) -> Result<Self, LayoutError> {
        Ok(Self { rotation: checked_rotation(rotation_deg)?, ..self })
    }

    /// Parse the CSS form written by `Display`, e.g. `scale(1.2) rotate(45deg)`.
    ///
    /// Either function may be missing (it keeps its identity value). Returns
    /// `None` for anything else, including non-positive scales.
    #[must_use]
    pub fn parse_css(input: &str) -> Option<Self> {
        let mut out = Self::default();
        let mut rest = input.trim();
        while !rest.is_empty() {
            let open = rest.find('(')?;
            let close = rest.find(')')?;
            if close < open {
                return None;
            }
            let name = rest[..open].trim();
            let arg = rest[open + 1..close].trim();
            match name {
                "scale" => {
                    out.scale = parse_finite(arg).filter(|s| *s > 0.0)?;
                }
                "rotate" => {
                    out.rotation = parse_finite(arg.strip_suffix("deg")?.trim())?;
                }
                _ => return None,
            }
            rest = rest[close + 1..].trim_start();
        }
        Some(out)
    }
}

fn parse_finite(raw: &str) -> Option<f64> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scale({}) rotate({}deg)", self.scale, self.rotation)
    }
}
