//! Rectangles addressed by locations.

use serde::{Deserialize, Serialize};

use crate::fraction::{Fraction, FractionError};

/// A rectangle in coordinates relative to its containing area.
///
/// Every field is expected in `[0, 1]` with `x + width <= 1` and
/// `y + height <= 1`, but decoded values are kept as-is; consumers call
/// [`NormRect::clamped`] before laying anything out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl NormRect {
    /// The whole containing area.
    pub const FULL: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check that every field is a valid fraction.
    pub fn validate(&self) -> Result<(), FractionError> {
        for value in [self.x, self.y, self.width, self.height] {
            Fraction::new(value)?;
        }
        Ok(())
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Clamp into the unit square so the rectangle fits its container.
    ///
    /// NaN fields become 0. Width and height shrink so that the rectangle
    /// does not cross the right or bottom border.
    #[must_use]
    pub fn clamped(&self) -> Self {
        let unit = |value: f64| if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        let x = unit(self.x);
        let y = unit(self.y);
        Self {
            x,
            y,
            width: unit(self.width).min(1.0 - x),
            height: unit(self.height).min(1.0 - y),
        }
    }

    /// Check if a relative point is inside the rectangle.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

impl Default for NormRect {
    fn default() -> Self {
        Self::FULL
    }
}

/// A rectangle in screen pixels.
///
/// Coordinates are unbounded; negative values occur on multi-monitor setups
/// where a screen lies left of or above the primary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ScreenRect {
    /// Left edge (inclusive).
    pub x: i32,
    /// Top edge (inclusive).
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl ScreenRect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Check if the rectangle has no area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}
