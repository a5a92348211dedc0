#![forbid(unsafe_code)]

//! Viewport, bounds, and offset primitives.

/// Host viewport size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Drift bounds for this viewport: each axis extends `fraction` of the
    /// viewport dimension in both directions from the blob's rest position.
    ///
    /// Negative or non-finite dimensions collapse to a zero bound.
    #[inline]
    pub fn bounds(self, fraction: f64) -> DriftBounds {
        DriftBounds {
            x: half_extent(self.width, fraction),
            y: half_extent(self.height, fraction),
        }
    }
}

#[inline]
fn half_extent(dimension: f64, fraction: f64) -> f64 {
    let extent = dimension * fraction;
    if extent.is_finite() && extent > 0.0 {
        extent
    } else {
        0.0
    }
}

/// Symmetric drift limits. A blob's drift stays within `[-x, x]` and `[-y, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DriftBounds {
    pub x: f64,
    pub y: f64,
}

impl DriftBounds {
    #[inline]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x.abs() <= self.x && y.abs() <= self.y
    }
}

/// Visual offset written to a blob element (drift plus wave), in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
