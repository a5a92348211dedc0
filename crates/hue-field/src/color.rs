#![forbid(unsafe_code)]

//! Blob fill colors.

use core::fmt;

use rand::Rng;

use crate::params::FieldParams;

/// Translucent RGBA fill for one blob.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlobColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f64,
}

impl BlobColor {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, alpha: f64) -> Self {
        Self { r, g, b, alpha }
    }

    /// Draw a fill from the parameter ranges. Channels are rounded to the
    /// nearest integer.
    pub fn random<R: Rng + ?Sized>(params: &FieldParams, rng: &mut R) -> Self {
        let g = params.green.sample(rng);
        let b = params.blue.sample(rng);
        Self {
            r: params.red,
            g: channel(g),
            b: channel(b),
            alpha: params.alpha,
        }
    }

    /// CSS `background` value: a radial gradient fading to transparent.
    pub fn radial_gradient(self) -> String {
        format!("radial-gradient(circle, {self}, transparent 72%)")
    }
}

#[inline]
fn channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Formats as a CSS `rgba(...)` color.
impl fmt::Display for BlobColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.alpha)
    }
}
