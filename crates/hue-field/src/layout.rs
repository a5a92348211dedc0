#![forbid(unsafe_code)]

//! Placement of procedurally generated blobs down the page.

use rand::Rng;

use crate::color::BlobColor;
use crate::params::{FieldParams, MAX_BLOBS, Span};

/// Where and how a generated blob is drawn. Consumed by the host when it
/// creates the blob's element.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlobLayout {
    /// Distance from the top of the container (px).
    pub top: f64,
    /// Distance from the left edge as a percent of container width.
    pub left_percent: f64,
    /// Width and height (px).
    pub size: f64,
    pub color: BlobColor,
}

impl BlobLayout {
    /// Layout for the blob in slot `index`: the slot's top edge plus jitter,
    /// random horizontal position, size, and fill.
    pub fn random<R: Rng + ?Sized>(index: usize, params: &FieldParams, rng: &mut R) -> Self {
        let slot = index as f64 * params.spacing;
        let top = slot + Span::new(0.0, params.jitter).sample(rng);
        let size = params.size.sample(rng);
        let left_percent = params.left_percent.sample(rng);
        let color = BlobColor::random(params, rng);
        Self {
            top,
            left_percent,
            size,
            color,
        }
    }
}

/// Number of blobs needed to cover the page.
///
/// The covered height is the larger of the page height and
/// `viewport_fill` viewport heights, divided into `spacing`-sized slots
/// (rounded up) and capped at `max_blobs` (never more than [`MAX_BLOBS`]).
/// Non-finite or non-positive inputs cover nothing.
pub fn fill_count(viewport_height: f64, page_height: f64, params: &FieldParams) -> usize {
    let height = page_height.max(viewport_height * params.viewport_fill);
    if !height.is_finite() || height <= 0.0 || params.spacing.is_nan() || params.spacing <= 0.0 {
        return 0;
    }
    let cap = params.max_blobs.min(MAX_BLOBS);
    (height / params.spacing).ceil().min(cap as f64) as usize
}

/// Layouts for every generated blob, top to bottom.
pub fn plan_layout<R: Rng + ?Sized>(
    viewport_height: f64,
    page_height: f64,
    params: &FieldParams,
    rng: &mut R,
) -> Vec<BlobLayout> {
    let count = fill_count(viewport_height, page_height, params);
    (0..count)
        .map(|index| BlobLayout::random(index, params, rng))
        .collect()
}
