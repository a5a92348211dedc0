#![forbid(unsafe_code)]

//! The blob field: owns every blob and advances them once per frame.
//!
//! A [`HueField`] is built in two parts:
//!
//! 1. blobs already present in the host (for example hand-placed elements) are
//!    [adopted](HueField::adopt) and only receive motion parameters;
//! 2. the rest of the page is [filled](HueField::fill) with generated blobs,
//!    one per `spacing` slot, each spawned through a [`BlobHost`].
//!
//! After that the host calls [`HueField::step`] from its per-frame callback.
//!
//! # Example
//!
//! ```
//! use hue_field::{FieldParams, HueField, Offset, Viewport};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! struct Headless;
//! impl hue_field::BlobHost for Headless {
//!     type Element = Offset;
//!     fn spawn_blob(&mut self, _layout: &hue_field::BlobLayout) -> Option<Offset> {
//!         Some(Offset::ZERO)
//!     }
//! }
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let viewport = Viewport::new(1280.0, 720.0);
//! let mut field = HueField::initialize(
//!     &mut Headless,
//!     Vec::new(),
//!     viewport,
//!     3000.0,
//!     FieldParams::default(),
//!     &mut rng,
//! )?;
//! let stats = field.step(16.0, &mut rng);
//! assert_eq!(stats.updated, field.len());
//! # Ok::<(), hue_field::ParamsError>(())
//! ```

use rand::Rng;

use crate::blob::{Blob, BlobElement};
use crate::geometry::{DriftBounds, Viewport};
use crate::layout::{BlobLayout, fill_count};
use crate::params::{FieldParams, ParamsError};
use crate::snapshot::{BlobSnapshot, FieldSnapshot};

/// Creates the visual element for a generated blob.
pub trait BlobHost {
    type Element: BlobElement;

    /// Create and attach an element for `layout`. Returning `None` skips the
    /// blob (the host could not create it).
    fn spawn_blob(&mut self, layout: &BlobLayout) -> Option<Self::Element>;
}

/// Counters for one [`HueField::step`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepStats {
    /// Index of the frame just stepped (starts at 1).
    pub frame_idx: u64,
    /// Elements written this frame.
    pub updated: usize,
    /// Blobs that picked a new target velocity.
    pub retargeted: usize,
    /// Blobs that hit a bound and reflected.
    pub reflected: usize,
}

/// Collection of drifting blobs plus the viewport-derived bounds they live in.
#[derive(Debug, Clone)]
pub struct HueField<E> {
    params: FieldParams,
    viewport: Viewport,
    bounds: DriftBounds,
    blobs: Vec<Blob<E>>,
    frame_idx: u64,
}

impl<E: BlobElement> HueField<E> {
    /// Empty field for `viewport`.
    ///
    /// # Errors
    ///
    /// Returns the first problem [`FieldParams::validate`] finds.
    pub fn new(params: FieldParams, viewport: Viewport) -> Result<Self, ParamsError> {
        params.validate()?;
        let bounds = viewport.bounds(params.bounds_fraction);
        Ok(Self {
            params,
            viewport,
            bounds,
            blobs: Vec::new(),
            frame_idx: 0,
        })
    }

    /// Build the whole field: adopt `fixed`, then fill the page through
    /// `host`. Fails only on invalid `params`.
    pub fn initialize<H, R>(
        host: &mut H,
        fixed: impl IntoIterator<Item = E>,
        viewport: Viewport,
        page_height: f64,
        params: FieldParams,
        rng: &mut R,
    ) -> Result<Self, ParamsError>
    where
        H: BlobHost<Element = E>,
        R: Rng + ?Sized,
    {
        let mut field = Self::new(params, viewport)?;
        for element in fixed {
            field.adopt(element, rng);
        }
        field.fill(host, page_height, rng);
        Ok(field)
    }

    /// Add an existing element with randomized motion.
    pub fn adopt<R: Rng + ?Sized>(&mut self, element: E, rng: &mut R) {
        self.blobs
            .push(Blob::with_random_motion(element, &self.params, rng));
    }

    /// Add an already-configured blob.
    pub fn push(&mut self, blob: Blob<E>) {
        self.blobs.push(blob);
    }

    /// Generate blobs down the page. Returns how many were spawned.
    ///
    /// The slot count comes from [`fill_count`] with this field's viewport
    /// height; slots whose element the host fails to create are skipped.
    pub fn fill<H, R>(&mut self, host: &mut H, page_height: f64, rng: &mut R) -> usize
    where
        H: BlobHost<Element = E>,
        R: Rng + ?Sized,
    {
        let slots = fill_count(self.viewport.height, page_height, &self.params);
        let mut spawned = 0;
        for index in 0..slots {
            let layout = BlobLayout::random(index, &self.params, rng);
            if let Some(element) = host.spawn_blob(&layout) {
                self.adopt(element, rng);
                spawned += 1;
            }
        }
        crate::debug!(slots, spawned, total = self.blobs.len(), "filled hue field");
        spawned
    }

    /// Advance every blob one frame and write its offset.
    ///
    /// `time_ms` is the host's frame timestamp; the wave is a pure function
    /// of it, so any monotonic or non-monotonic clock is accepted.
    pub fn step<R: Rng + ?Sized>(&mut self, time_ms: f64, rng: &mut R) -> StepStats {
        self.frame_idx += 1;
        let mut stats = StepStats {
            frame_idx: self.frame_idx,
            ..StepStats::default()
        };
        for blob in &mut self.blobs {
            let update = blob.step(time_ms, self.bounds, &self.params, rng);
            stats.updated += 1;
            stats.retargeted += usize::from(update.retargeted);
            stats.reflected += usize::from(update.reflected);
        }
        crate::trace!(
            frame = stats.frame_idx,
            updated = stats.updated,
            retargeted = stats.retargeted,
            reflected = stats.reflected,
            "stepped hue field"
        );
        stats
    }

    /// Recompute drift bounds for a new viewport. Blobs outside the new
    /// bounds are pulled back on the next step.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.bounds = viewport.bounds(self.params.bounds_fraction);
        crate::debug!(width = viewport.width, height = viewport.height, "resized hue field");
    }
}

impl<E> HueField<E> {
    #[inline]
    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn bounds(&self) -> DriftBounds {
        self.bounds
    }

    /// Frames stepped so far.
    #[inline]
    pub fn frame_idx(&self) -> u64 {
        self.frame_idx
    }

    #[inline]
    pub fn blobs(&self) -> &[Blob<E>] {
        &self.blobs
    }

    #[inline]
    pub fn blobs_mut(&mut self) -> &mut [Blob<E>] {
        &mut self.blobs
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    /// Capture motion state for comparison or golden tests.
    pub fn snapshot(&self, time_ms: f64) -> FieldSnapshot {
        FieldSnapshot {
            frame_idx: self.frame_idx,
            blobs: self
                .blobs
                .iter()
                .map(|blob| {
                    let wave = blob.wave(time_ms, &self.params);
                    BlobSnapshot {
                        drift_x: blob.drift_x,
                        drift_y: blob.drift_y,
                        vx: blob.vx,
                        vy: blob.vy,
                        wander_timer: blob.wander_timer,
                        offset_x: blob.drift_x + wave.x,
                        offset_y: blob.drift_y + wave.y,
                    }
                })
                .collect(),
        }
    }
}
