#![forbid(unsafe_code)]

//! Per-blob motion state and the single-frame update.

use rand::Rng;

use crate::geometry::{DriftBounds, Offset};
use crate::params::FieldParams;

/// Sink for a blob's per-frame offset.
///
/// Hosts implement this for whatever carries the visual position (a DOM
/// element's style, a sprite transform, a test recorder).
pub trait BlobElement {
    fn set_offset(&mut self, offset: Offset);
}

/// Headless element: offsets are computed and discarded.
impl BlobElement for () {
    #[inline]
    fn set_offset(&mut self, _offset: Offset) {}
}

/// Keeps only the most recent offset.
impl BlobElement for Offset {
    #[inline]
    fn set_offset(&mut self, offset: Offset) {
        *self = offset;
    }
}

/// One drifting blob.
///
/// `drift_*` accumulates velocity and is kept within the field's bounds.
/// The wave component is recomputed from time each frame and never
/// accumulates.
#[derive(Debug, Clone, PartialEq)]
pub struct Blob<E> {
    pub drift_x: f64,
    pub drift_y: f64,
    pub vx: f64,
    pub vy: f64,
    pub target_vx: f64,
    pub target_vy: f64,
    /// Frames left before the next target re-pick. Zero means re-pick on the
    /// next step.
    pub wander_timer: u32,
    pub amp: f64,
    /// Wave angular speed (radians per millisecond).
    pub speed: f64,
    pub phase: f64,
    pub phase_y: f64,
    pub element: E,
}

/// Outcome of [`Blob::advance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlobUpdate {
    /// Offset to present (drift + wave).
    pub offset: Offset,
    /// A new target velocity was picked this frame.
    pub retargeted: bool,
    /// At least one axis hit its bound and reflected.
    pub reflected: bool,
}

impl<E> Blob<E> {
    /// A blob at rest with explicit wave parameters and zero velocity.
    pub fn at_rest(element: E, amp: f64, speed: f64, phase: f64, phase_y: f64) -> Self {
        Self {
            drift_x: 0.0,
            drift_y: 0.0,
            vx: 0.0,
            vy: 0.0,
            target_vx: 0.0,
            target_vy: 0.0,
            wander_timer: 0,
            amp,
            speed,
            phase,
            phase_y,
            element,
        }
    }

    /// A blob with randomized velocity and wave parameters.
    ///
    /// Drift and target velocity start at zero and the wander countdown is
    /// already expired, so the first step picks a target.
    pub fn with_random_motion<R: Rng + ?Sized>(
        element: E,
        params: &FieldParams,
        rng: &mut R,
    ) -> Self {
        let vx = params.initial_velocity.sample(rng);
        let vy = params.initial_velocity.sample(rng);
        let amp = params.amplitude.sample(rng);
        let speed = params.wave_speed.sample(rng);
        let phase = params.phase.sample(rng);
        let phase_y = params.phase.sample(rng);
        Self {
            vx,
            vy,
            ..Self::at_rest(element, amp, speed, phase, phase_y)
        }
    }

    /// Wave component at `time_ms`.
    #[inline]
    pub fn wave(&self, time_ms: f64, params: &FieldParams) -> Offset {
        let angle = time_ms * self.speed;
        Offset {
            x: (angle + self.phase).sin() * self.amp,
            y: (angle * params.wave_y_speed + self.phase_y).cos()
                * self.amp
                * params.wave_y_amplitude,
        }
    }

    /// Run one frame of motion and return the offset to present.
    ///
    /// Does not touch `element`; the field writes the offset afterwards.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        time_ms: f64,
        bounds: DriftBounds,
        params: &FieldParams,
        rng: &mut R,
    ) -> BlobUpdate {
        let retargeted = self.wander_timer == 0;
        if retargeted {
            self.target_vx = params.target_velocity.sample(rng);
            self.target_vy = params.target_velocity.sample(rng);
            self.wander_timer = params.wander_frames.sample(rng);
        }

        self.vx += (self.target_vx - self.vx) * params.velocity_blend;
        self.vy += (self.target_vy - self.vy) * params.velocity_blend;
        self.wander_timer = self.wander_timer.saturating_sub(1);

        let wave = self.wave(time_ms, params);

        self.drift_x += self.vx;
        self.drift_y += self.vy;

        let reflected_x = reflect(
            &mut self.drift_x,
            &mut self.vx,
            bounds.x,
            params.restitution,
        );
        let reflected_y = reflect(
            &mut self.drift_y,
            &mut self.vy,
            bounds.y,
            params.restitution,
        );

        BlobUpdate {
            offset: Offset::new(self.drift_x + wave.x, self.drift_y + wave.y),
            retargeted,
            reflected: reflected_x || reflected_y,
        }
    }
}

impl<E: BlobElement> Blob<E> {
    /// Advance one frame and write the resulting offset to the element.
    #[inline]
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        time_ms: f64,
        bounds: DriftBounds,
        params: &FieldParams,
        rng: &mut R,
    ) -> BlobUpdate {
        let update = self.advance(time_ms, bounds, params, rng);
        self.element.set_offset(update.offset);
        update
    }
}

/// Clamp `drift` into `[-bound, bound]`, scaling `velocity` by `restitution`
/// when it was outside.
#[inline]
fn reflect(drift: &mut f64, velocity: &mut f64, bound: f64, restitution: f64) -> bool {
    let bound = bound.max(0.0);
    if *drift > bound || *drift < -bound {
        *drift = drift.clamp(-bound, bound);
        *velocity *= restitution;
        true
    } else {
        false
    }
}
