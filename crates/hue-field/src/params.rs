#![forbid(unsafe_code)]

//! Tunable constants for layout and motion.
//!
//! [`FieldParams::default`] reproduces the stock look: blobs every 200px down
//! the page, pink-to-lilac fills, slow wandering drift with a gentle wave on
//! top. Hosts may override any subset (with the `serde` feature, missing JSON
//! keys fall back to the defaults) and must call [`FieldParams::validate`]
//! before handing the parameters to a field.

use core::f64::consts::TAU;
use core::fmt;

use rand::Rng;

/// Hard ceiling on generated blobs per field, whatever `max_blobs` says.
pub const MAX_BLOBS: usize = 4096;

/// Half-open sampling range `[min, max)`. `min == max` yields a constant.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    #[inline]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Span centered on zero: `[-limit, limit)`.
    #[inline]
    pub const fn symmetric(limit: f64) -> Self {
        Self {
            min: -limit,
            max: limit,
        }
    }

    /// Draw one uniform sample.
    #[inline]
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> f64 {
        self.min + rng.random::<f64>() * (self.max - self.min)
    }

    fn check(self, field: &'static str) -> Result<(), ParamsError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ParamsError::NonFinite { field });
        }
        if self.min > self.max {
            return Err(ParamsError::InvertedSpan {
                field,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Inclusive frame-count range for the wander countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameSpan {
    pub min: u32,
    pub max: u32,
}

impl FrameSpan {
    #[inline]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> u32 {
        rng.random_range(self.min..=self.max)
    }
}

/// Parameters controlling blob layout and motion.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct FieldParams {
    /// Vertical distance between consecutive generated blobs (px).
    pub spacing: f64,
    /// Maximum extra downward jitter added to each blob's slot (px).
    pub jitter: f64,
    /// The field covers at least this many viewport heights.
    pub viewport_fill: f64,
    /// Upper limit on generated blobs; slots past it are not filled.
    pub max_blobs: usize,
    /// Blob diameter (px).
    pub size: Span,
    /// Horizontal position as a percent of container width.
    pub left_percent: Span,
    /// Fixed red channel of the fill color.
    pub red: u8,
    pub green: Span,
    pub blue: Span,
    /// Fill alpha in [0, 1].
    pub alpha: f64,
    /// Starting velocity per axis (px/frame).
    pub initial_velocity: Span,
    /// Target velocity re-picked per axis whenever the wander countdown expires.
    pub target_velocity: Span,
    /// Frames between target re-picks.
    pub wander_frames: FrameSpan,
    /// Fraction of the gap to the target velocity closed per frame.
    pub velocity_blend: f64,
    /// Wave amplitude (px).
    pub amplitude: Span,
    /// Wave angular speed (radians per millisecond).
    pub wave_speed: Span,
    /// Phase offsets (radians).
    pub phase: Span,
    /// Vertical wave runs at this fraction of the horizontal speed.
    pub wave_y_speed: f64,
    /// Vertical wave amplitude as a fraction of the horizontal one.
    pub wave_y_amplitude: f64,
    /// Drift bound as a fraction of each viewport dimension.
    pub bounds_fraction: f64,
    /// Velocity multiplier applied on hitting a bound.
    pub restitution: f64,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            spacing: 200.0,
            jitter: 140.0,
            viewport_fill: 3.5,
            max_blobs: 512,
            size: Span::new(260.0, 540.0),
            left_percent: Span::new(4.0, 96.0),
            red: 255,
            green: Span::new(170.0, 200.0),
            blue: Span::new(200.0, 235.0),
            alpha: 0.68,
            initial_velocity: Span::symmetric(0.09),
            target_velocity: Span::symmetric(0.175),
            wander_frames: FrameSpan::new(140, 300),
            velocity_blend: 0.015,
            amplitude: Span::new(60.0, 130.0),
            wave_speed: Span::new(0.0012, 0.0021),
            phase: Span::new(0.0, TAU),
            wave_y_speed: 0.9,
            wave_y_amplitude: 0.65,
            bounds_fraction: 0.45,
            restitution: -0.8,
        }
    }
}

impl FieldParams {
    /// Check every field for values the animator cannot work with.
    pub fn validate(&self) -> Result<(), ParamsError> {
        for (field, span) in [
            ("size", self.size),
            ("left_percent", self.left_percent),
            ("green", self.green),
            ("blue", self.blue),
            ("initial_velocity", self.initial_velocity),
            ("target_velocity", self.target_velocity),
            ("amplitude", self.amplitude),
            ("wave_speed", self.wave_speed),
            ("phase", self.phase),
        ] {
            span.check(field)?;
        }

        for (field, value) in [
            ("spacing", self.spacing),
            ("jitter", self.jitter),
            ("viewport_fill", self.viewport_fill),
            ("alpha", self.alpha),
            ("velocity_blend", self.velocity_blend),
            ("wave_y_speed", self.wave_y_speed),
            ("wave_y_amplitude", self.wave_y_amplitude),
            ("bounds_fraction", self.bounds_fraction),
            ("restitution", self.restitution),
        ] {
            if !value.is_finite() {
                return Err(ParamsError::NonFinite { field });
            }
        }

        out_of_range("spacing", self.spacing, self.spacing > 0.0, "> 0")?;
        out_of_range("jitter", self.jitter, self.jitter >= 0.0, ">= 0")?;
        out_of_range(
            "viewport_fill",
            self.viewport_fill,
            self.viewport_fill >= 0.0,
            ">= 0",
        )?;
        out_of_range(
            "max_blobs",
            self.max_blobs as f64,
            self.max_blobs <= MAX_BLOBS,
            "<= 4096",
        )?;
        out_of_range("size", self.size.min, self.size.min >= 0.0, ">= 0")?;
        out_of_range(
            "alpha",
            self.alpha,
            (0.0..=1.0).contains(&self.alpha),
            "in [0, 1]",
        )?;
        for (field, span) in [("green", self.green), ("blue", self.blue)] {
            let ok = span.min >= 0.0 && span.max <= 255.0;
            let bad = if span.min < 0.0 { span.min } else { span.max };
            out_of_range(field, bad, ok, "in [0, 255]")?;
        }
        out_of_range(
            "velocity_blend",
            self.velocity_blend,
            self.velocity_blend > 0.0 && self.velocity_blend <= 1.0,
            "in (0, 1]",
        )?;
        out_of_range(
            "restitution",
            self.restitution,
            (-1.0..=0.0).contains(&self.restitution),
            "in [-1, 0]",
        )?;
        out_of_range(
            "bounds_fraction",
            self.bounds_fraction,
            self.bounds_fraction > 0.0 && self.bounds_fraction <= 1.0,
            "in (0, 1]",
        )?;

        let frames = self.wander_frames;
        if frames.min == 0 || frames.min > frames.max {
            return Err(ParamsError::WanderFrames {
                min: frames.min,
                max: frames.max,
            });
        }
        Ok(())
    }
}

#[inline]
fn out_of_range(
    field: &'static str,
    value: f64,
    ok: bool,
    expected: &'static str,
) -> Result<(), ParamsError> {
    if ok {
        Ok(())
    } else {
        Err(ParamsError::OutOfRange {
            field,
            value,
            expected,
        })
    }
}

/// Rejected parameter set.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamsError {
    /// A value was NaN or infinite.
    NonFinite { field: &'static str },
    /// A span had `min > max`.
    InvertedSpan {
        field: &'static str,
        min: f64,
        max: f64,
    },
    /// A value fell outside its accepted range.
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
    /// Wander countdown range was empty or allowed a zero-frame countdown.
    WanderFrames { min: u32, max: u32 },
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { field } => write!(f, "{field}: value must be finite"),
            Self::InvertedSpan { field, min, max } => {
                write!(f, "{field}: min {min} exceeds max {max}")
            }
            Self::OutOfRange {
                field,
                value,
                expected,
            } => write!(f, "{field}: {value} is out of range (expected {expected})"),
            Self::WanderFrames { min, max } => {
                write!(f, "wander_frames: [{min}, {max}] must satisfy 1 <= min <= max")
            }
        }
    }
}

impl std::error::Error for ParamsError {}
