#![forbid(unsafe_code)]

//! Host-driven runner for a [`HueField`].
//!
//! [`FieldRunner`] owns the field and its random generator. The host
//! (JavaScript) owns the loop and calls [`FieldRunner::step`] from
//! `requestAnimationFrame` with the frame timestamp:
//!
//! ```ignore
//! let mut runner = FieldRunner::mount(&mut host, fixed, viewport, page_height, options, seed)?;
//! // per frame:
//! let step = runner.step(timestamp_ms);
//! if !step.running {
//!     // stop scheduling frames
//! }
//! ```
//!
//! No threads, no timers, no clock reads: time comes from the host.

use hue_field::{BlobElement, BlobHost, FieldParams, HueField, Viewport};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;

use crate::HostError;

/// Mount options, usually parsed from a JSON string supplied by the page.
///
/// Every [`FieldParams`] field may appear at the top level; omitted fields
/// keep their defaults.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct HueFieldOptions {
    /// Fixed seed for a reproducible field. Drawn by the host when absent.
    pub seed: Option<u64>,
    #[serde(flatten)]
    pub params: FieldParams,
}

impl HueFieldOptions {
    /// Parse and validate options. Blank input yields the defaults.
    pub fn from_json(json: &str) -> Result<Self, HostError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let options: Self =
            serde_json::from_str(json).map_err(|err| HostError::Options(err.to_string()))?;
        options.params.validate()?;
        Ok(options)
    }
}

/// Result of a single [`FieldRunner::step`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerStep {
    /// Whether the host should keep scheduling frames.
    pub running: bool,
    /// Whether blobs were advanced during this call.
    pub stepped: bool,
    /// Frames advanced so far.
    pub frame_idx: u64,
    /// Elements written during this call.
    pub blobs: usize,
}

/// Non-blocking driver pairing a field with its seeded generator.
#[derive(Debug)]
pub struct FieldRunner<E> {
    field: HueField<E>,
    rng: StdRng,
    seed: u64,
    running: bool,
    dormant: bool,
}

impl<E: BlobElement> FieldRunner<E> {
    /// Build the field through `host` and wrap it.
    ///
    /// The seed from `options` wins over `fallback_seed`. Parameters are
    /// validated here too, so options built in code (not through
    /// [`HueFieldOptions::from_json`]) are checked before anything is spawned.
    pub fn mount<H>(
        host: &mut H,
        fixed: impl IntoIterator<Item = E>,
        viewport: Viewport,
        page_height: f64,
        options: HueFieldOptions,
        fallback_seed: u64,
    ) -> Result<Self, HostError>
    where
        H: BlobHost<Element = E>,
    {
        let seed = options.seed.unwrap_or(fallback_seed);
        let mut rng = StdRng::seed_from_u64(seed);
        let field =
            HueField::initialize(host, fixed, viewport, page_height, options.params, &mut rng)?;
        hue_field::debug!(
            seed,
            blobs = field.len(),
            width = viewport.width,
            height = viewport.height,
            page_height,
            "mounted hue field"
        );
        Ok(Self {
            field,
            rng,
            seed,
            running: true,
            dormant: false,
        })
    }

    /// Runner for a page without a field container. It never steps and
    /// reports `running == false` so the page can drop its frame loop.
    pub fn dormant(viewport: Viewport, params: FieldParams) -> Result<Self, HostError> {
        hue_field::debug!("no hue field container; animation dormant");
        Ok(Self {
            field: HueField::new(params, viewport)?,
            rng: StdRng::seed_from_u64(0),
            seed: 0,
            running: false,
            dormant: true,
        })
    }

    /// Advance one frame at host time `time_ms`.
    pub fn step(&mut self, time_ms: f64) -> RunnerStep {
        if !self.running || self.dormant {
            return RunnerStep {
                running: self.running,
                stepped: false,
                frame_idx: self.field.frame_idx(),
                blobs: 0,
            };
        }
        let stats = self.field.step(time_ms, &mut self.rng);
        RunnerStep {
            running: true,
            stepped: true,
            frame_idx: stats.frame_idx,
            blobs: stats.updated,
        }
    }

    /// Apply a new viewport size to the drift bounds.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.field.resize(Viewport::new(width, height));
    }

    /// End the loop. Later steps report `running == false`.
    pub fn stop(&mut self) {
        self.running = false;
    }
}

impl<E> FieldRunner<E> {
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn is_dormant(&self) -> bool {
        self.dormant
    }

    /// Seed the generator started from (`0` for dormant runners).
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn field(&self) -> &HueField<E> {
        &self.field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hue_field::{BlobLayout, FrameSpan, Offset, ParamsError};
    use pretty_assertions::assert_eq;

    struct Headless;

    impl BlobHost for Headless {
        type Element = Offset;

        fn spawn_blob(&mut self, _layout: &BlobLayout) -> Option<Offset> {
            Some(Offset::ZERO)
        }
    }

    fn runner(options: HueFieldOptions) -> FieldRunner<Offset> {
        FieldRunner::mount(
            &mut Headless,
            vec![Offset::ZERO],
            Viewport::new(1280.0, 720.0),
            1800.0,
            options,
            42,
        )
        .expect("default options mount")
    }

    #[test]
    fn blank_options_are_defaults() {
        assert_eq!(HueFieldOptions::from_json("").ok(), Some(HueFieldOptions::default()));
        assert_eq!(HueFieldOptions::from_json("  ").ok(), Some(HueFieldOptions::default()));
    }

    #[test]
    fn options_parse_seed_and_flattened_params() {
        let options = HueFieldOptions::from_json(r#"{ "seed": 9, "spacing": 250.0 }"#)
            .expect("options should parse");
        assert_eq!(options.seed, Some(9));
        assert_eq!(options.params.spacing, 250.0);
        assert_eq!(options.params.jitter, FieldParams::default().jitter);
    }

    #[test]
    fn malformed_options_are_rejected() {
        let err = HueFieldOptions::from_json("{ seed: ").unwrap_err();
        assert!(matches!(err, HostError::Options(_)), "got {err:?}");
    }

    #[test]
    fn invalid_params_are_rejected() {
        let err = HueFieldOptions::from_json(r#"{ "restitution": 2.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            HostError::Params(ParamsError::OutOfRange {
                field: "restitution",
                ..
            })
        ));
    }

    #[test]
    fn option_seed_overrides_fallback() {
        let seeded = runner(HueFieldOptions {
            seed: Some(7),
            ..HueFieldOptions::default()
        });
        assert_eq!(seeded.seed(), 7);
        assert_eq!(runner(HueFieldOptions::default()).seed(), 42);
    }

    #[test]
    fn steps_until_stopped() {
        let mut runner = runner(HueFieldOptions::default());
        // 1 fixed + max(1800, 720 * 3.5 = 2520) / 200 -> 13 generated
        assert_eq!(runner.field().len(), 14);

        let step = runner.step(16.0);
        assert_eq!(
            step,
            RunnerStep {
                running: true,
                stepped: true,
                frame_idx: 1,
                blobs: 14
            }
        );

        assert!(runner.is_running());
        runner.stop();
        assert!(!runner.is_running());
        let step = runner.step(32.0);
        assert_eq!(
            step,
            RunnerStep {
                running: false,
                stepped: false,
                frame_idx: 1,
                blobs: 0
            }
        );
    }

    #[test]
    fn dormant_runner_never_steps() {
        let mut runner: FieldRunner<Offset> =
            FieldRunner::dormant(Viewport::new(800.0, 600.0), FieldParams::default())
                .expect("default params are valid");
        assert!(runner.is_dormant());
        assert!(!runner.is_running());
        for frame in 0..3 {
            let step = runner.step(frame as f64 * 16.0);
            assert_eq!(
                step,
                RunnerStep {
                    running: false,
                    stepped: false,
                    frame_idx: 0,
                    blobs: 0
                }
            );
        }
    }

    #[test]
    fn mount_rejects_options_built_in_code() {
        let options = HueFieldOptions {
            seed: Some(1),
            params: FieldParams {
                wander_frames: FrameSpan::new(300, 140),
                ..FieldParams::default()
            },
        };
        let err = FieldRunner::mount(
            &mut Headless,
            vec![Offset::ZERO],
            Viewport::new(1280.0, 720.0),
            1800.0,
            options,
            42,
        )
        .unwrap_err();
        assert_eq!(err, HostError::Params(ParamsError::WanderFrames { min: 300, max: 140 }));
    }

    #[test]
    fn tiny_spacing_is_capped_at_max_blobs() {
        let options = HueFieldOptions::from_json(r#"{ "spacing": 1e-9, "max_blobs": 64 }"#)
            .expect("tiny spacing is still valid");
        let runner = runner(options);
        // 1 fixed + 64 generated
        assert_eq!(runner.field().len(), 65);
    }

    #[test]
    fn same_seed_same_frames() {
        let mut a = runner(HueFieldOptions::default());
        let mut b = runner(HueFieldOptions::default());
        for frame in 0..120 {
            let t = frame as f64 * 16.67;
            a.step(t);
            b.step(t);
        }
        assert_eq!(
            a.field().snapshot(0.0).checksum(),
            b.field().snapshot(0.0).checksum()
        );
    }
}
