#![forbid(unsafe_code)]

//! Hue field: decorative blobs that drift behind a page.
//!
//! Each blob combines two motions:
//! - **drift**: a damped random walk. Velocity eases toward a target that is
//!   re-picked every few seconds, and the accumulated drift reflects off
//!   bounds derived from the viewport.
//! - **wave**: a sinusoidal offset computed from the frame timestamp.
//!
//! The sum is written to the blob's element once per frame. Randomness is
//! always passed in as a [`rand::Rng`], so a seeded generator reproduces a run
//! exactly.
//!
//! This crate has no host dependencies; `hue-web` binds it to the DOM.

pub mod blob;
pub mod color;
pub mod field;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod params;
pub mod snapshot;

pub use blob::{Blob, BlobElement, BlobUpdate};
pub use color::BlobColor;
pub use field::{BlobHost, HueField, StepStats};
pub use geometry::{DriftBounds, Offset, Viewport};
pub use layout::{BlobLayout, fill_count, plan_layout};
pub use params::{FieldParams, FrameSpan, MAX_BLOBS, ParamsError, Span};
pub use snapshot::{BlobSnapshot, FieldSnapshot};

// Re-export tracing macros at crate root so `crate::debug!` resolves either way.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace};
