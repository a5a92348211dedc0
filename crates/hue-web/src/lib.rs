#![forbid(unsafe_code)]

//! Web host for the hue field.
//!
//! Design goals:
//! - **Host-driven**: the page's `requestAnimationFrame` callback calls
//!   `step(timestamp)`; this crate never schedules frames or reads clocks.
//! - **Dormant when absent**: a page without a `.hue-field` container gets an
//!   inert instance instead of an error.
//! - **Native-checkable**: the runner and style formatting have no `web-sys`
//!   dependency; only the `wasm32` binding touches the DOM.

pub mod runner;
pub mod style;

pub use runner::{FieldRunner, HueFieldOptions, RunnerStep};

use core::fmt;

use hue_field::ParamsError;

/// Host error type.
#[derive(Debug, Clone, PartialEq)]
pub enum HostError {
    /// Options string was not valid JSON for [`HueFieldOptions`].
    Options(String),
    /// Options parsed but the parameters were rejected.
    Params(ParamsError),
    /// A required browser object was missing.
    Dom(&'static str),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Options(msg) => write!(f, "invalid options: {msg}"),
            Self::Params(err) => write!(f, "invalid parameters: {err}"),
            Self::Dom(what) => write!(f, "unavailable: {what}"),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Params(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParamsError> for HostError {
    fn from(err: ParamsError) -> Self {
        Self::Params(err)
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::HueFieldWeb;

/// Native builds compile this crate as a stub so `cargo check --workspace` stays
/// green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct HueFieldWeb;

#[cfg(not(target_arch = "wasm32"))]
impl HueFieldWeb {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn params_error_is_source() {
        let err = HostError::from(ParamsError::NonFinite { field: "alpha" });
        assert_eq!(
            err.to_string(),
            "invalid parameters: alpha: value must be finite"
        );
        assert!(err.source().is_some());
        assert!(HostError::Dom("window").source().is_none());
    }
}
