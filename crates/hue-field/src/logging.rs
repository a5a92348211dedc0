#![forbid(unsafe_code)]

//! Logging shim.
//!
//! With the `tracing` feature the `tracing` macros are re-exported here and at
//! the crate root. Without it, macros of the same names expand to nothing so
//! call sites (`crate::debug!(...)`) compile either way.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// No-op debug macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op trace macro when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }
}
