//! Test utilities: a scriptable runtime, a recording surface, a monospace
//! shaper, and a standard instrumented widget tree.
//!
//! Compiled for this crate's own tests and for downstream crates through the
//! `testing` feature.

/// Scriptable input source and clock.
pub mod runtime;
/// Monospace reference shaper.
pub mod shaper;
/// Recording surface and image registry.
pub mod surface;
/// Standard instrumented widget tree.
pub mod ttree;

pub use runtime::TestRuntime;
pub use shaper::MonoShaper;
pub use surface::{DrawOp, TestImages, TestSurface};
pub use ttree::{OutcomeTarget, TestTree, get_state, reset_state, run_ttree};
