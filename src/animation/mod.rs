//! Animation primitives shared by every animator
//!
//! Easing curves for the position blend and the exponential smoothing that
//! drives each morph progress value.

mod easing;
mod smoothing;

pub use easing::{Easing, ease, smoothstep};
pub use smoothing::MorphProgress;
