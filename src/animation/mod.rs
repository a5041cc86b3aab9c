//! Animation value store.
//!
//! Scalar values that move towards a target over time, plus the easing and
//! interpolation helpers that turn them into presentation styles. Each value
//! has exactly one writer: the gesture recognizer owns the card offset, the
//! feedback orchestrator owns shake, overlay and scroll.

mod easing;
mod interpolate;
mod value;

pub use easing::Easing;
pub use interpolate::{interpolate, Extrapolation};
pub use value::{AnimationValue, TransitionSpec};
