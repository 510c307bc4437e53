//! # Animation
//!
//! Time-driven helpers that sit on top of the deformation and scene modules.
//!
//! - [`DeformerAnimator`] - Keyframes deformer parameters and writes the blend into a shared deformer
//! - [`Spline`] - Catmull-Rom path with chord-length parameterization
//! - [`SplineAnimation`] - Moves a transform along a spline in once, loop or ping-pong mode

pub mod deformer_animator;
pub mod spline;
pub mod spline_animation;

pub use deformer_animator::{DeformerAnimator, DeformerKeyframe};
pub use spline::{catmull_rom, Spline};
pub use spline_animation::{SplineAnimMode, SplineAnimation, SplineInterpolation};
