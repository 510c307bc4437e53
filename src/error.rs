//! # Error Types
//!
//! Errors surfaced by the deformation core. Per-vertex deformation never fails;
//! these cover broken preconditions at buffer boundaries, property writes coming
//! from inspectors or animators, and spline sampling.

use thiserror::Error;

/// Errors raised by vertex buffers, deformers and scene-graph accessors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeformError {
    /// Two buffers that must have the same vertex count do not
    #[error("vertex buffer size mismatch: expected {expected} vertices, found {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Index-based access past the end of a buffer or child list
    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Property write naming a property the owner never registered
    #[error("{owner} has no property named `{name}`")]
    UnknownProperty { owner: String, name: String },

    /// Property write whose value variant does not match the registered one
    #[error("property `{name}` expects a {expected} value")]
    PropertyType { name: String, expected: &'static str },

    /// A shared deformer was still borrowed when the stack tried to run it
    #[error("{0} deformer is already borrowed")]
    DeformerBorrowed(String),
}

/// Errors raised when sampling a spline path
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplineError {
    #[error("spline needs at least {required} control points, has {actual}")]
    NotEnoughPoints { required: usize, actual: usize },
}
