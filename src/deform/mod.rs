//! # Mesh Deformation
//!
//! Composable per-vertex deformers, the stack that chains them and the mesh
//! node that feeds a mesh's rest pose through the stack.
//!
//! ## Key Components
//!
//! - [`Deformer`] - Trait implemented by every deformation stage
//! - [`TwistDeformer`], [`BendDeformer`], [`ScaleDeformer`] - Falloff-weighted spatial deformers
//! - [`FunctionDeformer`], [`WaveDeformer`], [`TurbulenceDeformer`] - Displacement-function deformers
//! - [`RandomDeformer`] - Noise-driven jitter with several noise sources and modes
//! - [`DeformerStack`] - Ordered pipeline of shared deformers
//! - [`DeformableMeshNode`] - Scene node that keeps the rest pose and drives the stack
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Vector3;
//! use haggis_deform::deform::{shared, DeformableMeshNode, TwistDeformer};
//! use haggis_deform::gfx::geometry::generate_cylinder;
//! use haggis_deform::gfx::scene::MeshBuffers;
//!
//! let mut node = DeformableMeshNode::from_geometry("tube", &generate_cylinder(0.5, 4.0, 16, 16));
//!
//! let twist = shared(TwistDeformer::new(Vector3::unit_y(), Vector3::new(0.0, 0.0, 0.0)));
//! twist.borrow_mut().set_angle(1.2);
//! node.add_deformer(twist.clone());
//!
//! node.apply_deformers().unwrap();
//! assert_eq!(node.mesh(0).unwrap().vertices().len(), 17 * 17);
//! ```

pub mod bend;
pub mod deformer;
pub mod falloff;
pub mod function;
pub mod mesh_node;
pub mod property;
pub mod random;
pub mod scale;
pub mod stack;
pub mod turbulence;
pub mod twist;
pub mod wave;

pub use bend::BendDeformer;
pub use deformer::{Deformer, DeformerBase, DeformerState};
pub use falloff::{calculate_weight, smoothstep, FalloffRange};
pub use function::{DisplacementFn, FunctionDeformer, FunctionShaping};
pub use mesh_node::DeformableMeshNode;
pub use property::{find_property, Property, PropertyValue};
pub use random::{DeformationMode, NoiseType, RandomDeformer};
pub use scale::ScaleDeformer;
pub use stack::{shared, DeformerRef, DeformerStack};
pub use turbulence::{turbulence, TurbulenceDeformer};
pub use twist::TwistDeformer;
pub use wave::WaveDeformer;

use cgmath::{InnerSpace, Vector3};

/// Normalizes `v`, falling back to `fallback` for zero-length input
pub(crate) fn safe_normalize(v: Vector3<f32>, fallback: Vector3<f32>) -> Vector3<f32> {
    if v.magnitude2() > f32::EPSILON {
        v.normalize()
    } else {
        fallback
    }
}

/// Linear blend `a + (b - a) * t`
pub(crate) fn mix(a: Vector3<f32>, b: Vector3<f32>, t: f32) -> Vector3<f32> {
    a + (b - a) * t
}
