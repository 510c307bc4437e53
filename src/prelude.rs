//! # Haggis Deform Prelude
//!
//! Commonly used types for building deformable scenes.
//!
//! ```rust
//! use haggis_deform::prelude::*;
//!
//! let mut node = DeformableMeshNode::from_geometry("ground", &generate_plane(4.0, 4.0, 8, 8));
//! let wave = shared(WaveDeformer::default());
//! node.add_deformer(wave.clone());
//! wave.borrow_mut().set_time(0.5);
//! node.apply_deformers().unwrap();
//!
//! let root = Node::from(node);
//! let mut extents = ExtentVisitor::new();
//! extents.visit(&root);
//! assert!(extents.bounding_box().is_valid());
//! ```

// Deformation pipeline
pub use crate::deform::{
    shared, BendDeformer, DeformableMeshNode, DeformationMode, Deformer, DeformerRef, DeformerStack,
    FunctionDeformer, NoiseType, Property, PropertyValue, RandomDeformer, ScaleDeformer, TurbulenceDeformer,
    TwistDeformer, WaveDeformer,
};

// Animation
pub use crate::animation::{DeformerAnimator, SplineAnimMode, SplineAnimation, SplineInterpolation, Spline};

// Scene graph and geometry
pub use crate::gfx::geometry::{generate_cube, generate_cylinder, generate_plane, generate_sphere, GeometryData};
pub use crate::gfx::scene::{
    BoundingBox, CompositeNode, ExtentVisitor, MatrixStack, Mesh, MeshBuffers, Node, NodeVisitor, PositionVisitor,
    TransformNode, Traversal, Vertices,
};

// Errors
pub use crate::error::{DeformError, SplineError};

// Math
pub use cgmath::{InnerSpace, Vector3};
