//! # Scene Graph Module
//!
//! Hierarchical scene graph used by the deformation pipeline: transform and
//! composite nodes, the deformable mesh collaborator, vertex buffers and the
//! visitors that derive world-space information from a tree.
//!
//! ## Key Components
//!
//! - [`TransformNode`] - Position, axis-angle rotation and scale with an object-space box
//! - [`CompositeNode`] - Transform node owning an ordered list of children
//! - [`Node`] - Closed set of node kinds walked by a [`NodeVisitor`]
//! - [`ExtentVisitor`] / [`PositionVisitor`] - World-space extent and origin collection
//! - [`BoundingBox`] / [`MatrixStack`] - Value types backing the visitors
//! - [`Vertices`] / [`Mesh`] / [`MeshBuffers`] - Vertex data consumed by deformers
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Vector3;
//! use haggis_deform::gfx::scene::{CompositeNode, Node, PositionVisitor, TransformNode};
//!
//! let mut root = CompositeNode::new(TransformNode::at("root", Vector3::new(0.0, 2.0, 0.0)));
//! root.add(TransformNode::at("marker", Vector3::new(1.0, 0.0, 0.0)));
//!
//! let mut visitor = PositionVisitor::new();
//! visitor.visit(&Node::from(root));
//! assert_eq!(visitor.positions()[1], Vector3::new(1.0, 2.0, 0.0));
//! ```

pub mod bounding_box;
pub mod composite;
pub mod matrix_stack;
pub mod mesh;
pub mod node;
pub mod transform;
pub mod vertex;
pub mod vertices;
pub mod visitor;

// Re-export main types
pub use bounding_box::BoundingBox;
pub use composite::CompositeNode;
pub use matrix_stack::MatrixStack;
pub use mesh::{Mesh, MeshBuffers, MeshGpuResources};
pub use node::{Node, NodeVisitor, Traversal};
pub use transform::TransformNode;
pub use vertex::Vertex3D;
pub use vertices::Vertices;
pub use visitor::{ExtentVisitor, PositionVisitor};
