//! # Scene Graph Nodes
//!
//! The graph is a tree of [`Node`] values. Every variant carries a
//! [`TransformNode`]; composites own their children directly, so parents never
//! need back-references.
//!
//! Traversal goes through [`NodeVisitor`]: `enter` runs before a node's children
//! and may return [`Traversal::Skip`] to prune the subtree, `leave` runs after
//! them. A skipped node never sees `leave`, which keeps visitors that push state
//! in `enter` balanced.

use cgmath::Matrix4;

use super::bounding_box::BoundingBox;
use super::composite::CompositeNode;
use super::transform::TransformNode;
use crate::deform::DeformableMeshNode;

/// What a visitor wants after entering a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// Visit the children, then call `leave`
    Descend,
    /// Skip the children and `leave`
    Skip,
}

/// Scene graph visitor
pub trait NodeVisitor {
    fn enter(&mut self, node: &Node) -> Traversal;

    fn leave(&mut self, _node: &Node) {}
}

/// A node in the scene graph
#[derive(Debug)]
pub enum Node {
    Composite(CompositeNode),
    Transform(TransformNode),
    Mesh(DeformableMeshNode),
}

impl Node {
    pub fn transform(&self) -> &TransformNode {
        match self {
            Node::Composite(composite) => composite.transform(),
            Node::Transform(transform) => transform,
            Node::Mesh(mesh) => mesh.transform(),
        }
    }

    pub fn transform_mut(&mut self) -> &mut TransformNode {
        match self {
            Node::Composite(composite) => composite.transform_mut(),
            Node::Transform(transform) => transform,
            Node::Mesh(mesh) => mesh.transform_mut(),
        }
    }

    pub fn name(&self) -> &str {
        self.transform().name()
    }

    pub fn is_visible(&self) -> bool {
        self.transform().is_visible()
    }

    pub fn local_transform(&self) -> Matrix4<f32> {
        self.transform().local_transform()
    }

    /// Object-space extents of the node's own geometry
    ///
    /// Mesh nodes report their live (possibly deformed) vertices; other nodes
    /// report whatever box was set on their transform.
    pub fn local_bounding_box(&self) -> BoundingBox {
        match self {
            Node::Mesh(mesh) => mesh.local_bounding_box(),
            other => other.transform().local_bounding_box(),
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Node::Composite(_))
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Composite(composite) => composite.children(),
            _ => &[],
        }
    }

    /// Walks this subtree depth-first with `visitor`
    pub fn accept<V: NodeVisitor + ?Sized>(&self, visitor: &mut V) {
        if visitor.enter(self) == Traversal::Skip {
            return;
        }
        for child in self.children() {
            child.accept(visitor);
        }
        visitor.leave(self);
    }

    /// Refreshes any geometry owned by the subtree
    pub fn draw(&mut self) {
        match self {
            Node::Composite(composite) => composite.draw(),
            Node::Mesh(mesh) => mesh.draw(),
            Node::Transform(_) => {}
        }
    }
}

impl From<CompositeNode> for Node {
    fn from(node: CompositeNode) -> Self {
        Node::Composite(node)
    }
}

impl From<TransformNode> for Node {
    fn from(node: TransformNode) -> Self {
        Node::Transform(node)
    }
}

impl From<DeformableMeshNode> for Node {
    fn from(node: DeformableMeshNode) -> Self {
        Node::Mesh(node)
    }
}
