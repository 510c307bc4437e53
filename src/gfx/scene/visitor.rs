//! # Extent and Position Visitors
//!
//! [`ExtentVisitor`] walks a subtree and accumulates its world-space
//! [`BoundingBox`], typically for camera framing. [`PositionVisitor`] walks
//! the same way but only records every visited node's world origin.
//!
//! Both keep a [`MatrixStack`]: a frame is pushed in `enter` and popped in
//! `leave`, so the stack is back at depth 1 once a walk is done.
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Vector3;
//! use haggis_deform::gfx::scene::{BoundingBox, CompositeNode, ExtentVisitor, Node, TransformNode};
//!
//! let mut leaf = TransformNode::new();
//! leaf.set_local_bounding_box(BoundingBox::from_bounds(
//!     Vector3::new(-1.0, -1.0, -1.0),
//!     Vector3::new(1.0, 1.0, 1.0),
//! ));
//!
//! let mut group = CompositeNode::new(TransformNode::at("group", Vector3::new(10.0, 0.0, 0.0)));
//! group.add(leaf);
//! let root = Node::from(group);
//!
//! let mut visitor = ExtentVisitor::new();
//! visitor.visit(&root);
//! assert_eq!(visitor.bounding_box().min(), Vector3::new(9.0, -1.0, -1.0));
//! assert_eq!(visitor.depth(), 1);
//! ```

use cgmath::{Vector3, Vector4};

use super::bounding_box::BoundingBox;
use super::matrix_stack::MatrixStack;
use super::node::{Node, NodeVisitor, Traversal};

/// Accumulates the world-space extent of a subtree
#[derive(Debug, Clone, Default)]
pub struct ExtentVisitor {
    matrix_stack: MatrixStack,
    bbox: BoundingBox,
    include_invisible: bool,
}

impl ExtentVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visits `node` and its descendants, growing the accumulated box
    pub fn visit(&mut self, node: &Node) {
        node.accept(self);
    }

    /// World-space extent gathered so far; invalid for an empty scene
    pub fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }

    pub fn include_invisible(&self) -> bool {
        self.include_invisible
    }

    pub fn set_include_invisible(&mut self, flag: bool) {
        self.include_invisible = flag;
    }

    /// Current matrix stack depth (1 between walks)
    pub fn depth(&self) -> usize {
        self.matrix_stack.depth()
    }

    /// Clears the accumulated box and recovers an unbalanced matrix stack
    pub fn reset(&mut self) {
        self.bbox.clear();
        if self.matrix_stack.depth() > 1 {
            log::warn!(
                "extent visitor reset with matrix stack depth {}, clearing",
                self.matrix_stack.depth()
            );
            self.matrix_stack.clear();
        }
    }
}

impl NodeVisitor for ExtentVisitor {
    fn enter(&mut self, node: &Node) -> Traversal {
        if !node.is_visible() && !self.include_invisible {
            return Traversal::Skip;
        }

        self.matrix_stack.push();
        self.matrix_stack.multiply(node.local_transform());

        let world = self.matrix_stack.top();
        let local = node.local_bounding_box();
        if local.is_valid() {
            self.bbox.add_box(&local.transform(&world));
        } else if !node.is_composite() {
            self.bbox.add_point(origin_of(world * Vector4::new(0.0, 0.0, 0.0, 1.0)));
        }

        Traversal::Descend
    }

    fn leave(&mut self, _node: &Node) {
        self.matrix_stack.pop();
    }
}

/// Collects the world-space origin of every visited node
#[derive(Debug, Clone, Default)]
pub struct PositionVisitor {
    matrix_stack: MatrixStack,
    positions: Vec<Vector3<f32>>,
    include_invisible: bool,
}

impl PositionVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visit(&mut self, node: &Node) {
        node.accept(self);
    }

    /// World origins in visiting order (depth-first, parents first)
    pub fn positions(&self) -> &[Vector3<f32>] {
        &self.positions
    }

    pub fn set_include_invisible(&mut self, flag: bool) {
        self.include_invisible = flag;
    }

    pub fn depth(&self) -> usize {
        self.matrix_stack.depth()
    }

    pub fn reset(&mut self) {
        self.positions.clear();
        if self.matrix_stack.depth() > 1 {
            log::warn!(
                "position visitor reset with matrix stack depth {}, clearing",
                self.matrix_stack.depth()
            );
            self.matrix_stack.clear();
        }
    }
}

impl NodeVisitor for PositionVisitor {
    fn enter(&mut self, node: &Node) -> Traversal {
        if !node.is_visible() && !self.include_invisible {
            return Traversal::Skip;
        }

        self.matrix_stack.push();
        self.matrix_stack.multiply(node.local_transform());
        let origin = self.matrix_stack.top() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        self.positions.push(origin_of(origin));

        Traversal::Descend
    }

    fn leave(&mut self, _node: &Node) {
        self.matrix_stack.pop();
    }
}

fn origin_of(point: Vector4<f32>) -> Vector3<f32> {
    if point.w != 0.0 && point.w != 1.0 {
        Vector3::new(point.x / point.w, point.y / point.w, point.z / point.w)
    } else {
        point.truncate()
    }
}
