//! # Composite Nodes
//!
//! A [`CompositeNode`] is a transform that owns an ordered list of children.

use super::node::Node;
use super::transform::TransformNode;
use crate::error::DeformError;

/// Transform node with owned children
#[derive(Debug, Default)]
pub struct CompositeNode {
    transform: TransformNode,
    children: Vec<Node>,
}

impl CompositeNode {
    pub fn new(transform: TransformNode) -> Self {
        Self {
            transform,
            children: Vec::new(),
        }
    }

    pub fn transform(&self) -> &TransformNode {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut TransformNode {
        &mut self.transform
    }

    /// Appends a child and returns its index
    pub fn add(&mut self, child: impl Into<Node>) -> usize {
        self.children.push(child.into());
        self.children.len() - 1
    }

    /// Removes and returns the child at `index`
    pub fn remove_at(&mut self, index: usize) -> Result<Node, DeformError> {
        if index >= self.children.len() {
            return Err(DeformError::IndexOutOfRange {
                index,
                len: self.children.len(),
            });
        }
        Ok(self.children.remove(index))
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }

    pub fn child(&self, index: usize) -> Result<&Node, DeformError> {
        self.children.get(index).ok_or(DeformError::IndexOutOfRange {
            index,
            len: self.children.len(),
        })
    }

    pub fn child_mut(&mut self, index: usize) -> Result<&mut Node, DeformError> {
        let len = self.children.len();
        self.children
            .get_mut(index)
            .ok_or(DeformError::IndexOutOfRange { index, len })
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Draws every visible child in insertion order
    pub fn draw(&mut self) {
        for child in self.children.iter_mut().filter(|child| child.is_visible()) {
            child.draw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_index_children() {
        let mut group = CompositeNode::new(TransformNode::at("group", cgmath::Vector3::new(0.0, 0.0, 0.0)));
        assert!(group.is_empty());

        assert_eq!(group.add(TransformNode::at("a", cgmath::Vector3::new(1.0, 0.0, 0.0))), 0);
        assert_eq!(group.add(TransformNode::at("b", cgmath::Vector3::new(2.0, 0.0, 0.0))), 1);
        assert_eq!(group.len(), 2);
        assert_eq!(group.child(1).unwrap().name(), "b");
    }

    #[test]
    fn test_out_of_range_child_access() {
        let mut group = CompositeNode::default();
        assert_eq!(
            group.child(0).unwrap_err(),
            DeformError::IndexOutOfRange { index: 0, len: 0 }
        );
        assert!(group.remove_at(3).is_err());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut group = CompositeNode::default();
        group.add(TransformNode::at("a", cgmath::Vector3::new(0.0, 0.0, 0.0)));
        group.add(TransformNode::at("b", cgmath::Vector3::new(0.0, 0.0, 0.0)));

        let removed = group.remove_at(0).unwrap();
        assert_eq!(removed.name(), "a");
        assert_eq!(group.child(0).unwrap().name(), "b");

        group.clear();
        assert!(group.is_empty());
    }
}
