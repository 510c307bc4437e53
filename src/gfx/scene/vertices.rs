//! # Vertex Position Buffers
//!
//! [`Vertices`] is the ordered, fixed-length array of 3D points that flows
//! through the deformation pipeline. A deformable mesh keeps one buffer as its
//! authoritative rest pose and every deformer writes into a scratch buffer of
//! the same length.

use cgmath::Vector3;

use super::bounding_box::BoundingBox;
use crate::error::DeformError;

/// Ordered buffer of vertex positions
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Vertices {
    positions: Vec<Vector3<f32>>,
}

impl Vertices {
    /// Creates a buffer of `len` vertices at the origin
    pub fn new(len: usize) -> Self {
        Self {
            positions: vec![Vector3::new(0.0, 0.0, 0.0); len],
        }
    }

    pub fn from_positions(positions: Vec<Vector3<f32>>) -> Self {
        Self { positions }
    }

    /// Builds a buffer from packed `[x, y, z]` arrays
    pub fn from_arrays(positions: &[[f32; 3]]) -> Self {
        Self {
            positions: positions.iter().map(|p| Vector3::new(p[0], p[1], p[2])).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position at `index`, or `None` past the end
    pub fn vertex(&self, index: usize) -> Option<Vector3<f32>> {
        self.positions.get(index).copied()
    }

    /// Overwrites the position at `index`
    pub fn set_vertex(&mut self, index: usize, position: Vector3<f32>) -> Result<(), DeformError> {
        let len = self.positions.len();
        match self.positions.get_mut(index) {
            Some(slot) => {
                *slot = position;
                Ok(())
            }
            None => Err(DeformError::IndexOutOfRange { index, len }),
        }
    }

    pub fn as_slice(&self) -> &[Vector3<f32>] {
        &self.positions
    }

    pub fn as_mut_slice(&mut self) -> &mut [Vector3<f32>] {
        &mut self.positions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vector3<f32>> {
        self.positions.iter()
    }

    /// Copies every position from `other`, which must have the same length
    pub fn copy_from(&mut self, other: &Vertices) -> Result<(), DeformError> {
        if other.len() != self.len() {
            return Err(DeformError::SizeMismatch {
                expected: self.len(),
                actual: other.len(),
            });
        }
        self.positions.copy_from_slice(&other.positions);
        Ok(())
    }

    /// Smallest box enclosing every position; invalid for an empty buffer
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.positions.iter().copied())
    }

    /// Packed `[x, y, z]` copy of the buffer
    pub fn to_arrays(&self) -> Vec<[f32; 3]> {
        self.positions.iter().map(|p| [p.x, p.y, p.z]).collect()
    }
}

impl From<Vec<Vector3<f32>>> for Vertices {
    fn from(positions: Vec<Vector3<f32>>) -> Self {
        Self::from_positions(positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_report_out_of_range() {
        let mut vertices = Vertices::new(2);
        assert_eq!(vertices.len(), 2);
        assert!(vertices.vertex(2).is_none());
        assert_eq!(
            vertices.set_vertex(5, Vector3::new(1.0, 1.0, 1.0)),
            Err(DeformError::IndexOutOfRange { index: 5, len: 2 })
        );

        vertices.set_vertex(1, Vector3::new(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(vertices.vertex(1), Some(Vector3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_copy_from_checks_length() {
        let mut target = Vertices::new(3);
        let source = Vertices::from_arrays(&[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        target.copy_from(&source).unwrap();
        assert_eq!(target, source);

        let short = Vertices::new(1);
        assert_eq!(
            target.copy_from(&short),
            Err(DeformError::SizeMismatch { expected: 3, actual: 1 })
        );
    }

    #[test]
    fn test_bounding_box_of_positions() {
        let vertices = Vertices::from_arrays(&[[0.0, 0.0, 0.0], [1.0, -2.0, 3.0]]);
        let bbox = vertices.bounding_box();
        assert_eq!(bbox.min(), Vector3::new(0.0, -2.0, 0.0));
        assert_eq!(bbox.max(), Vector3::new(1.0, 0.0, 3.0));

        assert!(!Vertices::default().bounding_box().is_valid());
    }
}
