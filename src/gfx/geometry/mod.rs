//! # Procedural Geometry Generation
//!
//! Generators for the primitive shapes that deformable mesh nodes are usually
//! built from. Shapes are Y-up and centered on the origin; their object-space
//! extents are available through [`GeometryData::bounding_box`].
//!
//! ## Supported Primitives
//!
//! - **Cube**: axis-aligned cube with per-face normals
//! - **Sphere**: UV sphere with configurable resolution
//! - **Plane**: subdivided grid in the XZ plane
//! - **Cylinder**: open tube along Y with height subdivisions (handy for twist and bend)
//!
//! ## Usage
//!
//! ```rust
//! use haggis_deform::gfx::geometry::{generate_cylinder, generate_plane};
//!
//! let tube = generate_cylinder(0.5, 4.0, 16, 32);
//! assert_eq!(tube.vertex_count(), 17 * 33);
//!
//! let grid = generate_plane(10.0, 10.0, 4, 4);
//! assert_eq!(grid.triangle_count(), 32);
//! ```

pub mod primitives;

pub use primitives::*;

use cgmath::Vector3;

use crate::gfx::scene::BoundingBox;

/// Generated geometry ready to become a [`Mesh`](crate::gfx::scene::Mesh)
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions
    pub positions: Vec<Vector3<f32>>,
    /// Unit normals, one per position
    pub normals: Vec<Vector3<f32>>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Object-space extents of the positions
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.positions.iter().copied())
    }

    fn push_vertex(&mut self, position: Vector3<f32>, normal: Vector3<f32>, uv: [f32; 2]) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.normals.push(normal);
        self.tex_coords.push(uv);
        index
    }

    fn push_quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.indices.extend_from_slice(&[a, b, c, c, d, a]);
    }
}
