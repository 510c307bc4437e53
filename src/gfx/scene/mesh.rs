//! # Meshes and the Buffer Collaborator
//!
//! The deformation core only talks to meshes through [`MeshBuffers`]: it reads
//! and overwrites the live vertex positions, then asks the mesh to refresh its
//! vertex data and normals. [`Mesh`] is the stock implementation; it keeps CPU
//! side positions, normals and indices, and can optionally mirror them into
//! wgpu buffers.
//!
//! ## Usage
//!
//! ```rust
//! use haggis_deform::gfx::geometry::generate_cube;
//! use haggis_deform::gfx::scene::{Mesh, MeshBuffers};
//!
//! let mut mesh = Mesh::from_geometry(&generate_cube(1.0));
//! assert_eq!(mesh.vertices().len(), 24);
//!
//! mesh.update_vertices();
//! assert!(mesh.needs_upload());
//! ```

use cgmath::{InnerSpace, Vector3};
use wgpu::util::DeviceExt;

use super::vertex::Vertex3D;
use super::vertices::Vertices;
use crate::gfx::geometry::GeometryData;

/// Vertex-buffer collaborator driven by deformable mesh nodes
pub trait MeshBuffers {
    /// Live vertex positions
    fn vertices(&self) -> &Vertices;

    /// Mutable access to the live vertex positions
    fn vertices_mut(&mut self) -> &mut Vertices;

    /// Signals that vertex positions were rewritten and must be re-uploaded
    fn update_vertices(&mut self);

    /// Recomputes normals from the current vertex positions
    fn update_normals(&mut self);
}

/// GPU buffers mirroring a [`Mesh`]
#[derive(Debug)]
pub struct MeshGpuResources {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

/// Indexed triangle mesh with CPU-side positions and normals
#[derive(Debug)]
pub struct Mesh {
    vertices: Vertices,
    normals: Vec<Vector3<f32>>,
    indices: Vec<u32>,
    dirty: bool,
    gpu_resources: Option<MeshGpuResources>,
}

impl Mesh {
    /// Creates a mesh and derives smooth normals from the triangles
    pub fn new(vertices: Vertices, indices: Vec<u32>) -> Self {
        let normals = compute_vertex_normals(vertices.as_slice(), &indices);
        Self {
            vertices,
            normals,
            indices,
            dirty: true,
            gpu_resources: None,
        }
    }

    /// Creates a mesh from procedural geometry, keeping its authored normals
    pub fn from_geometry(geometry: &GeometryData) -> Self {
        let vertices = Vertices::from_positions(geometry.positions.clone());
        let normals = if geometry.normals.len() == geometry.positions.len() {
            geometry.normals.clone()
        } else {
            compute_vertex_normals(vertices.as_slice(), &geometry.indices)
        };

        Self {
            vertices,
            normals,
            indices: geometry.indices.clone(),
            dirty: true,
            gpu_resources: None,
        }
    }

    pub fn normals(&self) -> &[Vector3<f32>] {
        &self.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether CPU data changed since the last GPU sync
    pub fn needs_upload(&self) -> bool {
        self.dirty
    }

    /// Interleaved vertex data in GPU layout
    pub fn interleaved(&self) -> Vec<Vertex3D> {
        self.vertices
            .iter()
            .zip(self.normals.iter())
            .map(|(position, normal)| Vertex3D::new(*position, *normal))
            .collect()
    }

    /// Creates vertex and index buffers on `device`
    ///
    /// The vertex buffer is created with `COPY_DST` so deformed positions can
    /// be streamed into it by [`sync_gpu`](Self::sync_gpu).
    pub fn init_gpu_resources(&mut self, device: &wgpu::Device) {
        let vertex_data = self.interleaved();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Deformable Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertex_data),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Deformable Index Buffer"),
            contents: bytemuck::cast_slice(&self.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::debug!(
            "created GPU buffers for mesh ({} vertices, {} triangles)",
            self.vertex_count(),
            self.triangle_count()
        );

        self.gpu_resources = Some(MeshGpuResources {
            vertex_buffer,
            index_buffer,
            index_count: self.indices.len() as u32,
        });
        self.dirty = false;
    }

    /// Writes changed vertex data into the GPU vertex buffer
    ///
    /// Does nothing until [`init_gpu_resources`](Self::init_gpu_resources) has run.
    pub fn sync_gpu(&mut self, queue: &wgpu::Queue) {
        if !self.dirty {
            return;
        }
        if let Some(gpu) = &self.gpu_resources {
            let vertex_data = self.interleaved();
            queue.write_buffer(&gpu.vertex_buffer, 0, bytemuck::cast_slice(&vertex_data));
            self.dirty = false;
        }
    }

    pub fn gpu_resources(&self) -> Option<&MeshGpuResources> {
        self.gpu_resources.as_ref()
    }
}

impl MeshBuffers for Mesh {
    fn vertices(&self) -> &Vertices {
        &self.vertices
    }

    fn vertices_mut(&mut self) -> &mut Vertices {
        &mut self.vertices
    }

    fn update_vertices(&mut self) {
        self.dirty = true;
    }

    fn update_normals(&mut self) {
        self.normals = compute_vertex_normals(self.vertices.as_slice(), &self.indices);
        self.dirty = true;
    }
}

/// Area-weighted smooth normals accumulated from triangle faces
///
/// Vertices not referenced by any triangle keep a zero normal.
pub fn compute_vertex_normals(positions: &[Vector3<f32>], indices: &[u32]) -> Vec<Vector3<f32>> {
    let mut normals = vec![Vector3::new(0.0, 0.0, 0.0); positions.len()];

    for triangle in indices.chunks_exact(3) {
        let (i0, i1, i2) = (triangle[0] as usize, triangle[1] as usize, triangle[2] as usize);
        if i0 >= positions.len() || i1 >= positions.len() || i2 >= positions.len() {
            continue;
        }

        let edge1 = positions[i1] - positions[i0];
        let edge2 = positions[i2] - positions[i0];
        let face_normal = edge1.cross(edge2);

        normals[i0] += face_normal;
        normals[i1] += face_normal;
        normals[i2] += face_normal;
    }

    for normal in normals.iter_mut() {
        if normal.magnitude2() > 0.0 {
            *normal = normal.normalize();
        }
    }

    normals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_triangle() -> Mesh {
        Mesh::new(
            Vertices::from_arrays(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]),
            vec![0, 1, 2],
        )
    }

    #[test]
    fn test_normals_follow_winding() {
        let mesh = single_triangle();
        for normal in mesh.normals() {
            assert_eq!(*normal, Vector3::new(0.0, 0.0, 1.0));
        }
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_update_normals_after_vertex_edit() {
        let mut mesh = single_triangle();
        // Swap two vertices to flip the winding
        let a = mesh.vertices().vertex(1).unwrap();
        let b = mesh.vertices().vertex(2).unwrap();
        mesh.vertices_mut().set_vertex(1, b).unwrap();
        mesh.vertices_mut().set_vertex(2, a).unwrap();
        mesh.update_normals();

        assert_eq!(mesh.normals()[0], Vector3::new(0.0, 0.0, -1.0));
        assert!(mesh.needs_upload());
    }

    #[test]
    fn test_unreferenced_vertex_keeps_zero_normal() {
        let normals = compute_vertex_normals(
            &[
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(0.0, 1.0, 0.0),
                Vector3::new(5.0, 5.0, 5.0),
            ],
            &[0, 1, 2],
        );
        assert_eq!(normals[3], Vector3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_interleaved_pairs_positions_and_normals() {
        let mesh = single_triangle();
        let interleaved = mesh.interleaved();
        assert_eq!(interleaved.len(), 3);
        assert_eq!(interleaved[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(interleaved[1].normal, [0.0, 0.0, 1.0]);
    }
}
