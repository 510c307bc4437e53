//! # GPU Vertex Layout
//!
//! Interleaved position/normal vertex uploaded by [`Mesh`](super::mesh::Mesh)
//! when GPU resources are attached.

use cgmath::Vector3;

/// A 3D vertex with position and normal data.
///
/// `#[repr(C)]` keeps the layout stable for `bytemuck` casts into GPU buffers.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    /// 3D position coordinates [x, y, z]
    pub position: [f32; 3],
    /// 3D normal vector [nx, ny, nz] for lighting calculations
    pub normal: [f32; 3],
}

impl Vertex3D {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn new(position: Vector3<f32>, normal: Vector3<f32>) -> Self {
        Self {
            position: position.into(),
            normal: normal.into(),
        }
    }

    /// Vertex buffer layout: position at location 0, normal at location 1
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex3D>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_matches_struct() {
        let layout = Vertex3D::desc();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[1].offset, 12);
    }

    #[test]
    fn test_cast_to_bytes() {
        let vertices = [Vertex3D::new(Vector3::new(1.0, 2.0, 3.0), Vector3::new(0.0, 1.0, 0.0))];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 24);
    }
}
