//! # Primitive Shape Generation
//!
//! All shapes are generated with outward normals and texture coordinates.

use std::f32::consts::PI;

use cgmath::{InnerSpace, Vector3};

use super::GeometryData;

/// Generate an axis-aligned cube with edge length `size`
///
/// Each face gets its own four vertices so that normals stay flat.
pub fn generate_cube(size: f32) -> GeometryData {
    let mut data = GeometryData::new();
    let h = size * 0.5;

    // (normal, u axis, v axis) for each face; u x v == normal keeps CCW winding
    let faces = [
        (Vector3::unit_x(), -Vector3::unit_z(), Vector3::unit_y()),
        (-Vector3::unit_x(), Vector3::unit_z(), Vector3::unit_y()),
        (Vector3::unit_y(), Vector3::unit_x(), -Vector3::unit_z()),
        (-Vector3::unit_y(), Vector3::unit_x(), Vector3::unit_z()),
        (Vector3::unit_z(), Vector3::unit_x(), Vector3::unit_y()),
        (-Vector3::unit_z(), -Vector3::unit_x(), Vector3::unit_y()),
    ];

    for (normal, u, v) in faces {
        let center = normal * h;
        let a = data.push_vertex(center - u * h - v * h, normal, [0.0, 0.0]);
        let b = data.push_vertex(center + u * h - v * h, normal, [1.0, 0.0]);
        let c = data.push_vertex(center + u * h + v * h, normal, [1.0, 1.0]);
        let d = data.push_vertex(center - u * h + v * h, normal, [0.0, 1.0]);
        data.push_quad(a, b, c, d);
    }

    data
}

/// Generate a UV sphere
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `slices` - Segments around the Y axis (minimum 3)
/// * `stacks` - Segments from pole to pole (minimum 2)
pub fn generate_sphere(radius: f32, slices: u32, stacks: u32) -> GeometryData {
    let mut data = GeometryData::new();
    let slices = slices.max(3);
    let stacks = stacks.max(2);

    for stack in 0..=stacks {
        let v = stack as f32 / stacks as f32;
        let theta = v * PI;

        for slice in 0..=slices {
            let u = slice as f32 / slices as f32;
            let phi = u * 2.0 * PI;

            let normal = Vector3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin());
            data.push_vertex(normal * radius, normal, [u, v]);
        }
    }

    let row = slices + 1;
    for stack in 0..stacks {
        for slice in 0..slices {
            let a = stack * row + slice;
            let b = a + row;
            data.indices.extend_from_slice(&[a, a + 1, b, b, a + 1, b + 1]);
        }
    }

    data
}

/// Generate a subdivided plane in the XZ plane with its normal along +Y
///
/// # Arguments
/// * `width` - Extent along X
/// * `depth` - Extent along Z
/// * `x_segments` - Subdivisions along X (minimum 1)
/// * `z_segments` - Subdivisions along Z (minimum 1)
pub fn generate_plane(width: f32, depth: f32, x_segments: u32, z_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();
    let x_segments = x_segments.max(1);
    let z_segments = z_segments.max(1);

    for iz in 0..=z_segments {
        let v = iz as f32 / z_segments as f32;
        for ix in 0..=x_segments {
            let u = ix as f32 / x_segments as f32;
            let position = Vector3::new((u - 0.5) * width, 0.0, (v - 0.5) * depth);
            data.push_vertex(position, Vector3::unit_y(), [u, v]);
        }
    }

    let row = x_segments + 1;
    for iz in 0..z_segments {
        for ix in 0..x_segments {
            let a = iz * row + ix;
            let d = a + row;
            data.push_quad(a, d, d + 1, a + 1);
        }
    }

    data
}

/// Generate an open cylinder along the Y axis
///
/// # Arguments
/// * `radius` - Tube radius
/// * `height` - Length along Y, centered on the origin
/// * `segments` - Segments around the circumference (minimum 3)
/// * `height_segments` - Rings along the height (minimum 1)
pub fn generate_cylinder(radius: f32, height: f32, segments: u32, height_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();
    let segments = segments.max(3);
    let height_segments = height_segments.max(1);

    for ring in 0..=height_segments {
        let v = ring as f32 / height_segments as f32;
        let y = (v - 0.5) * height;

        for segment in 0..=segments {
            let u = segment as f32 / segments as f32;
            let angle = u * 2.0 * PI;
            let normal = Vector3::new(angle.cos(), 0.0, angle.sin()).normalize();
            data.push_vertex(Vector3::new(normal.x * radius, y, normal.z * radius), normal, [u, v]);
        }
    }

    let row = segments + 1;
    for ring in 0..height_segments {
        for segment in 0..segments {
            let a = ring * row + segment;
            let b = a + row;
            data.indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::mesh::compute_vertex_normals;

    #[test]
    fn test_cube_generation() {
        let cube = generate_cube(2.0);
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangle_count(), 12);

        let bbox = cube.bounding_box();
        assert_eq!(bbox.min(), Vector3::new(-1.0, -1.0, -1.0));
        assert_eq!(bbox.max(), Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_cube_winding_matches_normals() {
        let cube = generate_cube(1.0);
        let derived = compute_vertex_normals(&cube.positions, &cube.indices);
        for (authored, computed) in cube.normals.iter().zip(derived.iter()) {
            assert!(authored.dot(*computed) > 0.99);
        }
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(3.0, 8, 6);
        assert_eq!(sphere.vertex_count(), 9 * 7);
        assert_eq!(sphere.triangle_count(), 8 * 6 * 2);
        for p in &sphere.positions {
            assert!((p.magnitude() - 3.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_plane_generation() {
        let plane = generate_plane(2.0, 2.0, 2, 2);
        assert_eq!(plane.vertex_count(), 9);
        assert_eq!(plane.indices.len(), 24);

        let derived = compute_vertex_normals(&plane.positions, &plane.indices);
        assert!(derived[4].dot(Vector3::unit_y()) > 0.99);
    }

    #[test]
    fn test_cylinder_generation() {
        let tube = generate_cylinder(1.0, 4.0, 12, 8);
        assert_eq!(tube.vertex_count(), 13 * 9);
        assert_eq!(tube.triangle_count(), 12 * 8 * 2);

        let bbox = tube.bounding_box();
        assert!((bbox.min().y + 2.0).abs() < 1e-6);
        assert!((bbox.max().y - 2.0).abs() < 1e-6);
    }
}
