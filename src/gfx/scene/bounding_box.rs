//! # Axis-Aligned Bounding Boxes
//!
//! [`BoundingBox`] is the value type used for object-space extents of scene nodes
//! and for the world-space extent accumulated by the
//! [`ExtentVisitor`](super::visitor::ExtentVisitor).
//!
//! A fresh box is *invalid*: its minimum corner sits at `+inf` and its maximum at
//! `-inf`, so growing it with any point or valid box simply adopts that value.
//! Invalid boxes are absorbing for queries: they contain nothing, intersect
//! nothing and transform to another invalid box.
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::{Matrix4, Vector3};
//! use haggis_deform::gfx::scene::BoundingBox;
//!
//! let mut bbox = BoundingBox::new();
//! assert!(!bbox.is_valid());
//!
//! bbox.add_point(Vector3::new(-1.0, -1.0, -1.0));
//! bbox.add_point(Vector3::new(1.0, 1.0, 1.0));
//!
//! let moved = bbox.transform(&Matrix4::from_translation(Vector3::new(10.0, 0.0, 0.0)));
//! assert_eq!(moved.min(), Vector3::new(9.0, -1.0, -1.0));
//! ```

use cgmath::{Matrix4, Vector3, Vector4};

/// Axis-aligned box described by its minimum and maximum corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    min: Vector3<f32>,
    max: Vector3<f32>,
}

impl BoundingBox {
    /// Creates an empty (invalid) bounding box
    pub fn new() -> Self {
        Self {
            min: Vector3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            max: Vector3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    /// Creates a box from explicit corners
    ///
    /// The corners are stored as given; a box whose `min` exceeds `max` on any
    /// axis reports itself as invalid.
    pub fn from_bounds(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Creates the smallest box enclosing all `points`
    ///
    /// An empty iterator yields an invalid box.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Vector3<f32>>,
    {
        let mut bbox = Self::new();
        for point in points {
            bbox.add_point(point);
        }
        bbox
    }

    /// Whether `min <= max` holds on every axis
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    pub fn min(&self) -> Vector3<f32> {
        self.min
    }

    pub fn max(&self) -> Vector3<f32> {
        self.max
    }

    pub fn set_min(&mut self, min: Vector3<f32>) {
        self.min = min;
    }

    pub fn set_max(&mut self, max: Vector3<f32>) {
        self.max = max;
    }

    /// Replaces both corners at once
    pub fn set_bounds(&mut self, min: Vector3<f32>, max: Vector3<f32>) {
        self.min = min;
        self.max = max;
    }

    /// Grows the box component-wise so that it includes `point`
    pub fn add_point(&mut self, point: Vector3<f32>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// Grows the box so that it includes `other`
    ///
    /// An invalid `other` leaves the box untouched. If this box is invalid it
    /// becomes a copy of `other`.
    pub fn add_box(&mut self, other: &BoundingBox) {
        if !other.is_valid() {
            return;
        }
        if !self.is_valid() {
            *self = *other;
            return;
        }
        // The two corners of an AABB bound its full extent, so this union is exact.
        self.add_point(other.min);
        self.add_point(other.max);
    }

    /// Consuming form of [`add_box`](Self::add_box), convenient for chaining
    pub fn union(mut self, other: &BoundingBox) -> Self {
        self.add_box(other);
        self
    }

    /// Maps the box through `matrix` and returns the enclosing AABB
    ///
    /// All eight corners are transformed (with perspective divide) and a new
    /// box is derived from them. Rotated inputs therefore produce a looser box
    /// than the tightest possible one.
    pub fn transform(&self, matrix: &Matrix4<f32>) -> BoundingBox {
        if !self.is_valid() {
            return BoundingBox::new();
        }

        BoundingBox::from_points(self.corners().iter().map(|corner| {
            let transformed = matrix * Vector4::new(corner.x, corner.y, corner.z, 1.0);
            Vector3::new(
                transformed.x / transformed.w,
                transformed.y / transformed.w,
                transformed.z / transformed.w,
            )
        }))
    }

    /// Closed containment test for a point
    pub fn contains(&self, point: Vector3<f32>) -> bool {
        self.is_valid()
            && point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Whether `other` lies entirely inside this box
    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        other.is_valid() && self.contains(other.min) && self.contains(other.max)
    }

    /// Closed overlap test; touching faces count as intersecting
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.is_valid()
            && other.is_valid()
            && self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Returns the eight corners of the box
    ///
    /// Corner `i` takes `max` on the x axis when bit 0 of `i` is set, on y for
    /// bit 1 and on z for bit 2, giving the order 000, 100, 010, 110, 001, 101,
    /// 011, 111 over (x, y, z).
    pub fn corners(&self) -> [Vector3<f32>; 8] {
        let pick = |bit: bool, lo: f32, hi: f32| if bit { hi } else { lo };
        let mut corners = [self.min; 8];
        for (i, corner) in corners.iter_mut().enumerate() {
            *corner = Vector3::new(
                pick(i & 1 != 0, self.min.x, self.max.x),
                pick(i & 2 != 0, self.min.y, self.max.y),
                pick(i & 4 != 0, self.min.z, self.max.z),
            );
        }
        corners
    }

    pub fn center(&self) -> Vector3<f32> {
        (self.min + self.max) * 0.5
    }

    /// Edge lengths along each axis
    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    /// Half of [`size`](Self::size)
    pub fn extent(&self) -> Vector3<f32> {
        self.size() * 0.5
    }

    /// Resets the box to the invalid state
    pub fn clear(&mut self) {
        *self = BoundingBox::new();
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new()
    }
}
