//! # Transform Nodes
//!
//! [`TransformNode`] carries a position, an axis-angle rotation (degrees) and a
//! non-uniform scale, plus an optional object-space bounding box that geometry
//! builders set once. World-space extents are never cached on the node; the
//! [`ExtentVisitor`](super::visitor::ExtentVisitor) derives them on demand.

use cgmath::{Deg, InnerSpace, Matrix4, SquareMatrix, Vector3};

use super::bounding_box::BoundingBox;

/// Scene-graph node with a local transform
#[derive(Debug, Clone, PartialEq)]
pub struct TransformNode {
    name: String,
    pos: Vector3<f32>,
    rot_axis: Vector3<f32>,
    rot_angle: f32,
    scale: Vector3<f32>,
    visible: bool,
    use_transform: bool,
    stored_pos: Vector3<f32>,
    local_bounding_box: BoundingBox,
}

impl TransformNode {
    /// Creates a node at the origin with identity rotation and scale
    pub fn new() -> Self {
        Self {
            name: String::new(),
            pos: Vector3::new(0.0, 0.0, 0.0),
            rot_axis: Vector3::unit_y(),
            rot_angle: 0.0,
            scale: Vector3::new(1.0, 1.0, 1.0),
            visible: true,
            use_transform: true,
            stored_pos: Vector3::new(0.0, 0.0, 0.0),
            local_bounding_box: BoundingBox::new(),
        }
    }

    /// Creates a named node positioned at `pos`
    pub fn at(name: impl Into<String>, pos: Vector3<f32>) -> Self {
        let mut node = Self::new();
        node.name = name.into();
        node.pos = pos;
        node
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn pos(&self) -> Vector3<f32> {
        self.pos
    }

    pub fn set_pos(&mut self, pos: Vector3<f32>) {
        self.pos = pos;
    }

    pub fn rot_axis(&self) -> Vector3<f32> {
        self.rot_axis
    }

    pub fn set_rot_axis(&mut self, axis: Vector3<f32>) {
        self.rot_axis = axis;
    }

    /// Rotation angle in degrees
    pub fn rot_angle(&self) -> f32 {
        self.rot_angle
    }

    pub fn set_rot_angle(&mut self, angle: f32) {
        self.rot_angle = angle;
    }

    /// Sets rotation axis and angle (degrees) together
    pub fn align_with_axis_angle(&mut self, axis: Vector3<f32>, angle: f32) {
        self.rot_axis = axis;
        self.rot_angle = angle;
    }

    pub fn scale(&self) -> Vector3<f32> {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vector3<f32>) {
        self.scale = scale;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// When disabled the node contributes an identity transform
    pub fn use_transform(&self) -> bool {
        self.use_transform
    }

    pub fn set_use_transform(&mut self, flag: bool) {
        self.use_transform = flag;
    }

    /// Remembers the current position for a later [`restore_pos`](Self::restore_pos)
    pub fn store_pos(&mut self) {
        self.stored_pos = self.pos;
    }

    pub fn restore_pos(&mut self) {
        self.pos = self.stored_pos;
    }

    pub fn stored_pos(&self) -> Vector3<f32> {
        self.stored_pos
    }

    /// Object-space extents; invalid until geometry sets them
    pub fn local_bounding_box(&self) -> BoundingBox {
        self.local_bounding_box
    }

    pub fn set_local_bounding_box(&mut self, bbox: BoundingBox) {
        self.local_bounding_box = bbox;
    }

    /// Local transform `translate(pos) * rotate(angle, axis) * scale(scale)`
    ///
    /// The rotation is skipped when the angle is zero (or the axis degenerate)
    /// and the scale when every component is exactly one.
    pub fn local_transform(&self) -> Matrix4<f32> {
        if !self.use_transform {
            return Matrix4::identity();
        }

        let mut matrix = Matrix4::from_translation(self.pos);

        if self.rot_angle != 0.0 && self.rot_axis.magnitude2() > 0.0 {
            matrix = matrix * Matrix4::from_axis_angle(self.rot_axis.normalize(), Deg(self.rot_angle));
        }

        if self.scale.x != 1.0 || self.scale.y != 1.0 || self.scale.z != 1.0 {
            matrix = matrix * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);
        }

        matrix
    }
}

impl Default for TransformNode {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;

    #[test]
    fn test_default_transform_is_identity() {
        assert_eq!(TransformNode::new().local_transform(), Matrix4::identity());
    }

    #[test]
    fn test_transform_order_is_translate_rotate_scale() {
        let mut node = TransformNode::at("n", Vector3::new(5.0, 0.0, 0.0));
        node.align_with_axis_angle(Vector3::new(0.0, 0.0, 2.0), 90.0);
        node.set_scale(Vector3::new(2.0, 1.0, 1.0));

        // (1,0,0) -> scale (2,0,0) -> rotate 90 about z (0,2,0) -> translate (5,2,0)
        let p = node.local_transform() * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!((p.x - 5.0).abs() < 1e-5);
        assert!((p.y - 2.0).abs() < 1e-5);
        assert!(p.z.abs() < 1e-6);
    }

    #[test]
    fn test_unit_scale_and_zero_angle_are_pure_translation() {
        let mut node = TransformNode::at("t", Vector3::new(1.0, 2.0, 3.0));
        node.set_rot_axis(Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(
            node.local_transform(),
            Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0))
        );
    }

    #[test]
    fn test_use_transform_flag() {
        let mut node = TransformNode::at("t", Vector3::new(1.0, 2.0, 3.0));
        node.set_use_transform(false);
        assert_eq!(node.local_transform(), Matrix4::identity());
    }

    #[test]
    fn test_store_and_restore_position() {
        let mut node = TransformNode::at("t", Vector3::new(1.0, 0.0, 0.0));
        node.store_pos();
        node.set_pos(Vector3::new(9.0, 9.0, 9.0));
        node.restore_pos();
        assert_eq!(node.pos(), Vector3::new(1.0, 0.0, 0.0));
    }
}
