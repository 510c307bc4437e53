//! Twist around an axis through a center point.

use cgmath::{InnerSpace, Quaternion, Rad, Rotation, Rotation3, Vector3};

use super::deformer::{Deformer, DeformerBase};
use super::falloff::FalloffRange;
use super::property::{unknown_property, Property, PropertyValue};
use super::{mix, safe_normalize};
use crate::error::DeformError;

/// Rotates vertices around `axis` by `angle` (radians), attenuated by the
/// distance measured along the axis from `center`
#[derive(Debug, Clone)]
pub struct TwistDeformer {
    base: DeformerBase,
    axis: Vector3<f32>,
    center: Vector3<f32>,
    angle: f32,
    falloff: FalloffRange,
}

impl TwistDeformer {
    pub fn new(axis: Vector3<f32>, center: Vector3<f32>) -> Self {
        Self {
            base: DeformerBase::new(),
            axis: safe_normalize(axis, Vector3::unit_y()),
            center,
            angle: 0.0,
            falloff: FalloffRange::default(),
        }
    }

    pub fn axis(&self) -> Vector3<f32> {
        self.axis
    }

    /// Sets the twist axis; it is normalized, zero falls back to +Y
    pub fn set_axis(&mut self, axis: Vector3<f32>) {
        self.axis = safe_normalize(axis, Vector3::unit_y());
    }

    pub fn center(&self) -> Vector3<f32> {
        self.center
    }

    pub fn set_center(&mut self, center: Vector3<f32>) {
        self.center = center;
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
    }

    pub fn falloff(&self) -> f32 {
        self.falloff.exponent
    }

    pub fn set_falloff(&mut self, falloff: f32) {
        self.falloff.exponent = falloff;
    }

    pub fn start_distance(&self) -> f32 {
        self.falloff.start
    }

    pub fn end_distance(&self) -> f32 {
        self.falloff.end
    }

    pub fn set_distance_range(&mut self, start: f32, end: f32) {
        self.falloff.start = start;
        self.falloff.end = end;
    }
}

impl Default for TwistDeformer {
    fn default() -> Self {
        Self::new(Vector3::unit_y(), Vector3::new(0.0, 0.0, 0.0))
    }
}

impl Deformer for TwistDeformer {
    fn name(&self) -> &'static str {
        "Twist"
    }

    fn base(&self) -> &DeformerBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut DeformerBase {
        &mut self.base
    }

    fn deform(&mut self, input: &[Vector3<f32>], output: &mut [Vector3<f32>]) {
        let global = self.base.weight();

        for (src, dst) in input.iter().zip(output.iter_mut()) {
            let relative = src - self.center;
            let distance = relative.dot(self.axis);
            let weight = self.falloff.weight(distance.abs()) * global;

            if weight <= 0.0 {
                *dst = *src;
                continue;
            }

            let rotation = Quaternion::from_axis_angle(self.axis, Rad(self.angle * weight));
            let twisted = rotation.rotate_vector(relative) + self.center;
            *dst = mix(*src, twisted, weight);
        }
    }

    fn clone_box(&self) -> Box<dyn Deformer> {
        Box::new(Self {
            base: self.base.snapshot(),
            ..self.clone()
        })
    }

    fn parameters(&self) -> Vec<Property> {
        vec![
            Property::new("Axis", "Twist", self.axis),
            Property::new("Center", "Twist", self.center),
            Property::new("Angle", "Twist", self.angle),
            Property::new("Falloff", "Twist", self.falloff.exponent).with_range(0.0, 10.0),
            Property::new("Start distance", "Twist", self.falloff.start),
            Property::new("End distance", "Twist", self.falloff.end),
        ]
    }

    fn set_parameter(&mut self, name: &str, value: PropertyValue) -> Result<(), DeformError> {
        match name {
            "Axis" => self.set_axis(value.try_vec3(name)?),
            "Center" => self.center = value.try_vec3(name)?,
            "Angle" => self.angle = value.try_float(name)?,
            "Falloff" => self.falloff.exponent = value.try_float(name)?,
            "Start distance" => self.falloff.start = value.try_float(name)?,
            "End distance" => self.falloff.end = value.try_float(name)?,
            _ => return Err(unknown_property(self.name(), name)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use approx::assert_abs_diff_eq;

    use crate::gfx::scene::Vertices;

    fn ring() -> Arc<Vertices> {
        Arc::new(Vertices::from_arrays(&[
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 1.0],
            [-1.0, 2.0, 0.0],
            [0.5, -3.0, -0.5],
        ]))
    }

    fn run(deformer: &mut TwistDeformer, input: Arc<Vertices>) -> Vertices {
        deformer.set_input(input);
        deformer.apply();
        deformer.output().unwrap().as_ref().clone()
    }

    #[test]
    fn test_zero_angle_is_identity() {
        let mut twist = TwistDeformer::new(Vector3::new(1.0, 1.0, 0.0), Vector3::new(0.3, -0.2, 0.7));
        twist.set_falloff(2.5);
        twist.set_distance_range(0.5, 3.0);

        let input = ring();
        let output = run(&mut twist, input.clone());
        for (a, b) in input.iter().zip(output.iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_zero_weight_is_exact_identity() {
        let mut twist = TwistDeformer::default();
        twist.set_angle(2.0);
        twist.set_weight(0.0);

        let input = ring();
        assert_eq!(run(&mut twist, input.clone()), *input);
    }

    #[test]
    fn test_full_strength_quarter_turn() {
        let mut twist = TwistDeformer::default();
        twist.set_angle(std::f32::consts::FRAC_PI_2);
        // Keep the point inside the full-strength band
        twist.set_distance_range(1.0, 2.0);

        let output = run(&mut twist, Arc::new(Vertices::from_arrays(&[[1.0, 0.0, 0.0]])));
        // +90 degrees about +Y maps +X onto -Z
        assert_abs_diff_eq!(output.as_slice()[0], Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-5);
    }

    #[test]
    fn test_points_beyond_end_distance_are_untouched() {
        let mut twist = TwistDeformer::default();
        twist.set_angle(1.0);
        twist.set_distance_range(0.0, 1.0);

        let input = Arc::new(Vertices::from_arrays(&[[1.0, 5.0, 0.0]]));
        assert_eq!(run(&mut twist, input.clone()), *input);
    }

    #[test]
    fn test_clone_fidelity() {
        let mut twist = TwistDeformer::new(Vector3::new(0.0, 0.0, 1.0), Vector3::new(0.1, 0.2, 0.3));
        twist.set_angle(0.8);
        twist.set_falloff(1.5);
        twist.set_weight(0.7);

        let mut copy = twist.clone_box();
        let input = ring();
        let expected = run(&mut twist, input.clone());

        copy.set_input(input);
        copy.apply();
        assert_eq!(*copy.output().unwrap(), expected);
    }

    #[test]
    fn test_properties_round_trip_through_setters() {
        let mut twist = TwistDeformer::default();
        twist.set_property("Angle", PropertyValue::Float(0.5)).unwrap();
        twist.set_property("Axis", PropertyValue::Vec3(Vector3::new(0.0, 0.0, 3.0))).unwrap();
        assert_eq!(twist.angle(), 0.5);
        assert_eq!(twist.axis(), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(twist.properties().len(), 8);
    }
}
