//! Bend along an axis through a center point.

use cgmath::{InnerSpace, Vector3};

use super::deformer::{Deformer, DeformerBase};
use super::falloff::FalloffRange;
use super::property::{unknown_property, Property, PropertyValue};
use super::{mix, safe_normalize};
use crate::error::DeformError;

/// Offsets vertices sideways in proportion to their distance along `axis`
///
/// The offset direction is perpendicular to the axis: `axis × X`, or
/// `axis × Y` when the axis is nearly parallel to X. The falloff exponent is
/// fixed at 1.
#[derive(Debug, Clone)]
pub struct BendDeformer {
    base: DeformerBase,
    axis: Vector3<f32>,
    center: Vector3<f32>,
    curvature: f32,
    falloff: FalloffRange,
}

impl BendDeformer {
    pub fn new(axis: Vector3<f32>, center: Vector3<f32>) -> Self {
        Self {
            base: DeformerBase::new(),
            axis: safe_normalize(axis, Vector3::unit_y()),
            center,
            curvature: 0.0,
            falloff: FalloffRange::default(),
        }
    }

    pub fn axis(&self) -> Vector3<f32> {
        self.axis
    }

    pub fn set_axis(&mut self, axis: Vector3<f32>) {
        self.axis = safe_normalize(axis, Vector3::unit_y());
    }

    pub fn center(&self) -> Vector3<f32> {
        self.center
    }

    pub fn set_center(&mut self, center: Vector3<f32>) {
        self.center = center;
    }

    pub fn curvature(&self) -> f32 {
        self.curvature
    }

    pub fn set_curvature(&mut self, curvature: f32) {
        self.curvature = curvature;
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

    /// Direction vertices are pushed towards
    pub fn bend_axis(&self) -> Vector3<f32> {
        let reference = if self.axis.dot(Vector3::unit_x()).abs() < 0.9 {
            Vector3::unit_x()
        } else {
            Vector3::unit_y()
        };
        safe_normalize(self.axis.cross(reference), Vector3::unit_z())
    }
}

impl Default for BendDeformer {
    fn default() -> Self {
        Self::new(Vector3::unit_y(), Vector3::new(0.0, 0.0, 0.0))
    }
}

impl Deformer for BendDeformer {
    fn name(&self) -> &'static str {
        "Bend"
    }

    fn base(&self) -> &DeformerBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut DeformerBase {
        &mut self.base
    }

    fn deform(&mut self, input: &[Vector3<f32>], output: &mut [Vector3<f32>]) {
        let global = self.base.weight();
        let bend_axis = self.bend_axis();
        let falloff = FalloffRange {
            exponent: 1.0,
            ..self.falloff
        };

        for (src, dst) in input.iter().zip(output.iter_mut()) {
            let distance = (src - self.center).dot(self.axis);
            let weight = falloff.weight(distance.abs()) * global;

            if weight <= 0.0 {
                *dst = *src;
                continue;
            }

            let bent = src + bend_axis * (self.curvature * distance * weight);
            *dst = mix(*src, bent, weight);
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
            Property::new("Axis", "Bend", self.axis),
            Property::new("Center", "Bend", self.center),
            Property::new("Curvature", "Bend", self.curvature),
            Property::new("Start distance", "Bend", self.falloff.start),
            Property::new("End distance", "Bend", self.falloff.end),
        ]
    }

    fn set_parameter(&mut self, name: &str, value: PropertyValue) -> Result<(), DeformError> {
        match name {
            "Axis" => self.set_axis(value.try_vec3(name)?),
            "Center" => self.center = value.try_vec3(name)?,
            "Curvature" => self.curvature = value.try_float(name)?,
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

    fn column() -> Arc<Vertices> {
        Arc::new(Vertices::from_arrays(&[
            [0.0, -1.0, 0.0],
            [0.0, 0.0, 0.0],
            [0.0, 0.5, 0.0],
            [0.0, 1.0, 0.0],
        ]))
    }

    #[test]
    fn test_bend_axis_is_perpendicular() {
        for axis in [Vector3::unit_x(), Vector3::unit_y(), Vector3::new(1.0, 1.0, 1.0)] {
            let bend = BendDeformer::new(axis, Vector3::new(0.0, 0.0, 0.0));
            let bend_axis = bend.bend_axis();
            assert!(bend_axis.dot(bend.axis()).abs() < 1e-6);
            assert!((bend_axis.magnitude() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_offset_grows_with_axis_distance() {
        let mut bend = BendDeformer::default();
        bend.set_curvature(0.5);
        // Everything inside the full-strength band
        bend.set_distance_range(5.0, 10.0);

        bend.set_input(column());
        bend.apply();
        let output = bend.output().unwrap();

        // Y axis bends towards Y x X = -Z
        assert_abs_diff_eq!(output.as_slice()[1], Vector3::new(0.0, 0.0, 0.0), epsilon = 1e-6);
        assert_abs_diff_eq!(output.as_slice()[3], Vector3::new(0.0, 1.0, -0.5), epsilon = 1e-6);
        assert_abs_diff_eq!(output.as_slice()[0], Vector3::new(0.0, -1.0, 0.5), epsilon = 1e-6);
    }

    #[test]
    fn test_zero_weight_is_identity() {
        let mut bend = BendDeformer::default();
        bend.set_curvature(3.0);
        bend.set_weight(0.0);

        let input = column();
        bend.set_input(input.clone());
        bend.apply();
        assert_eq!(*bend.output().unwrap(), *input);
    }

    #[test]
    fn test_clone_fidelity() {
        let mut bend = BendDeformer::new(Vector3::new(0.0, 0.0, 1.0), Vector3::new(0.0, 0.2, 0.0));
        bend.set_curvature(-0.4);
        bend.set_distance_range(0.2, 4.0);
        bend.set_weight(0.6);
        let mut copy = bend.clone_box();

        let input = column();
        bend.set_input(input.clone());
        bend.apply();
        copy.set_input(input);
        copy.apply();
        assert_eq!(*copy.output().unwrap(), *bend.output().unwrap());
    }
}
