//! Scale around a center point with exponential falloff.

use cgmath::{ElementWise, InnerSpace, Vector3};

use super::deformer::{Deformer, DeformerBase};
use super::mix;
use super::property::{unknown_property, Property, PropertyValue};
use crate::error::DeformError;

/// Scales vertices about `center` towards `scale`
///
/// The per-vertex weight is `exp(-distance * falloff) * weight`, so the
/// effect is strongest at the center and fades smoothly with distance.
#[derive(Debug, Clone)]
pub struct ScaleDeformer {
    base: DeformerBase,
    center: Vector3<f32>,
    scale: Vector3<f32>,
    falloff: f32,
}

impl ScaleDeformer {
    pub fn new(center: Vector3<f32>, scale: Vector3<f32>) -> Self {
        Self {
            base: DeformerBase::new(),
            center,
            scale,
            falloff: 1.0,
        }
    }

    pub fn center(&self) -> Vector3<f32> {
        self.center
    }

    pub fn set_center(&mut self, center: Vector3<f32>) {
        self.center = center;
    }

    pub fn scale(&self) -> Vector3<f32> {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vector3<f32>) {
        self.scale = scale;
    }

    pub fn falloff(&self) -> f32 {
        self.falloff
    }

    pub fn set_falloff(&mut self, falloff: f32) {
        self.falloff = falloff;
    }
}

impl Default for ScaleDeformer {
    fn default() -> Self {
        Self::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0))
    }
}

impl Deformer for ScaleDeformer {
    fn name(&self) -> &'static str {
        "Scale"
    }

    fn base(&self) -> &DeformerBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut DeformerBase {
        &mut self.base
    }

    fn deform(&mut self, input: &[Vector3<f32>], output: &mut [Vector3<f32>]) {
        let global = self.base.weight();
        let identity = Vector3::new(1.0, 1.0, 1.0);

        for (src, dst) in input.iter().zip(output.iter_mut()) {
            let relative = src - self.center;
            let weight = (-relative.magnitude() * self.falloff).exp() * global;

            if weight <= 0.0 {
                *dst = *src;
                continue;
            }

            let factor = mix(identity, self.scale, weight);
            *dst = self.center + relative.mul_element_wise(factor);
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
            Property::new("Center", "Scale", self.center),
            Property::new("Scale", "Scale", self.scale),
            Property::new("Falloff", "Scale", self.falloff).with_range(0.0, 10.0),
        ]
    }

    fn set_parameter(&mut self, name: &str, value: PropertyValue) -> Result<(), DeformError> {
        match name {
            "Center" => self.center = value.try_vec3(name)?,
            "Scale" => self.scale = value.try_vec3(name)?,
            "Falloff" => self.falloff = value.try_float(name)?,
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

    #[test]
    fn test_center_vertex_is_fixed_point() {
        let mut scale = ScaleDeformer::new(Vector3::new(1.0, 2.0, 3.0), Vector3::new(4.0, 4.0, 4.0));
        scale.set_input(Arc::new(Vertices::from_arrays(&[[1.0, 2.0, 3.0]])));
        scale.apply();
        assert_eq!(scale.output().unwrap().vertex(0), Some(Vector3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_zero_falloff_scales_uniformly() {
        let mut scale = ScaleDeformer::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(2.0, 1.0, 0.5));
        scale.set_falloff(0.0);
        scale.set_input(Arc::new(Vertices::from_arrays(&[[1.0, 1.0, 1.0], [-3.0, 2.0, 4.0]])));
        scale.apply();

        let output = scale.output().unwrap();
        assert_abs_diff_eq!(output.as_slice()[0], Vector3::new(2.0, 1.0, 0.5), epsilon = 1e-6);
        assert_abs_diff_eq!(output.as_slice()[1], Vector3::new(-6.0, 2.0, 2.0), epsilon = 1e-6);
    }

    #[test]
    fn test_effect_fades_with_distance() {
        let mut scale = ScaleDeformer::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(2.0, 2.0, 2.0));
        scale.set_input(Arc::new(Vertices::from_arrays(&[[1.0, 0.0, 0.0], [10.0, 0.0, 0.0]])));
        scale.apply();

        let output = scale.output().unwrap();
        let near = output.as_slice()[0].x / 1.0;
        let far = output.as_slice()[1].x / 10.0;
        assert!(near > far);
        assert!(far > 1.0);
    }

    #[test]
    fn test_zero_weight_is_identity() {
        let mut scale = ScaleDeformer::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(3.0, 3.0, 3.0));
        scale.set_weight(0.0);
        let input = Arc::new(Vertices::from_arrays(&[[1.0, 2.0, 3.0], [0.1, 0.0, -0.2]]));
        scale.set_input(input.clone());
        scale.apply();
        assert_eq!(*scale.output().unwrap(), *input);
    }

    #[test]
    fn test_clone_fidelity() {
        let mut scale = ScaleDeformer::new(Vector3::new(0.5, 0.0, 0.0), Vector3::new(1.5, 0.5, 2.0));
        scale.set_falloff(0.3);
        scale.set_weight(0.8);
        let mut copy = scale.clone_box();

        let input = Arc::new(Vertices::from_arrays(&[[1.0, 2.0, 3.0], [-1.0, 0.0, 0.5]]));
        scale.set_input(input.clone());
        scale.apply();
        copy.set_input(input);
        copy.apply();
        assert_eq!(*copy.output().unwrap(), *scale.output().unwrap());
    }
}
