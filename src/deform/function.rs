//! # Displacement-Function Deformers
//!
//! A [`FunctionDeformer`] displaces every vertex by an arbitrary function of
//! its position. There is no center or falloff: the function encodes its own
//! shaping, and [`FunctionShaping`] applies the common input offset and
//! per-axis output scale:
//!
//! ```text
//! displacement = f(pos + offset) ⊙ scale * weight
//! deformed     = pos + displacement
//! ```
//!
//! The wave and turbulence deformers reuse [`FunctionShaping`] with their own
//! built-in displacement.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use cgmath::Vector3;
//! use haggis_deform::deform::{Deformer, FunctionDeformer};
//! use haggis_deform::gfx::scene::Vertices;
//!
//! let mut ripple = FunctionDeformer::with_function(FunctionDeformer::ripple(2.0, 0.1, Vector3::new(0.0, 0.0, 0.0)));
//! ripple.set_input(Arc::new(Vertices::from_arrays(&[[1.0, 0.0, 0.0]])));
//! ripple.apply();
//! assert!(ripple.output().unwrap().vertex(0).unwrap().x > 1.0);
//! ```

use std::fmt;
use std::rc::Rc;

use cgmath::{ElementWise, InnerSpace, Vector3};

use super::deformer::{Deformer, DeformerBase};
use super::property::{unknown_property, Property, PropertyValue};
use crate::error::DeformError;

/// Shared displacement function of a position
pub type DisplacementFn = Rc<dyn Fn(Vector3<f32>) -> Vector3<f32>>;

/// Input offset, output scale and time shared by function-style deformers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FunctionShaping {
    pub scale: Vector3<f32>,
    pub offset: Vector3<f32>,
    pub use_local_space: bool,
    pub time: f32,
}

impl FunctionShaping {
    /// Displaces `input` into `output` using `f`
    pub fn displace<F>(&self, input: &[Vector3<f32>], output: &mut [Vector3<f32>], weight: f32, f: F)
    where
        F: Fn(Vector3<f32>) -> Vector3<f32>,
    {
        if weight <= 0.0 {
            output.copy_from_slice(input);
            return;
        }

        for (src, dst) in input.iter().zip(output.iter_mut()) {
            let displacement = f(src + self.offset).mul_element_wise(self.scale) * weight;
            *dst = src + displacement;
        }
    }

    pub(crate) fn properties(&self) -> Vec<Property> {
        vec![
            Property::new("Scale", "Function", self.scale),
            Property::new("Offset", "Function", self.offset),
            Property::new("Use local space", "Function", self.use_local_space),
        ]
    }

    /// Writes a shaping property; `Ok(false)` when `name` is not one of them
    pub(crate) fn set_property(&mut self, name: &str, value: PropertyValue) -> Result<bool, DeformError> {
        match name {
            "Scale" => self.scale = value.try_vec3(name)?,
            "Offset" => self.offset = value.try_vec3(name)?,
            "Use local space" => self.use_local_space = value.try_bool(name)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

impl Default for FunctionShaping {
    fn default() -> Self {
        Self {
            scale: Vector3::new(1.0, 1.0, 1.0),
            offset: Vector3::new(0.0, 0.0, 0.0),
            use_local_space: true,
            time: 0.0,
        }
    }
}

/// Deformer driven by a user-supplied displacement function
///
/// Without a function the deformer passes its input through.
#[derive(Clone, Default)]
pub struct FunctionDeformer {
    base: DeformerBase,
    shaping: FunctionShaping,
    function: Option<DisplacementFn>,
}

impl FunctionDeformer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_function(function: DisplacementFn) -> Self {
        Self {
            function: Some(function),
            ..Self::default()
        }
    }

    pub fn set_function(&mut self, function: DisplacementFn) {
        self.function = Some(function);
    }

    pub fn has_function(&self) -> bool {
        self.function.is_some()
    }

    pub fn shaping(&self) -> &FunctionShaping {
        &self.shaping
    }

    pub fn scale(&self) -> Vector3<f32> {
        self.shaping.scale
    }

    pub fn set_scale(&mut self, scale: Vector3<f32>) {
        self.shaping.scale = scale;
    }

    pub fn set_uniform_scale(&mut self, scale: f32) {
        self.shaping.scale = Vector3::new(scale, scale, scale);
    }

    pub fn offset(&self) -> Vector3<f32> {
        self.shaping.offset
    }

    pub fn set_offset(&mut self, offset: Vector3<f32>) {
        self.shaping.offset = offset;
    }

    pub fn use_local_space(&self) -> bool {
        self.shaping.use_local_space
    }

    pub fn set_use_local_space(&mut self, flag: bool) {
        self.shaping.use_local_space = flag;
    }

    pub fn time(&self) -> f32 {
        self.shaping.time
    }

    /// `sin(dot(p, direction) * frequency) * amplitude` along `direction`
    pub fn sine_wave(frequency: f32, amplitude: f32, direction: Vector3<f32>) -> DisplacementFn {
        Rc::new(move |p: Vector3<f32>| direction * ((p.dot(direction) * frequency).sin() * amplitude))
    }

    /// Radial ripple around `center`; zero within 0.001 of the center
    pub fn ripple(frequency: f32, amplitude: f32, center: Vector3<f32>) -> DisplacementFn {
        Rc::new(move |p: Vector3<f32>| {
            let to_center = p - center;
            let distance = to_center.magnitude();
            if distance < 0.001 {
                return Vector3::new(0.0, 0.0, 0.0);
            }
            (to_center / distance) * ((distance * frequency).sin() * amplitude)
        })
    }

    /// Cheap sine-based turbulence summed over `octaves`
    pub fn sin_turbulence(scale: f32, intensity: f32, octaves: u32) -> DisplacementFn {
        Rc::new(move |p: Vector3<f32>| {
            let p = p * scale;
            let mut displacement = Vector3::new(0.0, 0.0, 0.0);
            let mut amplitude = 1.0;
            let mut frequency = 1.0;
            for _ in 0..octaves {
                displacement += Vector3::new(
                    (p.x * frequency + p.y * 0.1).sin(),
                    (p.y * frequency + p.z * 0.1).sin(),
                    (p.z * frequency + p.x * 0.1).sin(),
                ) * amplitude;
                amplitude *= 0.5;
                frequency *= 2.0;
            }
            displacement * intensity
        })
    }

    /// Pulls vertices towards a helix around Y with the given pitch and radius
    pub fn spiral(pitch: f32, radius: f32) -> DisplacementFn {
        Rc::new(move |p: Vector3<f32>| {
            let angle = p.y * pitch;
            let spiral_radius = radius * (1.0 + p.y * 0.1);
            Vector3::new(
                angle.cos() * spiral_radius - p.x,
                0.0,
                angle.sin() * spiral_radius - p.z,
            ) * 0.1
        })
    }

    /// Swirl about the Y axis through `center`, fading with `exp(-d * falloff)`
    pub fn twirl(center: Vector3<f32>, strength: f32, falloff: f32) -> DisplacementFn {
        Rc::new(move |p: Vector3<f32>| {
            let to_center = p - center;
            let distance = to_center.magnitude();
            if distance < 0.001 {
                return Vector3::new(0.0, 0.0, 0.0);
            }
            let weight = (-distance * falloff).exp();
            let (sin, cos) = (strength * weight).sin_cos();
            let rotated = Vector3::new(
                to_center.x * cos - to_center.z * sin,
                to_center.y,
                to_center.x * sin + to_center.z * cos,
            );
            (rotated - to_center) * weight
        })
    }

    /// Attraction towards `center` with quadratic falloff inside `radius`
    pub fn gravity_well(center: Vector3<f32>, strength: f32, radius: f32) -> DisplacementFn {
        Rc::new(move |p: Vector3<f32>| {
            let to_center = center - p;
            let distance = to_center.magnitude();
            if distance < 0.001 || distance > radius {
                return Vector3::new(0.0, 0.0, 0.0);
            }
            let falloff = 1.0 - distance / radius;
            (to_center / distance) * (strength * falloff * falloff)
        })
    }
}

impl fmt::Debug for FunctionDeformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionDeformer")
            .field("base", &self.base)
            .field("shaping", &self.shaping)
            .field("function", &self.function.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl Deformer for FunctionDeformer {
    fn name(&self) -> &'static str {
        "Function"
    }

    fn base(&self) -> &DeformerBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut DeformerBase {
        &mut self.base
    }

    fn deform(&mut self, input: &[Vector3<f32>], output: &mut [Vector3<f32>]) {
        match &self.function {
            Some(function) => self.shaping.displace(input, output, self.base.weight(), |p| function(p)),
            None => output.copy_from_slice(input),
        }
    }

    fn clone_box(&self) -> Box<dyn Deformer> {
        Box::new(Self {
            base: self.base.snapshot(),
            ..self.clone()
        })
    }

    fn set_time(&mut self, time: f32) {
        self.shaping.time = time;
    }

    fn parameters(&self) -> Vec<Property> {
        self.shaping.properties()
    }

    fn set_parameter(&mut self, name: &str, value: PropertyValue) -> Result<(), DeformError> {
        if self.shaping.set_property(name, value)? {
            Ok(())
        } else {
            Err(unknown_property(self.name(), name))
        }
    }
}
