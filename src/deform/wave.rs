//! Travelling sine wave displacement.

use cgmath::{InnerSpace, Vector3};

use super::deformer::{Deformer, DeformerBase};
use super::function::FunctionShaping;
use super::property::{unknown_property, Property, PropertyValue};
use super::safe_normalize;
use crate::error::DeformError;

/// Displaces vertices along `wave_vector` by a sine wave travelling along
/// `direction`
///
/// ```text
/// phase        = dot(p, direction) * frequency - time * speed
/// displacement = wave_vector * sin(phase) * amplitude
/// ```
#[derive(Debug, Clone)]
pub struct WaveDeformer {
    base: DeformerBase,
    shaping: FunctionShaping,
    amplitude: f32,
    frequency: f32,
    speed: f32,
    direction: Vector3<f32>,
    wave_vector: Vector3<f32>,
}

impl WaveDeformer {
    /// Creates a wave; `direction` and `wave_vector` are normalized
    pub fn new(
        amplitude: f32,
        frequency: f32,
        speed: f32,
        direction: Vector3<f32>,
        wave_vector: Vector3<f32>,
    ) -> Self {
        Self {
            base: DeformerBase::new(),
            shaping: FunctionShaping::default(),
            amplitude,
            frequency,
            speed,
            direction: safe_normalize(direction, Vector3::unit_x()),
            wave_vector: safe_normalize(wave_vector, Vector3::unit_y()),
        }
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    pub fn set_amplitude(&mut self, amplitude: f32) {
        self.amplitude = amplitude;
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn set_frequency(&mut self, frequency: f32) {
        self.frequency = frequency;
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn direction(&self) -> Vector3<f32> {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Vector3<f32>) {
        self.direction = safe_normalize(direction, Vector3::unit_x());
    }

    pub fn wave_vector(&self) -> Vector3<f32> {
        self.wave_vector
    }

    pub fn set_wave_vector(&mut self, wave_vector: Vector3<f32>) {
        self.wave_vector = safe_normalize(wave_vector, Vector3::unit_y());
    }

    pub fn time(&self) -> f32 {
        self.shaping.time
    }

    pub fn shaping_mut(&mut self) -> &mut FunctionShaping {
        &mut self.shaping
    }

    /// Raw displacement at `p` for the current time
    pub fn displacement(&self, p: Vector3<f32>) -> Vector3<f32> {
        let phase = p.dot(self.direction) * self.frequency - self.shaping.time * self.speed;
        self.wave_vector * (phase.sin() * self.amplitude)
    }
}

impl Default for WaveDeformer {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0, Vector3::unit_x(), Vector3::unit_y())
    }
}

impl Deformer for WaveDeformer {
    fn name(&self) -> &'static str {
        "Wave"
    }

    fn base(&self) -> &DeformerBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut DeformerBase {
        &mut self.base
    }

    fn deform(&mut self, input: &[Vector3<f32>], output: &mut [Vector3<f32>]) {
        let this = &*self;
        this.shaping
            .displace(input, output, this.base.weight(), |p| this.displacement(p));
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
        let mut properties = self.shaping.properties();
        properties.extend([
            Property::new("Amplitude", "Wave", self.amplitude),
            Property::new("Frequency", "Wave", self.frequency),
            Property::new("Speed", "Wave", self.speed),
            Property::new("Direction", "Wave", self.direction),
            Property::new("Wave Vector", "Wave", self.wave_vector),
        ]);
        properties
    }

    fn set_parameter(&mut self, name: &str, value: PropertyValue) -> Result<(), DeformError> {
        if self.shaping.set_property(name, value)? {
            return Ok(());
        }
        match name {
            "Amplitude" => self.amplitude = value.try_float(name)?,
            "Frequency" => self.frequency = value.try_float(name)?,
            "Speed" => self.speed = value.try_float(name)?,
            "Direction" => self.set_direction(value.try_vec3(name)?),
            "Wave Vector" => self.set_wave_vector(value.try_vec3(name)?),
            _ => return Err(unknown_property(self.name(), name)),
        }
        Ok(())
    }
}
