//! Fractal hash-noise turbulence displacement.

use cgmath::Vector3;

use super::deformer::{Deformer, DeformerBase};
use super::function::FunctionShaping;
use super::property::{unknown_property, Property, PropertyValue};
use crate::error::DeformError;

const DEFAULT_SEED: u32 = 12345;

/// Displaces vertices by three decorrelated turbulence samples
///
/// Each axis samples [`turbulence`] at `p * scale + time * animation_speed`,
/// with Y and Z shifted by 100 units along X and Y respectively.
#[derive(Debug, Clone)]
pub struct TurbulenceDeformer {
    base: DeformerBase,
    shaping: FunctionShaping,
    scale: f32,
    intensity: f32,
    octaves: u32,
    persistence: f32,
    animation_speed: f32,
    seed: u32,
}

impl TurbulenceDeformer {
    pub fn new(scale: f32, intensity: f32, octaves: u32, persistence: f32, animation_speed: f32) -> Self {
        Self {
            base: DeformerBase::new(),
            shaping: FunctionShaping::default(),
            scale,
            intensity,
            octaves: octaves.max(1),
            persistence,
            animation_speed,
            seed: DEFAULT_SEED,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity;
    }

    pub fn octaves(&self) -> u32 {
        self.octaves
    }

    /// Sets the octave count (at least 1)
    pub fn set_octaves(&mut self, octaves: u32) {
        self.octaves = octaves.max(1);
    }

    pub fn persistence(&self) -> f32 {
        self.persistence
    }

    pub fn set_persistence(&mut self, persistence: f32) {
        self.persistence = persistence;
    }

    pub fn animation_speed(&self) -> f32 {
        self.animation_speed
    }

    pub fn set_animation_speed(&mut self, speed: f32) {
        self.animation_speed = speed;
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn set_seed(&mut self, seed: u32) {
        self.seed = seed;
    }

    pub fn time(&self) -> f32 {
        self.shaping.time
    }

    pub fn shaping_mut(&mut self) -> &mut FunctionShaping {
        &mut self.shaping
    }

    /// Raw displacement at `p` for the current time
    pub fn displacement(&self, p: Vector3<f32>) -> Vector3<f32> {
        let drift = self.shaping.time * self.animation_speed;
        let sample = p * self.scale + Vector3::new(drift, drift, drift);

        Vector3::new(
            turbulence(sample, self.octaves, self.persistence, self.seed),
            turbulence(sample + Vector3::new(100.0, 0.0, 0.0), self.octaves, self.persistence, self.seed),
            turbulence(sample + Vector3::new(0.0, 100.0, 0.0), self.octaves, self.persistence, self.seed),
        ) * self.intensity
    }
}

impl Default for TurbulenceDeformer {
    fn default() -> Self {
        Self::new(1.0, 1.0, 4, 0.5, 1.0)
    }
}

/// Fractal sum of absolute hashed lattice noise
///
/// Each octave hashes the integer cell of `position * frequency` into a value
/// in `[-1, 1)` and adds its magnitude times the octave amplitude. Amplitude
/// is multiplied by `persistence` and frequency doubled per octave.
pub fn turbulence(position: Vector3<f32>, octaves: u32, persistence: f32, seed: u32) -> f32 {
    let mut value = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;

    for _ in 0..octaves {
        let p = position * frequency;
        let hash = ((p.x as i32).wrapping_mul(73_856_093)
            ^ (p.y as i32).wrapping_mul(19_349_663)
            ^ (p.z as i32).wrapping_mul(83_492_791)
            ^ seed as i32)
            & 0x7fff_ffff;
        let noise = (hash % 1000) as f32 / 500.0 - 1.0;

        value += noise.abs() * amplitude;
        amplitude *= persistence;
        frequency *= 2.0;
    }

    value
}

impl Deformer for TurbulenceDeformer {
    fn name(&self) -> &'static str {
        "Turbulence"
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
            Property::new("Noise scale", "Turbulence", self.scale),
            Property::new("Intensity", "Turbulence", self.intensity),
            Property::new("Octaves", "Turbulence", self.octaves as i32).with_range(1.0, 8.0),
            Property::new("Persistence", "Turbulence", self.persistence).with_range(0.0, 1.0),
            Property::new("Animation Speed", "Turbulence", self.animation_speed),
            Property::new("Seed", "Turbulence", self.seed as i32),
        ]);
        properties
    }

    fn set_parameter(&mut self, name: &str, value: PropertyValue) -> Result<(), DeformError> {
        if self.shaping.set_property(name, value)? {
            return Ok(());
        }
        match name {
            "Noise scale" => self.scale = value.try_float(name)?,
            "Intensity" => self.intensity = value.try_float(name)?,
            "Octaves" => self.set_octaves(value.try_int(name)?.max(1) as u32),
            "Persistence" => self.persistence = value.try_float(name)?,
            "Animation Speed" => self.animation_speed = value.try_float(name)?,
            "Seed" => self.seed = value.try_int(name)? as u32,
            _ => return Err(unknown_property(self.name(), name)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::gfx::scene::Vertices;

    #[test]
    fn test_turbulence_is_deterministic_and_bounded() {
        let p = Vector3::new(3.7, -1.2, 8.4);
        let a = turbulence(p, 4, 0.5, 7);
        let b = turbulence(p, 4, 0.5, 7);
        assert_eq!(a, b);
        // |noise| <= 1 per octave: 1 + 0.5 + 0.25 + 0.125
        assert!((0.0..=1.875).contains(&a));
    }

    #[test]
    fn test_seed_changes_the_field() {
        let p = Vector3::new(12.0, 5.0, -3.0);
        let values: Vec<f32> = (0..8).map(|seed| turbulence(p, 3, 0.5, seed)).collect();
        assert!(values.iter().any(|v| *v != values[0]));
    }

    #[test]
    fn test_octaves_are_clamped() {
        let mut turbulence = TurbulenceDeformer::new(1.0, 1.0, 0, 0.5, 1.0);
        assert_eq!(turbulence.octaves(), 1);
        turbulence.set_octaves(0);
        assert_eq!(turbulence.octaves(), 1);
        turbulence
            .set_property("Octaves", PropertyValue::Int(-3))
            .unwrap();
        assert_eq!(turbulence.octaves(), 1);
    }

    #[test]
    fn test_zero_weight_is_identity() {
        let mut turbulence = TurbulenceDeformer::default();
        turbulence.set_weight(0.0);
        let input = Arc::new(Vertices::from_arrays(&[[1.5, 2.5, 3.5], [-4.0, 0.0, 9.0]]));
        turbulence.set_input(input.clone());
        turbulence.apply();
        assert_eq!(*turbulence.output().unwrap(), *input);
    }

    #[test]
    fn test_clone_fidelity() {
        let mut turbulence = TurbulenceDeformer::new(0.7, 0.2, 5, 0.6, 2.0);
        turbulence.set_seed(99);
        turbulence.set_time(1.25);
        let mut copy = turbulence.clone_box();

        let input = Arc::new(Vertices::from_arrays(&[[1.5, 2.5, 3.5], [-4.0, 0.0, 9.0], [20.0, 1.0, 1.0]]));
        turbulence.set_input(input.clone());
        turbulence.apply();
        copy.set_input(input);
        copy.apply();
        assert_eq!(*copy.output().unwrap(), *turbulence.output().unwrap());
    }
}
