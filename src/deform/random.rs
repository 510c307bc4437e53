//! # Random Deformer
//!
//! Per-vertex jitter from one of several noise sources. Uniform and gaussian
//! noise come from a [`StdRng`] seeded with `seed + vertex index`, so a vertex
//! always draws the same values. Gradient, simplex, cellular and fractal
//! noise sample a `noise` field at `(position + offset) ⊙ frequency`.
//!
//! Noise values are cached per vertex. The cache is rebuilt when a parameter
//! that affects it changes, when time moves by more than 0.001, or when the
//! vertex count changes; it is not rebuilt when only the input positions move.

use cgmath::{ElementWise, InnerSpace, Vector3};
use noise::{Fbm, MultiFractal, NoiseFn, OpenSimplex, Perlin, Worley};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::deformer::{Deformer, DeformerBase};
use super::property::{unknown_property, Property, PropertyValue};
use super::safe_normalize;
use crate::error::DeformError;

const DEFAULT_SEED: u32 = 12345;

/// Source of per-vertex noise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseType {
    Uniform,
    Gaussian,
    Perlin,
    Simplex,
    Cellular,
    Fractal,
}

impl NoiseType {
    pub const ALL: [NoiseType; 6] = [
        NoiseType::Uniform,
        NoiseType::Gaussian,
        NoiseType::Perlin,
        NoiseType::Simplex,
        NoiseType::Cellular,
        NoiseType::Fractal,
    ];

    pub fn index(self) -> i32 {
        self as i32
    }

    pub fn from_index(index: i32) -> Option<Self> {
        usize::try_from(index).ok().and_then(|i| Self::ALL.get(i).copied())
    }
}

/// How a vertex's noise value moves it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeformationMode {
    /// The noise value replaces the position
    Absolute,
    /// The noise value is added to the position
    Additive,
    /// The noise magnitude moves the vertex along `direction`
    Directional,
    /// The noise magnitude moves the vertex away from `center`
    Radial,
    /// Needs vertex normals; behaves as `Additive`
    SurfaceNormal,
}

impl DeformationMode {
    pub const ALL: [DeformationMode; 5] = [
        DeformationMode::Absolute,
        DeformationMode::Additive,
        DeformationMode::Directional,
        DeformationMode::Radial,
        DeformationMode::SurfaceNormal,
    ];

    pub fn index(self) -> i32 {
        self as i32
    }

    pub fn from_index(index: i32) -> Option<Self> {
        usize::try_from(index).ok().and_then(|i| Self::ALL.get(i).copied())
    }
}

/// Noise-driven vertex jitter
#[derive(Debug, Clone)]
pub struct RandomDeformer {
    base: DeformerBase,
    noise_type: NoiseType,
    mode: DeformationMode,
    intensity: Vector3<f32>,
    frequency: Vector3<f32>,
    offset: Vector3<f32>,
    direction: Vector3<f32>,
    center: Vector3<f32>,
    time: f32,
    seed: u32,
    octaves: u32,
    persistence: f32,
    lacunarity: f32,
    cache: Vec<Vector3<f32>>,
    cache_valid: bool,
}

impl RandomDeformer {
    pub fn new(noise_type: NoiseType, mode: DeformationMode) -> Self {
        Self {
            base: DeformerBase::new(),
            noise_type,
            mode,
            intensity: Vector3::new(1.0, 1.0, 1.0),
            frequency: Vector3::new(1.0, 1.0, 1.0),
            offset: Vector3::new(0.0, 0.0, 0.0),
            direction: Vector3::unit_y(),
            center: Vector3::new(0.0, 0.0, 0.0),
            time: 0.0,
            seed: DEFAULT_SEED,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            cache: Vec::new(),
            cache_valid: false,
        }
    }

    pub fn noise_type(&self) -> NoiseType {
        self.noise_type
    }

    pub fn set_noise_type(&mut self, noise_type: NoiseType) {
        self.noise_type = noise_type;
        self.invalidate_cache();
    }

    pub fn deformation_mode(&self) -> DeformationMode {
        self.mode
    }

    pub fn set_deformation_mode(&mut self, mode: DeformationMode) {
        self.mode = mode;
    }

    pub fn intensity(&self) -> Vector3<f32> {
        self.intensity
    }

    pub fn set_intensity(&mut self, intensity: Vector3<f32>) {
        self.intensity = intensity;
        self.invalidate_cache();
    }

    pub fn set_uniform_intensity(&mut self, intensity: f32) {
        self.set_intensity(Vector3::new(intensity, intensity, intensity));
    }

    pub fn frequency(&self) -> Vector3<f32> {
        self.frequency
    }

    pub fn set_frequency(&mut self, frequency: Vector3<f32>) {
        self.frequency = frequency;
        self.invalidate_cache();
    }

    pub fn set_uniform_frequency(&mut self, frequency: f32) {
        self.set_frequency(Vector3::new(frequency, frequency, frequency));
    }

    pub fn offset(&self) -> Vector3<f32> {
        self.offset
    }

    pub fn set_offset(&mut self, offset: Vector3<f32>) {
        self.offset = offset;
        self.invalidate_cache();
    }

    pub fn direction(&self) -> Vector3<f32> {
        self.direction
    }

    /// Sets the displacement direction for [`DeformationMode::Directional`]
    pub fn set_direction(&mut self, direction: Vector3<f32>) {
        self.direction = safe_normalize(direction, Vector3::unit_y());
    }

    pub fn center(&self) -> Vector3<f32> {
        self.center
    }

    pub fn set_center(&mut self, center: Vector3<f32>) {
        self.center = center;
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn set_seed(&mut self, seed: u32) {
        self.seed = seed;
        self.invalidate_cache();
    }

    pub fn octaves(&self) -> u32 {
        self.octaves
    }

    pub fn set_octaves(&mut self, octaves: u32) {
        self.octaves = octaves.max(1);
        self.invalidate_cache();
    }

    pub fn persistence(&self) -> f32 {
        self.persistence
    }

    pub fn set_persistence(&mut self, persistence: f32) {
        self.persistence = persistence;
        self.invalidate_cache();
    }

    pub fn lacunarity(&self) -> f32 {
        self.lacunarity
    }

    pub fn set_lacunarity(&mut self, lacunarity: f32) {
        self.lacunarity = lacunarity;
        self.invalidate_cache();
    }

    pub fn is_cache_valid(&self) -> bool {
        self.cache_valid
    }

    /// Forces the noise to be regenerated on the next apply
    pub fn invalidate_cache(&mut self) {
        self.cache_valid = false;
    }

    fn noise_field(&self) -> Option<Box<dyn NoiseFn<f64, 3>>> {
        match self.noise_type {
            NoiseType::Uniform | NoiseType::Gaussian => None,
            NoiseType::Perlin => Some(Box::new(Perlin::new(self.seed))),
            NoiseType::Simplex => Some(Box::new(OpenSimplex::new(self.seed))),
            NoiseType::Cellular => Some(Box::new(Worley::new(self.seed))),
            NoiseType::Fractal => Some(Box::new(
                Fbm::<Perlin>::new(self.seed)
                    .set_octaves(self.octaves as usize)
                    .set_persistence(self.persistence as f64)
                    .set_lacunarity(self.lacunarity as f64),
            )),
        }
    }

    fn generate_noise(&self, field: Option<&dyn NoiseFn<f64, 3>>, position: Vector3<f32>, index: usize) -> Vector3<f32> {
        let raw = match (self.noise_type, field) {
            (NoiseType::Uniform, _) => {
                let mut rng = self.vertex_rng(index);
                Vector3::new(
                    rng.random_range(-1.0f32..1.0),
                    rng.random_range(-1.0f32..1.0),
                    rng.random_range(-1.0f32..1.0),
                )
            }
            (NoiseType::Gaussian, _) => {
                let mut rng = self.vertex_rng(index);
                Vector3::new(gaussian(&mut rng), gaussian(&mut rng), gaussian(&mut rng))
            }
            (noise_type, Some(field)) => {
                let mut sample = (position + self.offset).mul_element_wise(self.frequency);
                // Cellular noise is static; the other fields drift slowly with time
                if noise_type != NoiseType::Cellular {
                    let drift = self.time * 0.1;
                    sample += Vector3::new(drift, drift, drift);
                }
                let value = field.get([sample.x as f64, sample.y as f64, sample.z as f64]) as f32;
                Vector3::new(value, value, value)
            }
            (_, None) => Vector3::new(0.0, 0.0, 0.0),
        };

        raw.mul_element_wise(self.intensity)
    }

    fn vertex_rng(&self, index: usize) -> StdRng {
        StdRng::seed_from_u64(self.seed as u64 + index as u64)
    }

    fn refresh_cache(&mut self, input: &[Vector3<f32>]) {
        if self.cache.len() != input.len() {
            self.cache.resize(input.len(), Vector3::new(0.0, 0.0, 0.0));
            self.cache_valid = false;
        }
        if self.cache_valid {
            return;
        }

        let field = self.noise_field();
        let noise: Vec<Vector3<f32>> = input
            .iter()
            .enumerate()
            .map(|(index, position)| self.generate_noise(field.as_deref(), *position, index))
            .collect();
        self.cache = noise;
        self.cache_valid = true;

        log::debug!("regenerated {:?} noise for {} vertices", self.noise_type, input.len());
    }
}

impl Default for RandomDeformer {
    fn default() -> Self {
        Self::new(NoiseType::Uniform, DeformationMode::Additive)
    }
}

/// Standard normal sample via the Box-Muller transform
fn gaussian(rng: &mut StdRng) -> f32 {
    let u1 = rng.random::<f32>().max(f32::MIN_POSITIVE);
    let u2 = rng.random::<f32>();
    (-2.0 * u1.ln()).sqrt() * (std::f32::consts::TAU * u2).cos()
}

impl Deformer for RandomDeformer {
    fn name(&self) -> &'static str {
        "Random"
    }

    fn base(&self) -> &DeformerBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut DeformerBase {
        &mut self.base
    }

    fn deform(&mut self, input: &[Vector3<f32>], output: &mut [Vector3<f32>]) {
        let weight = self.base.weight();
        if weight <= 0.0 {
            output.copy_from_slice(input);
            return;
        }

        self.refresh_cache(input);

        for ((src, dst), noise) in input.iter().zip(output.iter_mut()).zip(self.cache.iter()) {
            let noise = noise * weight;
            *dst = match self.mode {
                DeformationMode::Absolute => noise,
                DeformationMode::Additive | DeformationMode::SurfaceNormal => src + noise,
                DeformationMode::Directional => src + self.direction * noise.magnitude(),
                DeformationMode::Radial => {
                    let outward = src - self.center;
                    let distance = outward.magnitude();
                    if distance > 0.001 {
                        src + (outward / distance) * noise.magnitude()
                    } else {
                        *src
                    }
                }
            };
        }
    }

    fn clone_box(&self) -> Box<dyn Deformer> {
        Box::new(Self {
            base: self.base.snapshot(),
            cache: Vec::new(),
            cache_valid: false,
            ..self.clone()
        })
    }

    fn set_time(&mut self, time: f32) {
        if (self.time - time).abs() > 0.001 {
            self.time = time;
            self.invalidate_cache();
        }
    }

    fn parameters(&self) -> Vec<Property> {
        vec![
            Property::new("Noise type", "Random", self.noise_type.index()).with_range(0.0, 5.0),
            Property::new("Mode", "Random", self.mode.index()).with_range(0.0, 4.0),
            Property::new("Intensity", "Random", self.intensity),
            Property::new("Frequency", "Random", self.frequency),
            Property::new("Offset", "Random", self.offset),
            Property::new("Direction", "Random", self.direction),
            Property::new("Center", "Random", self.center),
            Property::new("Seed", "Random", self.seed as i32),
            Property::new("Octaves", "Random", self.octaves as i32).with_range(1.0, 8.0),
            Property::new("Persistence", "Random", self.persistence).with_range(0.0, 1.0),
            Property::new("Lacunarity", "Random", self.lacunarity).with_range(1.0, 4.0),
        ]
    }

    fn set_parameter(&mut self, name: &str, value: PropertyValue) -> Result<(), DeformError> {
        match name {
            "Noise type" => {
                let noise_type = NoiseType::from_index(value.try_int(name)?).ok_or_else(|| DeformError::PropertyType {
                    name: name.to_string(),
                    expected: "noise type index 0..=5",
                })?;
                self.set_noise_type(noise_type);
            }
            "Mode" => {
                let mode = DeformationMode::from_index(value.try_int(name)?).ok_or_else(|| DeformError::PropertyType {
                    name: name.to_string(),
                    expected: "mode index 0..=4",
                })?;
                self.set_deformation_mode(mode);
            }
            "Intensity" => self.set_intensity(value.try_vec3(name)?),
            "Frequency" => self.set_frequency(value.try_vec3(name)?),
            "Offset" => self.set_offset(value.try_vec3(name)?),
            "Direction" => self.set_direction(value.try_vec3(name)?),
            "Center" => self.set_center(value.try_vec3(name)?),
            "Seed" => self.set_seed(value.try_int(name)? as u32),
            "Octaves" => self.set_octaves(value.try_int(name)?.max(1) as u32),
            "Persistence" => self.set_persistence(value.try_float(name)?),
            "Lacunarity" => self.set_lacunarity(value.try_float(name)?),
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

    fn grid() -> Arc<Vertices> {
        Arc::new(Vertices::from_positions(
            (0..16)
                .map(|i| Vector3::new((i % 4) as f32 * 0.37, (i / 4) as f32 * 0.53, 0.25))
                .collect(),
        ))
    }

    fn run(deformer: &mut dyn Deformer, input: Arc<Vertices>) -> Vertices {
        deformer.set_input(input);
        deformer.apply();
        deformer.output().unwrap().as_ref().clone()
    }

    #[test]
    fn test_uniform_noise_is_bounded_and_reproducible() {
        let mut random = RandomDeformer::new(NoiseType::Uniform, DeformationMode::Additive);
        random.set_uniform_intensity(0.1);
        let input = grid();

        let first = run(&mut random, input.clone());
        random.invalidate_cache();
        let second = run(&mut random, input.clone());
        assert_eq!(first, second);

        for (a, b) in input.iter().zip(first.iter()) {
            let delta = b - a;
            assert!(delta.x.abs() <= 0.1 && delta.y.abs() <= 0.1 && delta.z.abs() <= 0.1);
        }
    }

    #[test]
    fn test_seed_changes_the_noise() {
        let mut random = RandomDeformer::default();
        let input = grid();
        let first = run(&mut random, input.clone());
        random.set_seed(7);
        assert!(!random.is_cache_valid());
        assert_ne!(run(&mut random, input), first);
    }

    #[test]
    fn test_small_time_steps_keep_cache() {
        let mut random = RandomDeformer::new(NoiseType::Perlin, DeformationMode::Additive);
        run(&mut random, grid());
        assert!(random.is_cache_valid());

        random.set_time(0.0005);
        assert!(random.is_cache_valid());
        random.set_time(0.5);
        assert!(!random.is_cache_valid());
    }

    #[test]
    fn test_vertex_count_change_rebuilds_cache() {
        let mut random = RandomDeformer::default();
        run(&mut random, grid());
        let output = run(&mut random, Arc::new(Vertices::from_arrays(&[[0.0, 0.0, 0.0]])));
        assert_eq!(output.len(), 1);
    }

    #[test]
    fn test_directional_mode_moves_along_direction() {
        let mut random = RandomDeformer::new(NoiseType::Gaussian, DeformationMode::Directional);
        random.set_direction(Vector3::new(0.0, 0.0, 2.0));
        let input = grid();
        let output = run(&mut random, input.clone());

        for (a, b) in input.iter().zip(output.iter()) {
            assert_eq!(a.x, b.x);
            assert_eq!(a.y, b.y);
            assert!(b.z >= a.z);
        }
    }

    #[test]
    fn test_radial_mode_leaves_center_alone() {
        let mut random = RandomDeformer::new(NoiseType::Uniform, DeformationMode::Radial);
        random.set_center(Vector3::new(1.0, 1.0, 1.0));
        let output = run(&mut random, Arc::new(Vertices::from_arrays(&[[1.0, 1.0, 1.0]])));
        assert_eq!(output.vertex(0), Some(Vector3::new(1.0, 1.0, 1.0)));
    }

    #[test]
    fn test_every_noise_type_produces_finite_values() {
        for noise_type in NoiseType::ALL {
            let mut random = RandomDeformer::new(noise_type, DeformationMode::Additive);
            let output = run(&mut random, grid());
            assert!(output.iter().all(|p| p.x.is_finite() && p.y.is_finite() && p.z.is_finite()));
        }
    }

    #[test]
    fn test_zero_weight_is_identity() {
        let mut random = RandomDeformer::new(NoiseType::Fractal, DeformationMode::Absolute);
        random.set_weight(0.0);
        let input = grid();
        assert_eq!(run(&mut random, input.clone()), *input);
    }

    #[test]
    fn test_clone_fidelity() {
        let mut random = RandomDeformer::new(NoiseType::Simplex, DeformationMode::Additive);
        random.set_uniform_frequency(2.5);
        random.set_seed(42);
        random.set_time(3.0);
        random.set_weight(0.4);
        let mut copy = random.clone_box();

        let input = grid();
        assert_eq!(run(copy.as_mut(), input.clone()), run(&mut random, input));
    }

    #[test]
    fn test_enum_properties() {
        let mut random = RandomDeformer::default();
        random.set_property("Noise type", PropertyValue::Int(4)).unwrap();
        assert_eq!(random.noise_type(), NoiseType::Cellular);
        assert!(random.set_property("Mode", PropertyValue::Int(9)).is_err());
        assert_eq!(random.deformation_mode(), DeformationMode::Additive);
    }
}
