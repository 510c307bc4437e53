//! # Deformer Trait
//!
//! A deformer is one stage of the deformation pipeline: it reads an input
//! vertex buffer and writes a deformed copy of the same length. Concrete
//! deformers only implement the per-vertex kernel ([`Deformer::deform`]);
//! buffer management, enable/weight gating and the lifecycle state live in the
//! shared [`DeformerBase`] and in the provided trait methods.
//!
//! ## Lifecycle
//!
//! ```text
//! Uninitialized --set_input--> Ready --apply--> Applied --reset--> Ready
//! ```
//!
//! `apply` never fails. Without an input it does nothing; when the deformer is
//! disabled the input is copied through unchanged.

use std::fmt;
use std::sync::Arc;

use cgmath::Vector3;

use super::property::{unknown_property, Property, PropertyValue};
use crate::error::DeformError;
use crate::gfx::scene::Vertices;

/// Lifecycle state of a deformer's buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeformerState {
    /// No input linked yet
    Uninitialized,
    /// Input linked, output not yet computed for it
    Ready,
    /// Output holds the deformation of the current input
    Applied,
}

/// State shared by every deformer: gating parameters and linked buffers
#[derive(Debug, Clone)]
pub struct DeformerBase {
    enabled: bool,
    weight: f32,
    input: Option<Arc<Vertices>>,
    output: Option<Arc<Vertices>>,
    state: DeformerState,
}

impl DeformerBase {
    pub fn new() -> Self {
        Self {
            enabled: true,
            weight: 1.0,
            input: None,
            output: None,
            state: DeformerState::Uninitialized,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Sets the global blend weight, clamped to `[0, 1]`
    pub fn set_weight(&mut self, weight: f32) {
        self.weight = weight.clamp(0.0, 1.0);
    }

    pub fn state(&self) -> DeformerState {
        self.state
    }

    pub fn input(&self) -> Option<&Arc<Vertices>> {
        self.input.as_ref()
    }

    pub fn output(&self) -> Option<&Arc<Vertices>> {
        self.output.as_ref()
    }

    /// Links a new input buffer
    ///
    /// The output buffer is kept when the vertex count is unchanged and
    /// reallocated (as a copy of the input) otherwise.
    pub fn set_input(&mut self, input: Arc<Vertices>) {
        let reuse = matches!(&self.output, Some(output) if output.len() == input.len());
        if !reuse {
            self.output = Some(Arc::new(input.as_ref().clone()));
        }
        self.input = Some(input);
        self.state = DeformerState::Ready;
    }

    /// Drops the link to the input buffer, keeping the output
    pub(crate) fn detach_input(&mut self) {
        self.input = None;
    }

    /// Copies the input back into the output
    pub fn reset(&mut self) {
        if let (Some(input), Some(output)) = (&self.input, &mut self.output) {
            if let Err(err) = Arc::make_mut(output).copy_from(input) {
                log::warn!("deformer reset skipped: {err}");
                return;
            }
            self.state = DeformerState::Ready;
        }
    }

    /// Copy of the gating parameters without any linked buffers
    pub fn snapshot(&self) -> Self {
        Self {
            enabled: self.enabled,
            weight: self.weight,
            input: None,
            output: None,
            state: DeformerState::Uninitialized,
        }
    }

    fn take_output(&mut self) -> Option<Arc<Vertices>> {
        self.output.take()
    }

    fn finish_apply(&mut self, output: Arc<Vertices>) {
        self.output = Some(output);
        self.state = DeformerState::Applied;
    }
}

impl Default for DeformerBase {
    fn default() -> Self {
        Self::new()
    }
}

/// A composable vertex deformation stage
///
/// Implementors provide the kernel and parameter export; the provided methods
/// handle buffer linking and gating. Kernels must write every output vertex
/// and copy the input vertex unchanged wherever the effective weight is not
/// positive.
pub trait Deformer: fmt::Debug {
    /// Display name, also used as the owner in property errors
    fn name(&self) -> &'static str;

    fn base(&self) -> &DeformerBase;

    fn base_mut(&mut self) -> &mut DeformerBase;

    /// Per-vertex kernel; `input` and `output` have the same length
    fn deform(&mut self, input: &[Vector3<f32>], output: &mut [Vector3<f32>]);

    /// Deep copy carrying every parameter, the weight and the enabled flag
    ///
    /// Linked buffers are not copied.
    fn clone_box(&self) -> Box<dyn Deformer>;

    /// Deformer-specific properties, excluding the shared gating ones
    fn parameters(&self) -> Vec<Property> {
        Vec::new()
    }

    /// Writes a deformer-specific property
    fn set_parameter(&mut self, name: &str, _value: PropertyValue) -> Result<(), DeformError> {
        Err(unknown_property(self.name(), name))
    }

    /// Advances time-dependent deformers; others ignore it
    fn set_time(&mut self, _time: f32) {}

    fn is_enabled(&self) -> bool {
        self.base().is_enabled()
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.base_mut().set_enabled(enabled);
    }

    fn weight(&self) -> f32 {
        self.base().weight()
    }

    fn set_weight(&mut self, weight: f32) {
        self.base_mut().set_weight(weight);
    }

    fn state(&self) -> DeformerState {
        self.base().state()
    }

    fn set_input(&mut self, input: Arc<Vertices>) {
        self.base_mut().set_input(input);
    }

    fn input(&self) -> Option<Arc<Vertices>> {
        self.base().input().cloned()
    }

    fn output(&self) -> Option<Arc<Vertices>> {
        self.base().output().cloned()
    }

    /// Runs the deformation from the linked input into the output
    fn apply(&mut self) {
        let Some(input) = self.base().input().cloned() else {
            return;
        };
        let Some(mut output) = self.base_mut().take_output() else {
            return;
        };

        let buffer = Arc::make_mut(&mut output);
        if buffer.len() != input.len() {
            *buffer = Vertices::new(input.len());
        }

        if self.is_enabled() {
            self.deform(input.as_slice(), buffer.as_mut_slice());
        } else {
            buffer.as_mut_slice().copy_from_slice(input.as_slice());
        }

        self.base_mut().finish_apply(output);
    }

    fn reset(&mut self) {
        self.base_mut().reset();
    }

    /// Every exported property: "Enabled" and "Weight" first, then parameters
    fn properties(&self) -> Vec<Property> {
        let mut properties = vec![
            Property::new("Enabled", "Deformer", self.is_enabled()),
            Property::new("Weight", "Deformer", self.weight()).with_range(0.0, 1.0),
        ];
        properties.extend(self.parameters());
        properties
    }

    /// Writes any exported property by name
    fn set_property(&mut self, name: &str, value: PropertyValue) -> Result<(), DeformError> {
        match name {
            "Enabled" => {
                let enabled = value.try_bool(name)?;
                self.set_enabled(enabled);
                Ok(())
            }
            "Weight" => {
                let weight = value.try_float(name)?;
                self.set_weight(weight);
                Ok(())
            }
            _ => self.set_parameter(name, value),
        }
    }
}

impl Clone for Box<dyn Deformer> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
