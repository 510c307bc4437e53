//! # Property Export
//!
//! Deformers publish their tunable fields as a flat list of [`Property`]
//! values. Inspectors render them, animators interpolate them, and both write
//! changes back through [`Deformer::set_property`](super::Deformer::set_property).

use cgmath::{Vector3, VectorSpace};

use crate::error::DeformError;

/// Value of an exported property
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    Vec3(Vector3<f32>),
}

impl PropertyValue {
    /// Short type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Bool(_) => "bool",
            PropertyValue::Int(_) => "int",
            PropertyValue::Float(_) => "float",
            PropertyValue::Vec3(_) => "vec3",
        }
    }

    /// Interpolates between two values of the same kind
    ///
    /// Floats and vectors blend linearly. Bools and ints step at `t = 0.5`, as
    /// do mismatched kinds.
    pub fn lerp(&self, other: &PropertyValue, t: f32) -> PropertyValue {
        match (self, other) {
            (PropertyValue::Float(a), PropertyValue::Float(b)) => PropertyValue::Float(a + (b - a) * t),
            (PropertyValue::Vec3(a), PropertyValue::Vec3(b)) => PropertyValue::Vec3(a.lerp(*b, t)),
            _ if t < 0.5 => *self,
            _ => *other,
        }
    }

    pub fn try_bool(&self, name: &str) -> Result<bool, DeformError> {
        match self {
            PropertyValue::Bool(value) => Ok(*value),
            _ => Err(type_error(name, "bool")),
        }
    }

    /// Reads an int; floats are accepted and rounded
    pub fn try_int(&self, name: &str) -> Result<i32, DeformError> {
        match self {
            PropertyValue::Int(value) => Ok(*value),
            PropertyValue::Float(value) => Ok(value.round() as i32),
            _ => Err(type_error(name, "int")),
        }
    }

    /// Reads a float; ints are widened
    pub fn try_float(&self, name: &str) -> Result<f32, DeformError> {
        match self {
            PropertyValue::Float(value) => Ok(*value),
            PropertyValue::Int(value) => Ok(*value as f32),
            _ => Err(type_error(name, "float")),
        }
    }

    pub fn try_vec3(&self, name: &str) -> Result<Vector3<f32>, DeformError> {
        match self {
            PropertyValue::Vec3(value) => Ok(*value),
            _ => Err(type_error(name, "vec3")),
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Int(value)
    }
}

impl From<f32> for PropertyValue {
    fn from(value: f32) -> Self {
        PropertyValue::Float(value)
    }
}

impl From<Vector3<f32>> for PropertyValue {
    fn from(value: Vector3<f32>) -> Self {
        PropertyValue::Vec3(value)
    }
}

/// A named, categorised value exported for inspection
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: &'static str,
    pub category: &'static str,
    pub value: PropertyValue,
    /// Optional numeric range for slider widgets
    pub range: Option<(f64, f64)>,
}

impl Property {
    pub fn new(name: &'static str, category: &'static str, value: impl Into<PropertyValue>) -> Self {
        Self {
            name,
            category,
            value: value.into(),
            range: None,
        }
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.range = Some((min, max));
        self
    }
}

/// Looks up a property by name in an exported list
pub fn find_property<'a>(properties: &'a [Property], name: &str) -> Option<&'a Property> {
    properties.iter().find(|property| property.name == name)
}

pub(crate) fn unknown_property(owner: &str, name: &str) -> DeformError {
    DeformError::UnknownProperty {
        owner: owner.to_string(),
        name: name.to_string(),
    }
}

fn type_error(name: &str, expected: &'static str) -> DeformError {
    DeformError::PropertyType {
        name: name.to_string(),
        expected,
    }
}
