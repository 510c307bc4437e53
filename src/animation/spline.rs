//! Catmull-Rom path through control points.

use cgmath::{InnerSpace, Vector3};

use crate::error::SplineError;

/// Catmull-Rom spline with cached cumulative chord lengths
///
/// The parameter `t` runs from 0 at the first control point to `len() - 1` at
/// the last; integer values land exactly on control points. Distances are
/// measured along the straight chords between control points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spline {
    points: Vec<Vector3<f32>>,
    distances: Vec<f32>,
}

impl Spline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: impl IntoIterator<Item = Vector3<f32>>) -> Self {
        let mut spline = Self::new();
        spline.points.extend(points);
        spline.update_distances();
        spline
    }

    pub fn add_point(&mut self, point: Vector3<f32>) {
        self.points.push(point);
        self.update_distances();
    }

    pub fn points(&self) -> &[Vector3<f32>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.distances.clear();
    }

    /// Summed chord length between consecutive control points
    pub fn total_length(&self) -> f32 {
        self.distances.last().copied().unwrap_or(0.0)
    }

    /// Largest valid parameter value, `len() - 1`
    pub fn max_t(&self) -> f32 {
        self.points.len().saturating_sub(1) as f32
    }

    /// Maps a chord distance to the spline parameter
    ///
    /// Distances before the start map to 0 and past the end to `max_t()`.
    pub fn distance_to_t(&self, distance: f32) -> f32 {
        if self.points.len() < 2 {
            return 0.0;
        }

        let index = self.distances.partition_point(|d| *d < distance);
        if index == 0 {
            return 0.0;
        }
        if index == self.distances.len() {
            return self.max_t();
        }

        let segment = index - 1;
        let start = self.distances[segment];
        let length = self.distances[index] - start;
        if length <= f32::EPSILON {
            return segment as f32;
        }
        segment as f32 + (distance - start) / length
    }

    /// Point on the curve at parameter `t`, clamped to `[0, max_t()]`
    pub fn position_by_t(&self, t: f32) -> Result<Vector3<f32>, SplineError> {
        self.check_points()?;

        let t = t.clamp(0.0, self.max_t());
        let segment = t as usize;
        let last = self.points.len() - 1;
        if segment >= last {
            return Ok(self.points[last]);
        }

        let p1 = self.points[segment];
        let p2 = self.points[segment + 1];
        let p0 = if segment > 0 { self.points[segment - 1] } else { p1 };
        let p3 = if segment + 2 <= last { self.points[segment + 2] } else { p2 };

        Ok(catmull_rom(p0, p1, p2, p3, t - segment as f32))
    }

    /// Point on the curve `distance` units along the chords from the start
    pub fn position_by_distance(&self, distance: f32) -> Result<Vector3<f32>, SplineError> {
        self.check_points()?;
        self.position_by_t(self.distance_to_t(distance))
    }

    fn check_points(&self) -> Result<(), SplineError> {
        if self.points.len() < 2 {
            return Err(SplineError::NotEnoughPoints {
                required: 2,
                actual: self.points.len(),
            });
        }
        Ok(())
    }

    fn update_distances(&mut self) {
        self.distances.clear();
        let mut total = 0.0;
        self.distances.push(total);
        for pair in self.points.windows(2) {
            total += (pair[1] - pair[0]).magnitude();
            self.distances.push(total);
        }
    }
}

/// Uniform Catmull-Rom segment between `p1` (t = 0) and `p2` (t = 1)
pub fn catmull_rom(
    p0: Vector3<f32>,
    p1: Vector3<f32>,
    p2: Vector3<f32>,
    p3: Vector3<f32>,
    t: f32,
) -> Vector3<f32> {
    let t2 = t * t;
    let t3 = t2 * t;

    let b = (p2 - p0) * 0.5;
    let c = (p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3) * 0.5;
    let d = (-p0 + p1 * 3.0 - p2 * 3.0 + p3) * 0.5;

    p1 + b * t + c * t2 + d * t3
}
