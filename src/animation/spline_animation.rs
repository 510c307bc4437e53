//! Moves a transform node along a [`Spline`].

use super::spline::Spline;
use crate::error::SplineError;
use crate::gfx::scene::TransformNode;

/// What happens when the animation reaches either end of the path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplineAnimMode {
    /// Stop at the end
    #[default]
    Once,
    /// Jump back to the opposite end
    Loop,
    /// Reverse direction
    PingPong,
}

/// How the animation advances along the path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplineInterpolation {
    /// Advance the spline parameter; one unit per control point
    #[default]
    Time,
    /// Advance the chord distance; constant speed along the chords
    Distance,
}

/// Drives a [`TransformNode`] position along a spline
#[derive(Debug, Clone)]
pub struct SplineAnimation {
    spline: Spline,
    time: f32,
    distance: f32,
    speed: f32,
    mode: SplineAnimMode,
    interpolation: SplineInterpolation,
}

impl SplineAnimation {
    pub fn new(spline: Spline) -> Self {
        Self {
            spline,
            time: 0.0,
            distance: 0.0,
            speed: 1.0,
            mode: SplineAnimMode::Once,
            interpolation: SplineInterpolation::Time,
        }
    }

    pub fn spline(&self) -> &Spline {
        &self.spline
    }

    pub fn spline_mut(&mut self) -> &mut Spline {
        &mut self.spline
    }

    pub fn set_spline(&mut self, spline: Spline) {
        self.spline = spline;
    }

    /// Signed speed; ping-pong flips the sign at each end
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn mode(&self) -> SplineAnimMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: SplineAnimMode) {
        self.mode = mode;
    }

    pub fn interpolation(&self) -> SplineInterpolation {
        self.interpolation
    }

    pub fn set_interpolation(&mut self, interpolation: SplineInterpolation) {
        self.interpolation = interpolation;
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn set_time(&mut self, time: f32) {
        self.time = time;
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance;
    }

    /// Advances by `dt` seconds and moves `node` to the new path position
    pub fn update(&mut self, dt: f32, node: &mut TransformNode) -> Result<(), SplineError> {
        let position = match self.interpolation {
            SplineInterpolation::Time => {
                let end = self.spline.max_t();
                self.time = self.advance(self.time, dt, end);
                self.spline.position_by_t(self.time)?
            }
            SplineInterpolation::Distance => {
                let end = self.spline.total_length();
                self.distance = self.advance(self.distance, dt, end);
                self.spline.position_by_distance(self.distance)?
            }
        };

        node.set_pos(position);
        Ok(())
    }

    fn advance(&mut self, value: f32, dt: f32, end: f32) -> f32 {
        let value = value + dt * self.speed;

        if value > end {
            match self.mode {
                SplineAnimMode::Once => end,
                SplineAnimMode::Loop => 0.0,
                SplineAnimMode::PingPong => {
                    self.speed = -self.speed;
                    end
                }
            }
        } else if value < 0.0 {
            match self.mode {
                SplineAnimMode::Once => 0.0,
                SplineAnimMode::Loop => end,
                SplineAnimMode::PingPong => {
                    self.speed = -self.speed;
                    0.0
                }
            }
        } else {
            value
        }
    }
}
