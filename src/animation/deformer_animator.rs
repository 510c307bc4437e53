//! Keyframe animation of deformer parameters.

use crate::deform::{find_property, Deformer, DeformerRef};
use crate::error::DeformError;

/// Snapshot of a deformer's parameters at a point in time
#[derive(Debug, Clone)]
pub struct DeformerKeyframe {
    pub time: f32,
    pub deformer: Box<dyn Deformer>,
}

/// Interpolates keyframed parameters into a shared target deformer
///
/// Keyframes are deep copies taken with [`Deformer::clone_box`] and kept
/// sorted by time. [`update`](Self::update) finds the keyframes around the
/// current time, blends every property they both export with
/// [`PropertyValue::lerp`](crate::deform::PropertyValue::lerp), and writes the
/// result into the target through `set_property`.
#[derive(Debug)]
pub struct DeformerAnimator {
    keyframes: Vec<DeformerKeyframe>,
    target: DeformerRef,
    current_time: f32,
    looping: bool,
}

impl DeformerAnimator {
    pub fn new(target: DeformerRef) -> Self {
        Self {
            keyframes: Vec::new(),
            target,
            current_time: 0.0,
            looping: false,
        }
    }

    pub fn target(&self) -> &DeformerRef {
        &self.target
    }

    /// Stores a copy of `deformer` as the keyframe at `time`
    ///
    /// Keyframes sharing a time keep insertion order.
    pub fn add_keyframe(&mut self, time: f32, deformer: &dyn Deformer) {
        let index = self.keyframes.partition_point(|key| key.time <= time);
        self.keyframes.insert(
            index,
            DeformerKeyframe {
                time,
                deformer: deformer.clone_box(),
            },
        );
    }

    pub fn remove_keyframe(&mut self, index: usize) -> Result<DeformerKeyframe, DeformError> {
        if index >= self.keyframes.len() {
            return Err(DeformError::IndexOutOfRange {
                index,
                len: self.keyframes.len(),
            });
        }
        Ok(self.keyframes.remove(index))
    }

    pub fn keyframes(&self) -> &[DeformerKeyframe] {
        &self.keyframes
    }

    pub fn keyframe_count(&self) -> usize {
        self.keyframes.len()
    }

    pub fn clear(&mut self) {
        self.keyframes.clear();
    }

    pub fn set_time(&mut self, time: f32) {
        self.current_time = time;
    }

    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn looping(&self) -> bool {
        self.looping
    }

    /// Time of the last keyframe
    pub fn duration(&self) -> f32 {
        self.keyframes.last().map(|key| key.time).unwrap_or(0.0)
    }

    /// Moves time forward by `dt` and updates the target
    pub fn advance(&mut self, dt: f32) {
        self.current_time += dt;
        self.update();
    }

    /// Writes the interpolated keyframe parameters into the target
    pub fn update(&mut self) {
        let (Some(first), Some(last)) = (self.keyframes.first(), self.keyframes.last()) else {
            return;
        };

        let mut time = self.current_time;
        let duration = last.time;
        if self.looping && duration > 0.0 {
            time = time.rem_euclid(duration);
        }

        let (from, to, t) = if time <= first.time {
            (first, first, 0.0)
        } else if time >= last.time {
            (last, last, 0.0)
        } else {
            let next = self.keyframes.partition_point(|key| key.time <= time);
            let (a, b) = (&self.keyframes[next - 1], &self.keyframes[next]);
            let span = b.time - a.time;
            let t = if span > 0.0 { (time - a.time) / span } else { 0.0 };
            (a, b, t)
        };

        let Ok(mut target) = self.target.try_borrow_mut() else {
            log::warn!("deformer animator target is borrowed, skipping update at t={time}");
            return;
        };

        let to_properties = to.deformer.properties();
        for property in from.deformer.properties() {
            let value = match find_property(&to_properties, property.name) {
                Some(other) => property.value.lerp(&other.value, t),
                None => property.value,
            };
            if let Err(err) = target.set_property(property.name, value) {
                log::warn!("deformer animator could not write property: {err}");
            }
        }
    }
}
