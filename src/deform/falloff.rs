//! # Distance Falloff
//!
//! Shared weighting curve for deformers that attenuate with distance from a
//! reference (an axis or a center point).
//!
//! The curve is full strength below `start`, zero above `end`, and eases out
//! in between with an inverted smoothstep raised to the falloff exponent:
//!
//! ```text
//! t = (d - start) / (end - start)
//! w = (1 - (3t² - 2t³)) ^ falloff
//! ```
//!
//! It is continuous, monotonically non-increasing in `d`, and bounded in
//! `[0, 1]` for any non-negative exponent.

/// Weight for `distance` within the `[start, end]` band
///
/// A degenerate band (`end <= start`) becomes a hard step at `start`.
pub fn calculate_weight(distance: f32, start: f32, end: f32, falloff: f32) -> f32 {
    if distance < start {
        return 1.0;
    }
    if distance > end || end <= start {
        return 0.0;
    }

    let t = ((distance - start) / (end - start)).clamp(0.0, 1.0);
    (1.0 - smoothstep(t)).max(0.0).powf(falloff)
}

/// Hermite smoothstep on `[0, 1]`
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Distance band and exponent used by axis-based deformers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FalloffRange {
    pub start: f32,
    pub end: f32,
    pub exponent: f32,
}

impl FalloffRange {
    pub fn new(start: f32, end: f32, exponent: f32) -> Self {
        Self { start, end, exponent }
    }

    pub fn weight(&self, distance: f32) -> f32 {
        calculate_weight(distance, self.start, self.end, self.exponent)
    }
}

impl Default for FalloffRange {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 10.0,
            exponent: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_outside_band() {
        assert_eq!(calculate_weight(0.5, 1.0, 5.0, 1.0), 1.0);
        assert_eq!(calculate_weight(6.0, 1.0, 5.0, 1.0), 0.0);
    }

    #[test]
    fn test_weight_is_continuous_at_edges() {
        assert!((calculate_weight(1.0, 1.0, 5.0, 2.0) - 1.0).abs() < 1e-6);
        assert!(calculate_weight(5.0, 1.0, 5.0, 2.0).abs() < 1e-6);
        assert!((calculate_weight(3.0, 1.0, 5.0, 1.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_weight_is_monotonic_and_bounded() {
        let mut previous = 1.0;
        for step in 0..=100 {
            let distance = step as f32 * 0.12;
            let weight = calculate_weight(distance, 2.0, 10.0, 1.5);
            assert!((0.0..=1.0).contains(&weight));
            assert!(weight <= previous + 1e-6);
            previous = weight;
        }
    }

    #[test]
    fn test_degenerate_band_is_a_step() {
        assert_eq!(calculate_weight(1.9, 2.0, 2.0, 1.0), 1.0);
        assert_eq!(calculate_weight(2.0, 2.0, 2.0, 1.0), 0.0);
        assert_eq!(calculate_weight(3.0, 2.0, 1.0, 1.0), 0.0);
    }

    #[test]
    fn test_range_defaults() {
        let range = FalloffRange::default();
        assert_eq!(range.weight(0.0), 1.0);
        assert_eq!(range.weight(11.0), 0.0);
    }
}
