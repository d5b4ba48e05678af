//! Guarded 2D vector helpers.
//!
//! All steering math funnels through these helpers so that zero-length and
//! non-finite vectors degrade to zero instead of producing NaN.

use glam::Vec2;

/// Lengths below this are treated as zero.
pub const LENGTH_EPSILON: f32 = 1.0e-5;

/// Returns the unit vector of `v`, or zero if `v` is degenerate.
#[must_use]
pub fn safe_direction(v: Vec2) -> Vec2 {
    if !v.is_finite() {
        return Vec2::ZERO;
    }
    let len = v.length();
    if len < LENGTH_EPSILON {
        Vec2::ZERO
    } else {
        v / len
    }
}

/// Distance between two points, or `None` if either is non-finite.
#[must_use]
pub fn finite_distance(a: Vec2, b: Vec2) -> Option<f32> {
    let d = a.distance(b);
    d.is_finite().then_some(d)
}

/// Counter-clockwise perpendicular of a direction.
#[must_use]
pub fn perpendicular(direction: Vec2) -> Vec2 {
    Vec2::new(-direction.y, direction.x)
}

/// Clamps the length of `v` to `max_len`.
#[must_use]
pub fn clamp_length(v: Vec2, max_len: f32) -> Vec2 {
    if max_len <= 0.0 {
        return Vec2::ZERO;
    }
    let len = v.length();
    if len > max_len {
        v * (max_len / len)
    } else {
        v
    }
}

/// Smallest absolute difference between two angles, in `[0, PI]`.
#[must_use]
pub fn angle_between(a: f32, b: f32) -> f32 {
    let diff = (a - b).rem_euclid(std::f32::consts::TAU);
    if diff > std::f32::consts::PI {
        std::f32::consts::TAU - diff
    } else {
        diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_safe_direction_unit() {
        let d = safe_direction(Vec2::new(3.0, 4.0));
        assert!((d.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_safe_direction_nan() {
        assert_eq!(safe_direction(Vec2::new(f32::NAN, 1.0)), Vec2::ZERO);
    }

    #[test]
    fn test_perpendicular() {
        let p = perpendicular(Vec2::X);
        assert_eq!(p, Vec2::Y);
        assert!(p.dot(Vec2::X).abs() < 1e-6);
    }

    #[test]
    fn test_clamp_length() {
        let v = clamp_length(Vec2::new(10.0, 0.0), 2.0);
        assert!((v.length() - 2.0).abs() < 1e-6);
        assert_eq!(clamp_length(Vec2::new(1.0, 0.0), 2.0), Vec2::new(1.0, 0.0));
        assert_eq!(clamp_length(Vec2::new(1.0, 0.0), 0.0), Vec2::ZERO);
    }

    #[test]
    fn test_angle_between_wraps() {
        let a = angle_between(0.1, std::f32::consts::TAU - 0.1);
        assert!((a - 0.2).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_safe_direction_is_unit_or_zero(x in -1.0e4f32..1.0e4, y in -1.0e4f32..1.0e4) {
            let len = safe_direction(Vec2::new(x, y)).length();
            prop_assert!(len == 0.0 || (len - 1.0).abs() < 1e-4);
        }

        #[test]
        fn prop_angle_between_in_range(a in -20.0f32..20.0, b in -20.0f32..20.0) {
            let d = angle_between(a, b);
            prop_assert!((0.0..=std::f32::consts::PI + 1e-4).contains(&d));
        }
    }
}
