//! Interpolation helpers:
//! - lerp_f32 / lerp_vec3 (component-wise linear)
//! - segment_factor (normalized position of a tick inside a keyframe segment)

use crate::pose::Vec3;

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    [
        lerp_f32(a[0], b[0], t),
        lerp_f32(a[1], b[1], t),
        lerp_f32(a[2], b[2], t),
    ]
}

/// Position of `tick` within `[start, end]`, clamped to [0, 1].
/// A zero-length segment reads as its end.
#[inline]
pub fn segment_factor(tick: u32, start: u32, end: u32) -> f32 {
    if end <= start {
        return 1.0;
    }
    let t = (tick as f32 - start as f32) / (end as f32 - start as f32);
    t.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints_and_midpoint() {
        assert_eq!(lerp_f32(2.0, 4.0, 0.0), 2.0);
        assert_eq!(lerp_f32(2.0, 4.0, 1.0), 4.0);
        assert_eq!(lerp_vec3([0.0, 10.0, -2.0], [10.0, 0.0, 2.0], 0.5), [5.0, 5.0, 0.0]);
    }

    #[test]
    fn segment_factor_clamps() {
        assert_eq!(segment_factor(5, 0, 10), 0.5);
        assert_eq!(segment_factor(0, 5, 10), 0.0);
        assert_eq!(segment_factor(20, 5, 10), 1.0);
        assert_eq!(segment_factor(5, 5, 5), 1.0);
    }
}
