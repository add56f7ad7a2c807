//! Small numeric helpers sketches reach for every frame.

use crate::float::Float;

/// Re-map `value` from `[in_min, in_max]` to `[out_min, out_max]` without clamping.
pub fn map_range<F: Float>(value: F, in_min: F, in_max: F, out_min: F, out_max: F) -> F {
    let span = in_max - in_min;
    if span.is_near_zero(F::from_f32(1e-12)) {
        return out_min;
    }
    out_min + (value - in_min) * (out_max - out_min) / span
}

/// Euclidean distance between two points.
pub fn dist<F: Float>(x1: F, y1: F, x2: F, y2: F) -> F {
    let dx = x2 - x1;
    let dy = y2 - y1;
    (dx * dx + dy * dy).sqrt()
}

/// Shortest signed difference `b - a` in degrees, in `[-180, 180)`.
pub fn delta_angle_deg<F: Float>(a: F, b: F) -> F {
    let full = F::from_f32(360.0);
    let half = F::from_f32(180.0);
    (b - a + half).rem_euclid(full) - half
}

pub fn lerp<F: Float>(a: F, b: F, t: F) -> F {
    a.lerp(b, t)
}

pub fn deg_to_rad<F: Float>(deg: F) -> F {
    deg * F::pi() / F::from_f32(180.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_range_scales_linearly() {
        assert_eq!(map_range(540.0f32, 0.0, 1080.0, 0.0, 360.0), 180.0);
        assert_eq!(map_range(5.0f64, 5.0, 5.0, 1.0, 2.0), 1.0);
    }

    #[test]
    fn delta_angle_takes_short_way() {
        assert!((delta_angle_deg(350.0f32, 10.0) - 20.0).abs() < 1e-4);
        assert!((delta_angle_deg(10.0f32, 350.0) + 20.0).abs() < 1e-4);
        assert!((delta_angle_deg(0.0f64, 180.0) + 180.0).abs() < 1e-9);
    }

    #[test]
    fn degrees_convert_to_radians() {
        assert!((deg_to_rad(180.0f64) - core::f64::consts::PI).abs() < 1e-12);
        assert!((deg_to_rad(90.0f32) - core::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn dist_is_euclidean() {
        assert!((dist(0.0f32, 0.0, 3.0, 4.0) - 5.0).abs() < 1e-6);
    }
}
