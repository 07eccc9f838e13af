use std::f64::consts::{PI, TAU};

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Convert radians to degrees
#[inline]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Wrap an angle into (-pi, pi].
pub fn wrap_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let mut wrapped = angle % TAU;
    if wrapped > PI {
        wrapped -= TAU;
    } else if wrapped <= -PI {
        wrapped += TAU;
    }
    wrapped
}

/// Shortest signed angular error from `current` to `target`, in (-pi, pi].
#[inline]
pub fn heading_error(target: f64, current: f64) -> f64 {
    wrap_angle(target - current)
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(start: f64, end: f64, factor: f64) -> f64 {
    start + (end - start) * factor.clamp(0.0, 1.0)
}

/// Replace a non-finite delta with zero so a degenerate intermediate value
/// never reaches an integrated quantity or a reward term.
#[inline]
pub fn sanitize_delta(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        tracing::warn!(value = %value, "non-finite delta replaced with 0");
        0.0
    }
}

/// Clamp an absolute quantity into `[lo, hi]`, substituting `fallback`
/// when the value is NaN.
#[inline]
pub fn clamp_or(value: f64, lo: f64, hi: f64, fallback: f64) -> f64 {
    if value.is_nan() {
        tracing::warn!("NaN absolute value replaced with {fallback}");
        fallback
    } else {
        value.clamp(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn wrap_angle_stays_in_range() {
        for k in -8..=8 {
            let a = 0.3 + k as f64 * TAU;
            assert_relative_eq!(wrap_angle(a), 0.3, epsilon = 1e-9);
        }
        assert_relative_eq!(wrap_angle(PI), PI, epsilon = 1e-12);
        assert_relative_eq!(wrap_angle(-PI), PI, epsilon = 1e-12);
    }

    #[test]
    fn heading_error_takes_short_way_round() {
        // 350 deg -> 10 deg is +20 deg, not -340
        let err = heading_error(deg_to_rad(10.0), deg_to_rad(350.0));
        assert_relative_eq!(err, deg_to_rad(20.0), epsilon = 1e-9);

        let err = heading_error(deg_to_rad(350.0), deg_to_rad(10.0));
        assert_relative_eq!(err, deg_to_rad(-20.0), epsilon = 1e-9);
    }

    #[test]
    fn sanitize_delta_zeroes_non_finite() {
        assert_eq!(sanitize_delta(f64::NAN), 0.0);
        assert_eq!(sanitize_delta(f64::INFINITY), 0.0);
        assert_eq!(sanitize_delta(-2.5), -2.5);
    }

    #[test]
    fn clamp_or_recovers_nan() {
        assert_eq!(clamp_or(f64::NAN, 0.0, 10.0, 3.0), 3.0);
        assert_eq!(clamp_or(f64::INFINITY, 0.0, 10.0, 3.0), 10.0);
        assert_eq!(clamp_or(5.0, 0.0, 10.0, 3.0), 5.0);
    }
}
