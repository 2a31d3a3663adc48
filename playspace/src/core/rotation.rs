//! Yaw rotation math for the play-space frame
//!
//! All play-space rotation happens about the vertical (Y) axis. Offsets are
//! bookkept in the un-rotated frame and converted to world coordinates when
//! they are applied, so the conversions here are the only place sign
//! conventions live.

use glam::{DMat3, DVec3};

/// Rotate `v` about the vertical axis by `angle` radians.
///
/// `x' = x*cos - z*sin`, `z' = x*sin + z*cos`; Y passes through untouched.
/// A zero angle returns `v` bit-exactly, the common case while the play
/// space is unrotated.
pub fn rotate_yaw(v: DVec3, angle: f64) -> DVec3 {
    if angle == 0.0 {
        return v;
    }
    let (s, c) = angle.sin_cos();
    DVec3::new(v.x * c - v.z * s, v.y, v.x * s + v.z * c)
}

/// Matrix form of [`rotate_yaw`], for transforming pose bases.
pub fn yaw_matrix(angle: f64) -> DMat3 {
    DMat3::from_rotation_y(-angle)
}

/// Extract a device's yaw with the accumulated play-space rotation removed.
///
/// Pre-multiplying the reported basis by the inverse of the play-space
/// rotation yields a yaw that stays comparable across origin rotations. The
/// angle itself comes from the basis' Z column.
pub fn unrotated_yaw(basis: DMat3, rotation: f64) -> f64 {
    let unrotated = DMat3::from_rotation_y(rotation) * basis;
    unrotated.z_axis.x.atan2(unrotated.z_axis.z)
}

/// Fold a degree value back into [-180, 180].
///
/// Defined for inputs in (-540, 540), one full wrap in either direction.
pub fn wrap_degrees(deg: i32) -> i32 {
    if deg > 180 {
        deg - 360
    } else if deg < -180 {
        deg + 360
    } else {
        deg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_rotate_then_unrotate_returns_input() {
        for angle_deg in (-180..=180).step_by(15) {
            let angle = (angle_deg as f64).to_radians();
            for v in [
                DVec3::new(1.0, 2.0, 3.0),
                DVec3::new(-0.3, 1.7, 0.8),
                DVec3::X,
                DVec3::Z,
            ] {
                let back = rotate_yaw(rotate_yaw(v, angle), -angle);
                assert!(
                    (back - v).length() < EPSILON,
                    "angle {angle_deg}: {back} != {v}"
                );
            }
        }
    }

    #[test]
    fn test_zero_angle_is_exact_identity() {
        let v = DVec3::new(0.1, 0.2, 0.3);
        assert_eq!(rotate_yaw(v, 0.0), v);
    }

    #[test]
    fn test_quarter_turn_carries_x_to_z() {
        let rotated = rotate_yaw(DVec3::X, FRAC_PI_2);
        assert!((rotated - DVec3::Z).length() < EPSILON, "got {rotated}");
    }

    #[test]
    fn test_y_component_untouched() {
        let rotated = rotate_yaw(DVec3::new(1.0, 5.0, -2.0), 0.73);
        assert_eq!(rotated.y, 5.0);
    }

    #[test]
    fn test_yaw_matrix_matches_rotate_yaw() {
        let angle = 0.7;
        let v = DVec3::new(1.0, -2.0, 0.5);
        let via_matrix = yaw_matrix(angle) * v;
        let via_fn = rotate_yaw(v, angle);
        assert!((via_matrix - via_fn).length() < EPSILON);
    }

    #[test]
    fn test_unrotated_yaw_recovers_device_yaw() {
        let device_yaw = 0.5;
        let basis = DMat3::from_rotation_y(device_yaw);

        // No play-space rotation: yaw comes straight from the basis.
        assert!((unrotated_yaw(basis, 0.0) - device_yaw).abs() < EPSILON);

        // With the origin rotated, the reported basis picks up the rotation
        // and extraction must cancel it.
        let angle = 1.2;
        let reported = yaw_matrix(angle) * basis;
        assert!((unrotated_yaw(reported, angle) - device_yaw).abs() < EPSILON);
    }

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(0), 0);
        assert_eq!(wrap_degrees(180), 180);
        assert_eq!(wrap_degrees(-180), -180);
        assert_eq!(wrap_degrees(181), -179);
        assert_eq!(wrap_degrees(-181), 179);
        assert_eq!(wrap_degrees(359), -1);
        assert_eq!(wrap_degrees(-359), 1);
    }
}
