//! Conversion between the sensor's right-handed frame and the consumer's
//! left-handed frame.
//!
//! The frames differ by a mirror of the Z axis. Mirroring a rotation negates
//! its Z component, and the scalar part is negated as well so that the result
//! stays in the same hemisphere convention the consumer expects. Both flips
//! together make the conversion its own inverse.

use glam::Quat;

/// Re-express a sensor attitude in the consumer's frame.
pub fn to_consumer_frame(q: Quat) -> Quat {
    Quat::from_xyzw(q.x, q.y, -q.z, -q.w)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_maps_to_negated_identity() {
        let q = to_consumer_frame(Quat::IDENTITY);
        assert_eq!(q, Quat::from_xyzw(0.0, 0.0, 0.0, -1.0));
    }

    #[test]
    fn conversion_is_an_involution() {
        let samples = [
            Quat::IDENTITY,
            Quat::from_rotation_x(0.7),
            Quat::from_rotation_z(-1.2),
            Quat::from_euler(glam::EulerRot::YXZ, 0.3, -0.9, 2.1),
        ];
        for q in samples {
            let back = to_consumer_frame(to_consumer_frame(q));
            assert!(back.abs_diff_eq(q, 1e-6), "{back:?} != {q:?}");
        }
    }

    #[test]
    fn x_and_y_components_are_kept() {
        let q = Quat::from_xyzw(0.1, 0.2, 0.3, 0.927_361_8);
        let m = to_consumer_frame(q);
        assert_eq!(m.x, q.x);
        assert_eq!(m.y, q.y);
        assert_eq!(m.z, -q.z);
        assert_eq!(m.w, -q.w);
    }
}
