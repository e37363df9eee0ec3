use crate::geometry::{normalize_or_identity, project_on_axis, relative, rotation_from_basis, sign};
use crate::handedness::to_consumer_frame;
use crate::types::{Axis, PoseSet};
use glam::{Quat, Vec3};
use thiserror::Error;

/// Default axis projection tolerance.
pub const DEFAULT_TOLERANCE: f32 = 0.4;

/// Largest |dot| accepted between the projected X and Z axes.
pub const ORTHOGONALITY_EPSILON: f32 = 1e-5;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CalibrationFailure {
    #[error("{axis} axis is not close enough to any cardinal axis")]
    AxisProjection { axis: Axis },
    #[error("projected X and Z axes are not perpendicular (dot = {dot})")]
    Orthogonality { dot: f32 },
}

/// Everything derived from one calibration attempt.
///
/// All intermediate values are kept whether or not the attempt succeeded, so a
/// failed result can still be inspected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationResult {
    /// Raw poses in the sensor frame.
    pub raw: PoseSet,
    /// The same poses in the consumer frame.
    pub converted: PoseSet,

    pub x_axis: Vec3,
    pub y_axis: Vec3,
    pub z_axis: Vec3,

    pub projected_x: Vec3,
    pub projected_y: Vec3,
    pub projected_z: Vec3,

    pub x_projected: bool,
    pub z_projected: bool,
    /// Dot product of the projected X and Z axes.
    pub xz_dot: f32,
    pub orthogonal: bool,

    /// Rotation mapping the wand's calibrated frame onto the consumer frame.
    pub correction: Quat,
}

impl CalibrationResult {
    /// Result describing an uncalibrated wand held in the canonical neutral pose.
    pub fn neutral() -> Self {
        let raw = PoseSet::new(
            Quat::IDENTITY,
            Quat::from_xyzw(1.0, 0.0, 0.0, 1.0).normalize(),
            Quat::from_xyzw(0.0, 0.0, 1.0, 1.0).normalize(),
        );
        Self {
            raw,
            converted: raw.map(to_consumer_frame),
            x_axis: Vec3::X,
            y_axis: Vec3::Y,
            z_axis: Vec3::Z,
            projected_x: Vec3::X,
            projected_y: Vec3::Y,
            projected_z: Vec3::Z,
            x_projected: true,
            z_projected: true,
            xz_dot: 0.0,
            orthogonal: true,
            correction: Quat::IDENTITY,
        }
    }

    pub fn success(&self) -> bool {
        self.x_projected && self.z_projected && self.orthogonal
    }

    /// First reason this result is unusable, if any.
    pub fn check(&self) -> Result<(), CalibrationFailure> {
        if !self.x_projected {
            return Err(CalibrationFailure::AxisProjection { axis: Axis::X });
        }
        if !self.z_projected {
            return Err(CalibrationFailure::AxisProjection { axis: Axis::Z });
        }
        if !self.orthogonal {
            return Err(CalibrationFailure::Orthogonality { dot: self.xz_dot });
        }
        Ok(())
    }
}

/// Derive the correction rotation from the three raw poses.
///
/// The forward tilt rotates about the wand's X axis and the right tilt about
/// its negative Z axis, both expressed relative to the reference pose. Each
/// axis is snapped to the nearest cardinal axis under `tolerance`, Y is
/// completed with a cross product, and the resulting basis becomes the
/// correction. Failure is reported through the flags on the result.
pub fn solve(raw: &PoseSet, tolerance: f32) -> CalibrationResult {
    let converted = raw.map(to_consumer_frame);

    let to_forward = normalize_or_identity(relative(converted.reference, converted.forward));
    let to_right = normalize_or_identity(relative(converted.reference, converted.right));

    let x_axis = to_forward.xyz().normalize_or_zero() * sign(to_forward.w);
    let x_projection = project_on_axis(x_axis, tolerance);
    let projected_x = x_projection.vector.normalize_or_zero();

    let z_axis = -to_right.xyz().normalize_or_zero() * sign(to_right.w);
    let z_projection = project_on_axis(z_axis, tolerance);
    let projected_z = z_projection.vector.normalize_or_zero();

    let xz_dot = projected_x.dot(projected_z);
    let orthogonal = xz_dot.abs() < ORTHOGONALITY_EPSILON;

    let y_axis = z_axis.cross(x_axis).normalize_or_zero();
    let projected_y = projected_z.cross(projected_x).normalize_or_zero();

    let correction = rotation_from_basis(projected_x, projected_y, projected_z);

    tracing::debug!(
        ?x_axis,
        ?z_axis,
        x_snapped = ?x_projection.axis,
        z_snapped = ?z_projection.axis,
        xz_dot,
        "Calibration axes derived"
    );

    CalibrationResult {
        raw: *raw,
        converted,
        x_axis,
        y_axis,
        z_axis,
        projected_x,
        projected_y,
        projected_z,
        x_projected: x_projection.projected(),
        z_projected: z_projection.projected(),
        xz_dot,
        orthogonal,
        correction,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use glam::EulerRot;
    use std::f32::consts::FRAC_PI_2;

    /// Raw sensor reading for a pose that differs from `reference` by
    /// `delta`, where `delta` is expressed in the consumer frame.
    pub(crate) fn raw_pose(reference: Quat, delta: Quat) -> Quat {
        to_consumer_frame(to_consumer_frame(reference) * delta)
    }

    /// Raw readings for a wand whose relative tilts are `forward` and `right`.
    pub(crate) fn rig(reference: Quat, forward: Quat, right: Quat) -> PoseSet {
        PoseSet::new(
            reference,
            raw_pose(reference, forward),
            raw_pose(reference, right),
        )
    }

    /// Ideal rig: 45 degrees about +X forward, 45 degrees about -Z right.
    pub(crate) fn ideal_rig(reference: Quat) -> PoseSet {
        let tilt = 45f32.to_radians();
        rig(
            reference,
            Quat::from_rotation_x(tilt),
            Quat::from_rotation_z(-tilt),
        )
    }

    fn same_rotation(a: Quat, b: Quat) -> bool {
        (a.dot(b).abs() - 1.0).abs() < 1e-5
    }

    #[test]
    fn ideal_rig_yields_identity() {
        let result = solve(&ideal_rig(Quat::IDENTITY), DEFAULT_TOLERANCE);
        assert!(result.success());
        assert!(result.check().is_ok());
        assert!(result.correction.abs_diff_eq(Quat::IDENTITY, 1e-6));
        assert!(result.projected_x.abs_diff_eq(Vec3::X, 1e-6));
        assert!(result.projected_y.abs_diff_eq(Vec3::Y, 1e-6));
        assert!(result.projected_z.abs_diff_eq(Vec3::Z, 1e-6));
    }

    #[test]
    fn reference_heading_does_not_matter() {
        let reference = Quat::from_euler(EulerRot::YXZ, 1.3, 0.2, -0.4);
        let result = solve(&ideal_rig(reference), DEFAULT_TOLERANCE);
        assert!(result.success());
        assert!(same_rotation(result.correction, Quat::IDENTITY));
    }

    #[test]
    fn converted_poses_are_kept() {
        let raw = ideal_rig(Quat::from_rotation_y(0.5));
        let result = solve(&raw, DEFAULT_TOLERANCE);
        assert_eq!(result.raw, raw);
        assert_eq!(result.converted.forward, to_consumer_frame(raw.forward));
    }

    #[test]
    fn small_tilt_errors_still_snap() {
        let forward = Quat::from_axis_angle(Vec3::new(1.0, 0.15, -0.1).normalize(), 0.7);
        let right = Quat::from_axis_angle(Vec3::new(0.1, 0.05, -1.0).normalize(), 0.8);
        let result = solve(&rig(Quat::IDENTITY, forward, right), DEFAULT_TOLERANCE);
        assert!(result.success());
        assert!(result.correction.abs_diff_eq(Quat::IDENTITY, 1e-6));
        // Raw axes keep the measured error.
        assert!(!result.x_axis.abs_diff_eq(Vec3::X, 1e-3));
    }

    #[test]
    fn rotated_mount_is_recovered() {
        // Sensor turned a quarter turn about Y inside the wand: the physical
        // forward tilt shows up about the sensor's Z axis.
        let tilt = 45f32.to_radians();
        let result = solve(
            &rig(
                Quat::IDENTITY,
                Quat::from_rotation_z(tilt),
                Quat::from_rotation_x(tilt),
            ),
            DEFAULT_TOLERANCE,
        );
        assert!(result.success());
        assert!(result.projected_x.abs_diff_eq(Vec3::Z, 1e-6));
        assert!(result.projected_z.abs_diff_eq(Vec3::NEG_X, 1e-6));
        assert!((result.correction * result.projected_x).abs_diff_eq(Vec3::X, 1e-5));
        assert!((result.correction * result.projected_z).abs_diff_eq(Vec3::Z, 1e-5));
        assert!(same_rotation(result.correction, Quat::from_rotation_y(FRAC_PI_2)));
    }

    #[test]
    fn ambiguous_forward_axis_fails() {
        let angle = 50f32.to_radians();
        let axis = Vec3::new(angle.cos(), angle.sin(), 0.0);
        let forward = Quat::from_axis_angle(axis, 45f32.to_radians());
        let right = Quat::from_rotation_z(-45f32.to_radians());
        let result = solve(&rig(Quat::IDENTITY, forward, right), DEFAULT_TOLERANCE);

        assert!(!result.x_projected);
        assert!(result.z_projected);
        assert!(!result.success());
        assert_eq!(
            result.check(),
            Err(CalibrationFailure::AxisProjection { axis: Axis::X })
        );
        // Diagnostics are still filled in.
        assert!(result.x_axis.abs_diff_eq(axis, 1e-5));
    }

    #[test]
    fn parallel_axes_fail_orthogonality() {
        // Both tilts about the same physical axis.
        let tilt = 45f32.to_radians();
        let result = solve(
            &rig(
                Quat::IDENTITY,
                Quat::from_rotation_x(tilt),
                Quat::from_rotation_x(-tilt),
            ),
            DEFAULT_TOLERANCE,
        );
        assert!(result.x_projected);
        assert!(result.z_projected);
        assert!(!result.orthogonal);
        assert!(!result.success());
        assert!(matches!(
            result.check(),
            Err(CalibrationFailure::Orthogonality { .. })
        ));
    }

    #[test]
    fn no_movement_fails() {
        let raw = PoseSet::new(Quat::IDENTITY, Quat::IDENTITY, Quat::IDENTITY);
        let result = solve(&raw, DEFAULT_TOLERANCE);
        assert!(!result.success());
        assert_eq!(result.x_axis, Vec3::ZERO);
        assert!(result.correction.is_finite());
    }

    #[test]
    fn solve_is_deterministic() {
        let raw = ideal_rig(Quat::from_euler(EulerRot::YXZ, 0.3, 0.1, 0.7));
        let a = solve(&raw, DEFAULT_TOLERANCE);
        let b = solve(&raw, DEFAULT_TOLERANCE);
        assert_eq!(a, b);
    }

    #[test]
    fn neutral_result_is_successful() {
        let neutral = CalibrationResult::neutral();
        assert!(neutral.success());
        assert_eq!(neutral.correction, Quat::IDENTITY);
        assert_eq!(neutral.converted.reference, Quat::from_xyzw(0.0, 0.0, 0.0, -1.0));
    }
}
