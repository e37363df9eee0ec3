//! Quaternion and basis helpers used by the calibration solver.

use crate::types::Axis;
use glam::{Mat3, Quat, Vec3};

/// Rotation that takes `from` to `to` when applied after `from`:
/// `from * relative(from, to) == to`.
pub fn relative(from: Quat, to: Quat) -> Quat {
    from.inverse() * to
}

/// Normalize, falling back to identity when the quaternion has no usable length.
pub fn normalize_or_identity(q: Quat) -> Quat {
    let len = q.length();
    if len.is_finite() && len > f32::EPSILON {
        q / len
    } else {
        Quat::IDENTITY
    }
}

/// Sign of a scalar component, counting zero as positive.
pub fn sign(value: f32) -> f32 {
    if value >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Outcome of snapping a direction onto a cardinal axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// The snapped vector, or the input unchanged when no axis matched.
    pub vector: Vec3,
    /// Axis the vector was snapped to.
    pub axis: Option<Axis>,
}

impl Projection {
    pub fn projected(&self) -> bool {
        self.axis.is_some()
    }
}

/// Snap `v` onto the cardinal axis it lies close to.
///
/// Axis `a` is accepted when `a² * tolerance` exceeds the squared length of
/// the other two components. Axes are tried in X, Y, Z order and the first
/// match wins. The kept component retains its sign and magnitude; the result
/// is not normalized.
pub fn project_on_axis(v: Vec3, tolerance: f32) -> Projection {
    let (x2, y2, z2) = (v.x * v.x, v.y * v.y, v.z * v.z);

    if x2 * tolerance > y2 + z2 {
        return Projection {
            vector: Vec3::new(v.x, 0.0, 0.0),
            axis: Some(Axis::X),
        };
    }
    if y2 * tolerance > x2 + z2 {
        return Projection {
            vector: Vec3::new(0.0, v.y, 0.0),
            axis: Some(Axis::Y),
        };
    }
    if z2 * tolerance > x2 + y2 {
        return Projection {
            vector: Vec3::new(0.0, 0.0, v.z),
            axis: Some(Axis::Z),
        };
    }

    Projection {
        vector: v,
        axis: None,
    }
}

/// Rotation whose matrix has `x`, `y` and `z` as its rows.
///
/// The axes are expected to form an orthonormal basis; this is not checked.
pub fn rotation_from_basis(x: Vec3, y: Vec3, z: Vec3) -> Quat {
    let rows = Mat3::from_cols(x, y, z).transpose();
    normalize_or_identity(Quat::from_mat3(&rows))
}
