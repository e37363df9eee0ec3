use glam::{EulerRot, Quat};
use wand_calib::{to_consumer_frame, Pose, ScriptedAttitude};
use wand_config::RigConfig;

/// A wand with its sensor mounted at a fixed offset, held by a user facing a
/// fixed heading. Stands in for real hardware when none is attached.
pub struct SimulatedWand {
    mount: Quat,
    heading: Quat,
    tilt: f32,
}

impl SimulatedWand {
    pub fn from_config(rig: &RigConfig) -> Self {
        let m = rig.mount_deg;
        Self {
            mount: Quat::from_euler(
                EulerRot::YXZ,
                m.x.to_radians(),
                m.y.to_radians(),
                m.z.to_radians(),
            ),
            heading: Quat::from_rotation_y(rig.heading_deg.to_radians()),
            tilt: rig.tilt_deg.to_radians(),
        }
    }

    /// World orientation of the wand, relative to the user's heading, for a
    /// calibration pose.
    pub fn pose(&self, pose: Pose) -> Quat {
        match pose {
            Pose::Reference => Quat::IDENTITY,
            Pose::Forward => Quat::from_rotation_x(self.tilt),
            Pose::Right => Quat::from_rotation_z(-self.tilt),
        }
    }

    /// Raw sensor attitude while the wand is held at `world`.
    pub fn reading(&self, world: Quat) -> Quat {
        to_consumer_frame(self.heading * world * self.mount)
    }

    /// Source that yields the three calibration readings in order.
    pub fn calibration_source(&self) -> ScriptedAttitude {
        ScriptedAttitude::new(Pose::ALL.map(|pose| self.reading(self.pose(pose))))
    }
}
