use glam::Quat;

/// Number of poses recorded by one calibration session.
pub const POSE_COUNT: usize = 3;

/// The prescribed poses, in the order they are sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pose {
    /// Wand held level and pointing at the target: the reference attitude.
    Reference,
    /// Wand tilted forward by roughly 45 degrees.
    Forward,
    /// Wand tilted to the right by roughly 45 degrees.
    Right,
}

impl Pose {
    pub const ALL: [Pose; POSE_COUNT] = [Pose::Reference, Pose::Forward, Pose::Right];
}

/// Raw sensor attitudes for the three poses, in the sensor's native frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseSet {
    pub reference: Quat,
    pub forward: Quat,
    pub right: Quat,
}

impl PoseSet {
    pub fn new(reference: Quat, forward: Quat, right: Quat) -> Self {
        Self {
            reference,
            forward,
            right,
        }
    }

    /// Apply `f` to each pose.
    pub fn map(&self, f: impl Fn(Quat) -> Quat) -> Self {
        Self {
            reference: f(self.reference),
            forward: f(self.forward),
            right: f(self.right),
        }
    }
}

impl From<[Quat; POSE_COUNT]> for PoseSet {
    fn from(frames: [Quat; POSE_COUNT]) -> Self {
        let [reference, forward, right] = frames;
        Self::new(reference, forward, right)
    }
}

/// A cardinal axis of the consumer frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        };
        f.write_str(name)
    }
}
