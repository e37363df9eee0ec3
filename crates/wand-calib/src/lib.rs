//! Wand orientation calibration.
//!
//! Three raw sensor attitudes, sampled with the wand level, tilted forward and
//! tilted right, are turned into a correction rotation that maps the sensor's
//! frame onto the consumer's world frame. [`CalibrationSession`] drives the
//! sampling, [`solve`] derives the correction and [`WandTracker`] applies it to
//! every later reading.

pub mod calibration;
pub mod data;
pub mod geometry;
pub mod handedness;
pub mod session;
pub mod source;
pub mod types;

pub use calibration::{solve, CalibrationFailure, CalibrationResult, DEFAULT_TOLERANCE};
pub use data::{CalibrationData, WandTracker};
pub use handedness::to_consumer_frame;
pub use session::{CalibrationSession, Rewind, StepOutcome};
pub use source::{AttitudeSource, FixedAttitude, ScriptedAttitude};
pub use types::{Axis, Pose, PoseSet};
