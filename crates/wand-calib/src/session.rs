use crate::calibration::{solve, CalibrationResult, DEFAULT_TOLERANCE};
use crate::source::AttitudeSource;
use crate::types::{Pose, PoseSet, POSE_COUNT};
use glam::Quat;

/// Outcome of [`CalibrationSession::next_step`].
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// No session is running; nothing was read.
    Ignored,
    /// A pose was recorded; `next` is the step now awaiting a reading.
    Recorded { pose: Pose, next: usize },
    /// All poses were recorded and the calibration succeeded.
    Finished(CalibrationResult),
    /// All poses were recorded but no usable calibration came out of them.
    BadCalibration,
}

impl StepOutcome {
    /// Whether this step ended the session.
    pub fn completed(&self) -> bool {
        matches!(self, StepOutcome::Finished(_) | StepOutcome::BadCalibration)
    }
}

/// Outcome of [`CalibrationSession::previous_step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rewind {
    /// Moved back to the given step; the session goes on.
    Continues(usize),
    /// Stepped back past the first pose; the session is over.
    Ended,
}

enum SessionState<S> {
    Idle,
    Recording {
        source: S,
        step: usize,
        frames: [Quat; POSE_COUNT],
    },
}

/// Drives the three-pose sampling sequence.
///
/// The attitude source is held only while recording and dropped when the
/// session ends for any reason.
pub struct CalibrationSession<S> {
    /// Axis projection tolerance used when the session finishes.
    pub tolerance: f32,
    state: SessionState<S>,
}

impl<S: AttitudeSource> CalibrationSession<S> {
    pub fn new(tolerance: f32) -> Self {
        Self {
            tolerance,
            state: SessionState::Idle,
        }
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.state, SessionState::Recording { .. })
    }

    /// Step awaiting a reading; zero when idle.
    pub fn step(&self) -> usize {
        match &self.state {
            SessionState::Idle => 0,
            SessionState::Recording { step, .. } => *step,
        }
    }

    /// Begin a fresh attempt. Ignored (and `source` dropped) while already recording.
    pub fn start(&mut self, source: S) -> bool {
        if self.is_recording() {
            tracing::debug!("Calibration already running, start ignored");
            return false;
        }
        self.state = SessionState::Recording {
            source,
            step: 0,
            frames: [Quat::IDENTITY; POSE_COUNT],
        };
        tracing::info!(tolerance = self.tolerance, "Calibration started");
        true
    }

    /// Abandon the attempt, discarding any recorded poses.
    pub fn stop(&mut self) {
        if self.is_recording() {
            tracing::info!(step = self.step(), "Calibration stopped");
        }
        self.state = SessionState::Idle;
    }

    /// Read the current attitude into the current step and advance. After the
    /// last pose the calibration is solved and the session returns to idle.
    pub fn next_step(&mut self) -> StepOutcome {
        let SessionState::Recording {
            source,
            step,
            frames,
        } = &mut self.state
        else {
            return StepOutcome::Ignored;
        };

        let pose = Pose::ALL[*step];
        frames[*step] = source.attitude();
        *step += 1;
        tracing::debug!(?pose, attitude = ?frames[*step - 1], "Pose recorded");

        if *step < POSE_COUNT {
            return StepOutcome::Recorded { pose, next: *step };
        }

        let poses = PoseSet::from(*frames);
        self.state = SessionState::Idle;
        self.finish(&poses)
    }

    /// Go back one step. Stepping back from the first pose ends the session.
    pub fn previous_step(&mut self) -> Rewind {
        let SessionState::Recording { step, .. } = &mut self.state else {
            return Rewind::Ended;
        };

        if *step == 0 {
            self.stop();
            return Rewind::Ended;
        }
        *step -= 1;
        tracing::debug!(step = *step, "Calibration stepped back");
        Rewind::Continues(*step)
    }

    fn finish(&self, poses: &PoseSet) -> StepOutcome {
        let result = solve(poses, self.tolerance);
        match result.check() {
            Ok(()) => {
                tracing::info!(correction = ?result.correction, "Calibration finished");
                StepOutcome::Finished(result)
            }
            Err(e) => {
                tracing::warn!(%e, "Bad calibration");
                StepOutcome::BadCalibration
            }
        }
    }
}

impl<S: AttitudeSource> Default for CalibrationSession<S> {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}
