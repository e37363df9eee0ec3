use crate::calibration::{CalibrationFailure, CalibrationResult};
use crate::handedness::to_consumer_frame;
use glam::Quat;

/// Installed calibration: the correction and the reference pose it was
/// measured against, plus the values derived from them.
///
/// Fields are private so that the derived values can only change together
/// with their inputs, through [`CalibrationData::set`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationData {
    correction: Quat,
    correction_inverse: Quat,
    /// Reference pose in the consumer frame.
    reference: Quat,
    /// `correction * reference⁻¹`.
    reference_corrected: Quat,
}

impl CalibrationData {
    pub fn new(correction: Quat, reference: Quat) -> Self {
        Self {
            correction,
            correction_inverse: correction.inverse(),
            reference,
            reference_corrected: correction * reference.inverse(),
        }
    }

    /// Replace the correction and reference pose, recomputing every derived value.
    pub fn set(&mut self, correction: Quat, reference: Quat) {
        *self = Self::new(correction, reference);
    }

    pub fn set_correction(&mut self, correction: Quat) {
        self.set(correction, self.reference);
    }

    pub fn set_reference(&mut self, reference: Quat) {
        self.set(self.correction, reference);
    }

    pub fn correction(&self) -> Quat {
        self.correction
    }

    pub fn reference(&self) -> Quat {
        self.reference
    }

    /// Re-express a live consumer-frame attitude relative to the calibrated frame.
    pub fn apply(&self, attitude: Quat) -> Quat {
        self.reference_corrected * attitude * self.correction_inverse
    }
}

impl Default for CalibrationData {
    /// Identity correction against the canonical neutral pose.
    fn default() -> Self {
        Self::new(Quat::IDENTITY, to_consumer_frame(Quat::IDENTITY))
    }
}

impl TryFrom<&CalibrationResult> for CalibrationData {
    type Error = CalibrationFailure;

    fn try_from(result: &CalibrationResult) -> Result<Self, Self::Error> {
        result.check()?;
        Ok(Self::new(result.correction, result.converted.reference))
    }
}

/// Per-frame consumer of calibration data: turns raw sensor attitudes into
/// calibrated orientations.
#[derive(Debug, Clone, Default)]
pub struct WandTracker {
    data: CalibrationData,
}

impl WandTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> &CalibrationData {
        &self.data
    }

    /// Install the result of a successful calibration, replacing the previous one.
    /// Failed results are refused and the current data is kept.
    pub fn install(&mut self, result: &CalibrationResult) -> Result<(), CalibrationFailure> {
        self.data = CalibrationData::try_from(result)?;
        tracing::info!(correction = ?self.data.correction(), "Calibration installed");
        Ok(())
    }

    /// Drop back to the uncalibrated default.
    pub fn reset(&mut self) {
        self.data = CalibrationData::default();
        tracing::info!("Calibration reset to default");
    }

    /// Calibrated orientation for a raw sensor attitude.
    pub fn update(&self, raw_attitude: Quat) -> Quat {
        self.data.apply(to_consumer_frame(raw_attitude))
    }
}
