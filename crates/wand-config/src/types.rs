use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Calibration settings.
    pub calibration: CalibrationConfig,
    /// Simulated wand used when no sensor is attached.
    pub rig: RigConfig,
}

impl AppConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        self.calibration.validate()?;
        self.rig.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Axis projection tolerance in (0, 1). Lower = measured axes must lie
    /// closer to a cardinal axis before they are accepted.
    pub tolerance: f32,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self { tolerance: 0.4 }
    }
}

impl CalibrationConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(self.tolerance > 0.0 && self.tolerance < 1.0) {
            anyhow::bail!(
                "calibration tolerance must lie strictly between 0 and 1, got {}",
                self.tolerance
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    /// How the sensor sits inside the wand, as YXZ Euler angles in degrees.
    #[serde(with = "vec3_serde")]
    pub mount_deg: Vec3,
    /// Tilt applied for the forward and right poses, in degrees.
    pub tilt_deg: f32,
    /// Heading the user faces while calibrating, in degrees.
    pub heading_deg: f32,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            mount_deg: Vec3::new(90.0, 0.0, 0.0),
            tilt_deg: 45.0,
            heading_deg: 0.0,
        }
    }
}

impl RigConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.mount_deg.is_finite() || !self.heading_deg.is_finite() {
            anyhow::bail!("rig angles must be finite");
        }
        if !(self.tilt_deg > 0.0 && self.tilt_deg < 180.0) {
            anyhow::bail!("rig tilt must lie between 0 and 180 degrees, got {}", self.tilt_deg);
        }
        Ok(())
    }
}

// glam types serialize as plain arrays in TOML.

mod vec3_serde {
    use glam::Vec3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(v: &Vec3, s: S) -> Result<S::Ok, S::Error> {
        [v.x, v.y, v.z].serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec3, D::Error> {
        let [x, y, z] = <[f32; 3]>::deserialize(d)?;
        Ok(Vec3::new(x, y, z))
    }
}
