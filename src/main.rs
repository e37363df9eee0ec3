mod rig;

use anyhow::Result;
use rig::SimulatedWand;
use tracing::{info, warn};
use wand_calib::{CalibrationSession, Pose, StepOutcome, WandTracker};
use wand_config::AppConfig;

fn main() -> Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wand_app=info,wand_calib=info".into()),
        )
        .init();

    info!("Wand calibration starting");

    let config = wand_config::load_config().unwrap_or_else(|e| {
        warn!(?e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Write out defaults on first run so they can be edited.
    if matches!(wand_config::config_path(), Ok(path) if !path.exists()) {
        if let Err(e) = wand_config::save_config(&config) {
            warn!(?e, "Failed to save default config");
        }
    }

    let wand = SimulatedWand::from_config(&config.rig);
    info!(
        tolerance = config.calibration.tolerance,
        mount = ?config.rig.mount_deg,
        "Using simulated wand"
    );

    let mut tracker = WandTracker::new();
    let mut session = CalibrationSession::new(config.calibration.tolerance);
    session.start(wand.calibration_source());

    for pose in Pose::ALL {
        info!(?pose, "Hold the wand and confirm");
        match session.next_step() {
            StepOutcome::Recorded { next, .. } => info!(next, "Pose recorded"),
            StepOutcome::Finished(result) => {
                info!(
                    x = ?result.projected_x,
                    y = ?result.projected_y,
                    z = ?result.projected_z,
                    "Calibration succeeded"
                );
                tracker.install(&result)?;
            }
            StepOutcome::BadCalibration => {
                warn!("Calibration rejected, keeping the default calibration");
            }
            StepOutcome::Ignored => warn!("Calibration session is not running"),
        }
    }

    // Per-frame path: raw reading in, calibrated orientation out.
    for pose in Pose::ALL {
        let world = wand.pose(pose);
        let calibrated = tracker.update(wand.reading(world));
        info!(
            ?pose,
            error_deg = calibrated.angle_between(world).to_degrees(),
            "Live orientation"
        );
    }

    Ok(())
}
