//! Conversion from loaded configuration into runtime survey settings.

use sunshade_attitude::{DegreeConversion, Orientation, SectorConstraints};
use sunshade_config::{
    AxisConfig, ConstraintsConfig, DegreeConversionConfig, GridConfig, PointingConfig,
};
use tracing::warn;

use crate::SurveyError;
use crate::grid::{GridAxis, GridSpec};

/// Longest accepted half sector, in days.
pub const MAX_HALF_SECTOR_DAYS: u32 = 180;

/// Convert a `ConstraintsConfig` into the runtime `SectorConstraints`.
pub fn constraints_from_config(
    config: &ConstraintsConfig,
) -> Result<SectorConstraints, SurveyError> {
    if !(config.y_limit_deg.is_finite() && config.y_limit_deg > 0.0) {
        return Err(SurveyError::InvalidConstraint {
            name: "y_limit_deg",
            value: config.y_limit_deg,
        });
    }
    if config.half_sector_days > MAX_HALF_SECTOR_DAYS {
        return Err(SurveyError::InvalidConstraint {
            name: "half_sector_days",
            value: f64::from(config.half_sector_days),
        });
    }
    if !config.sunshade_limit_deg.is_finite() {
        return Err(SurveyError::InvalidConstraint {
            name: "sunshade_limit_deg",
            value: config.sunshade_limit_deg,
        });
    }
    let conversion = match config.conversion {
        DegreeConversionConfig::Exact => DegreeConversion::Exact,
        DegreeConversionConfig::Legacy => {
            warn!("using truncated 57.296 degree conversion for compatibility with legacy grids");
            DegreeConversion::Legacy
        }
    };
    Ok(SectorConstraints {
        y_limit_deg: config.y_limit_deg,
        half_sector_days: config.half_sector_days,
        sunshade_limit_deg: config.sunshade_limit_deg,
        conversion,
    })
}

/// Convert a `GridConfig` into a validated `GridSpec`.
pub fn grid_from_config(config: &GridConfig) -> Result<GridSpec, SurveyError> {
    Ok(GridSpec {
        dlong: axis("dlong", &config.dlong)?,
        decl: axis("decl", &config.decl)?,
        roll: axis("roll", &config.roll)?,
    })
}

/// Orientation described by a candidate pointing entry.
pub fn orientation_from_pointing(pointing: &PointingConfig) -> Orientation {
    Orientation::new(pointing.dlong_deg, pointing.decl_deg, pointing.roll_deg)
}

fn axis(name: &'static str, config: &AxisConfig) -> Result<GridAxis, SurveyError> {
    GridAxis::new(name, config.start, config.stop, config.step)
}
