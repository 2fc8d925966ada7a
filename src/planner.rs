//! Glue shared by the command-line tools: settings resolution, pointing
//! reviews, and logging setup.

use std::path::{Path, PathBuf};

use serde_json::json;
use sunshade_attitude::{Orientation, SectorConstraints, is_allowable};
use sunshade_config::{ConfigError, DegreeConversionConfig, PlannerConfig, PointingConfig, load_planner_config};
use sunshade_survey::settings::{constraints_from_config, grid_from_config, orientation_from_pointing};
use sunshade_survey::{DayReport, GridSpec, RangeSummary, SurveyError, check_range};
use thiserror::Error;
use tracing::debug;

/// Errors surfaced while preparing a planner run.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid settings: {0}")]
    Survey(#[from] SurveyError),
}

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub constraints: SectorConstraints,
    pub grid: GridSpec,
    pub output: PathBuf,
}

/// Command-line overrides layered on top of the manifest.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub y_limit_deg: Option<f64>,
    pub half_sector_days: Option<u32>,
    pub legacy_degrees: bool,
}

/// Load the manifest (or defaults when `path` is `None`) and apply overrides.
pub fn load_settings(path: Option<&Path>, overrides: Overrides) -> Result<Settings, PlannerError> {
    let mut config = match path {
        Some(path) => {
            debug!(path = %path.display(), "loading planner config");
            load_planner_config(path)?
        }
        None => PlannerConfig::default(),
    };
    if let Some(limit) = overrides.y_limit_deg {
        config.constraints.y_limit_deg = limit;
    }
    if let Some(days) = overrides.half_sector_days {
        config.constraints.half_sector_days = days;
    }
    if overrides.legacy_degrees {
        config.constraints.conversion = DegreeConversionConfig::Legacy;
    }
    let constraints = constraints_from_config(&config.constraints)?;
    Ok(Settings {
        constraints,
        grid: grid_from_config(&config.grid)?,
        output: config.grid.output,
    })
}

/// Day-range report and verdict for one named pointing.
#[derive(Debug, Clone)]
pub struct PointingReview {
    pub name: String,
    pub orientation: Orientation,
    pub allowable: bool,
    pub summary: RangeSummary,
    pub days: Vec<DayReport>,
}

impl PointingReview {
    pub fn new(name: impl Into<String>, orientation: Orientation, constraints: &SectorConstraints) -> Self {
        let days = check_range(&orientation, constraints);
        Self {
            name: name.into(),
            orientation,
            allowable: is_allowable(&orientation, constraints),
            summary: RangeSummary::from_reports(&days),
            days,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "name": self.name,
            "orientation": self.orientation,
            "allowable": self.allowable,
            "summary": self.summary,
            "days": self.days,
        })
    }
}

/// Review every candidate in a pointing manifest.
pub fn review_pointings(
    pointings: &[PointingConfig],
    constraints: &SectorConstraints,
) -> Vec<PointingReview> {
    pointings
        .iter()
        .map(|p| PointingReview::new(&p.name, orientation_from_pointing(p), constraints))
        .collect()
}

/// Install a fmt subscriber honouring `RUST_LOG`; `default_level` applies only
/// when the variable is unset or unparsable.
pub fn init_tracing(default_level: tracing::Level) {
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use sunshade_attitude::DegreeConversion;

    #[test]
    fn defaults_without_manifest() {
        let settings = load_settings(None, Overrides::default()).expect("settings");
        assert_eq!(settings.constraints, SectorConstraints::default());
        assert_eq!(settings.grid, GridSpec::default());
        assert_eq!(settings.output, PathBuf::from("allowable_pointings_grid.json"));
    }

    #[test]
    fn overrides_win_over_defaults() {
        let overrides = Overrides {
            y_limit_deg: Some(10.0),
            half_sector_days: Some(7),
            legacy_degrees: true,
        };
        let settings = load_settings(None, overrides).expect("settings");
        assert_eq!(settings.constraints.y_limit_deg, 10.0);
        assert_eq!(settings.constraints.half_sector_days, 7);
        assert_eq!(settings.constraints.conversion, DegreeConversion::Legacy);
    }

    #[test]
    fn review_flags_mid_sector_only_pass() {
        let pointings = vec![
            PointingConfig {
                name: "north".into(),
                dlong_deg: 0.0,
                decl_deg: 30.0,
                roll_deg: 0.0,
            },
            PointingConfig {
                name: "grazing".into(),
                dlong_deg: 0.0,
                decl_deg: 84.9,
                roll_deg: 0.0,
            },
        ];
        let reviews = review_pointings(&pointings, &SectorConstraints::default());
        assert!(reviews[0].allowable);
        assert!(reviews[0].summary.is_clear());
        assert!(!reviews[1].allowable);
        assert_eq!(reviews[1].summary.first_alarm_day, Some(-14));

        let value = reviews[1].to_json();
        assert_eq!(value["name"], "grazing");
        assert_eq!(value["days"].as_array().map(Vec::len), Some(29));
        assert_eq!(value["days"][0]["alarms"][0], "sun_above_sunshade");
    }
}
