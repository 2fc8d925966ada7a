//! Configuration models and loaders for the sunshade pointing planner.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Top-level planner manifest.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PlannerConfig {
    pub constraints: ConstraintsConfig,
    pub grid: GridConfig,
}

/// Sector safety limits applied by the allowability check.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ConstraintsConfig {
    /// Maximum Sun angle in spacecraft Y (degrees).
    pub y_limit_deg: f64,
    /// Half the sector length; the sector is centred on the antisolar crossing.
    pub half_sector_days: u32,
    /// Sun elevation above the sunshade plane must stay strictly below this (degrees).
    pub sunshade_limit_deg: f64,
    pub conversion: DegreeConversionConfig,
}

impl Default for ConstraintsConfig {
    fn default() -> Self {
        Self {
            y_limit_deg: 15.0,
            half_sector_days: 14,
            sunshade_limit_deg: -5.0,
            conversion: DegreeConversionConfig::Exact,
        }
    }
}

/// Radian-to-degree factor applied to arcsine results.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DegreeConversionConfig {
    #[default]
    Exact,
    Legacy,
}

/// Half-open `[start, stop)` axis sampled every `step` degrees.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct AxisConfig {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

/// Sweep extents for the allowable-pointing grid.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    pub dlong: AxisConfig,
    pub decl: AxisConfig,
    pub roll: AxisConfig,
    pub output: PathBuf,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            dlong: AxisConfig {
                start: -180.0,
                stop: 179.0,
                step: 2.0,
            },
            decl: AxisConfig {
                start: -90.0,
                stop: 90.0,
                step: 2.0,
            },
            roll: AxisConfig {
                start: -180.0,
                stop: 179.0,
                step: 5.0,
            },
            output: PathBuf::from("allowable_pointings_grid.json"),
        }
    }
}

/// Candidate pointing listed in a review manifest.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PointingConfig {
    pub name: String,
    pub dlong_deg: f64,
    pub decl_deg: f64,
    #[serde(default)]
    pub roll_deg: f64,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Load the planner manifest from a TOML or YAML file.
pub fn load_planner_config<P: AsRef<Path>>(path: P) -> Result<PlannerConfig, ConfigError> {
    let path = path.as_ref();
    if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

/// Load candidate pointings from a YAML list, a single TOML file, or a directory of TOML files.
pub fn load_pointings<P: AsRef<Path>>(path: P) -> Result<Vec<PointingConfig>, ConfigError> {
    load_records(path)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_toml(path))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}
