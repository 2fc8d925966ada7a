//! Planning sweeps built on the sunshade attitude checks.

pub mod grid;
pub mod range;
pub mod settings;

pub use grid::{AllowableGrid, GridAxis, GridSpec, build_grid};
pub use range::{Alarm, DayReport, RangeSummary, check_range};
pub use sunshade_attitude as attitude;

use thiserror::Error;

/// Errors surfaced while preparing or running a survey.
#[derive(Debug, Error)]
pub enum SurveyError {
    #[error("invalid {axis} axis: {reason}")]
    InvalidAxis { axis: &'static str, reason: String },
    #[error("invalid constraint `{name}`: {value}")]
    InvalidConstraint { name: &'static str, value: f64 },
    #[error("attitude evaluation failed: {0}")]
    Attitude(#[from] sunshade_attitude::AttitudeError),
    #[error("grid assembly failed: {0}")]
    Shape(#[from] ndarray::ShapeError),
}
