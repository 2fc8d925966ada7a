//! Sector-long safety checks on top of the Sun-angle evaluator.
//!
//! A pointing is allowable when, at the start, middle, and end of the sector,
//! the Sun is on the +X side, sits below the sunshade limit, and stays inside
//! the Y angle limit.

use ndarray::{Array, ArrayView, Dimension};

use crate::AttitudeError;
use crate::evaluator::{DegreeConversion, Evaluator, Orientation, Roll, SunAngles, map_orientations};

/// Limits applied across one observation sector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorConstraints {
    /// Sun angle in spacecraft Y must stay strictly below this (degrees).
    pub y_limit_deg: f64,
    /// Days from sector middle to either end.
    pub half_sector_days: u32,
    /// Sun elevation above the sunshade plane must stay strictly below this (degrees).
    pub sunshade_limit_deg: f64,
    pub conversion: DegreeConversion,
}

impl Default for SectorConstraints {
    fn default() -> Self {
        Self {
            y_limit_deg: 15.0,
            half_sector_days: 14,
            sunshade_limit_deg: -5.0,
            conversion: DegreeConversion::Exact,
        }
    }
}

impl SectorConstraints {
    pub fn evaluator(&self) -> Evaluator {
        Evaluator::new(self.conversion)
    }

    /// Day offsets of sector start, middle, and end.
    pub fn sample_days(&self) -> [f64; 3] {
        let half = f64::from(self.half_sector_days);
        [-half, 0.0, half]
    }
}

/// Outcome of the three safety conditions at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintChecks {
    pub sun_on_plus_x: bool,
    pub below_sunshade: bool,
    pub within_y_limit: bool,
}

impl ConstraintChecks {
    pub fn from_angles(angles: &SunAngles, constraints: &SectorConstraints) -> Self {
        Self {
            sun_on_plus_x: angles.sign_x > 0,
            below_sunshade: angles.sun_angle_deg < constraints.sunshade_limit_deg,
            within_y_limit: angles.sun_angle_sc_deg < constraints.y_limit_deg,
        }
    }

    pub fn all_clear(&self) -> bool {
        self.sun_on_plus_x && self.below_sunshade && self.within_y_limit
    }
}

/// Checks at sector start, middle, and end, in that order.
pub fn sector_checks(
    orientation: &Orientation,
    constraints: &SectorConstraints,
) -> [ConstraintChecks; 3] {
    let evaluator = constraints.evaluator();
    constraints.sample_days().map(|day| {
        let angles = evaluator.evaluate(&orientation.shifted(day));
        ConstraintChecks::from_angles(&angles, constraints)
    })
}

/// True when every check passes at all three sector samples.
pub fn is_allowable(orientation: &Orientation, constraints: &SectorConstraints) -> bool {
    sector_checks(orientation, constraints)
        .iter()
        .all(ConstraintChecks::all_clear)
}

/// Allowability of every cell of a dlong/decl grid.
pub fn allowable_map<D: Dimension>(
    dlong: ArrayView<'_, f64, D>,
    decl: ArrayView<'_, f64, D>,
    roll: Roll<'_, D>,
    constraints: &SectorConstraints,
) -> Result<Array<bool, D>, AttitudeError> {
    map_orientations(dlong, decl, roll, |o| is_allowable(&o, constraints))
}

/// [`allowable_map`] with one roll shared by the whole grid.
pub fn allowable_map_scalar_roll<D: Dimension>(
    dlong: ArrayView<'_, f64, D>,
    decl: ArrayView<'_, f64, D>,
    roll_deg: f64,
    constraints: &SectorConstraints,
) -> Result<Array<bool, D>, AttitudeError> {
    allowable_map(dlong, decl, Roll::Scalar(roll_deg), constraints)
}

/// [`allowable_map`] with a roll per grid cell.
pub fn allowable_map_array_roll<D: Dimension>(
    dlong: ArrayView<'_, f64, D>,
    decl: ArrayView<'_, f64, D>,
    roll_deg: ArrayView<'_, f64, D>,
    constraints: &SectorConstraints,
) -> Result<Array<bool, D>, AttitudeError> {
    allowable_map(dlong, decl, Roll::PerCell(roll_deg), constraints)
}
