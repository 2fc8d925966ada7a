//! Sun-angle geometry for spacecraft pointings.
//!
//! Given a pointing (offset from antisolar, ecliptic declination, roll), the
//! [`evaluator`] rotates the antisolar Sun direction into the body frame and
//! derives the three angles the safety limits are written against. The
//! [`allowability`] module applies those limits at the start, middle, and end
//! of an observation sector, either for one pointing or across a grid.

pub mod allowability;
pub mod evaluator;

pub use allowability::{
    ConstraintChecks, SectorConstraints, allowable_map, allowable_map_array_roll,
    allowable_map_scalar_roll, is_allowable, sector_checks,
};
pub use evaluator::{
    DegreeConversion, Evaluator, Orientation, Roll, SUN_INERTIAL, SunAngles, SunAnglesArray,
    body_rotation, evaluate, sun_vector,
};

use thiserror::Error;

/// Errors raised when batched inputs cannot be paired element-wise.
#[derive(Debug, Error, PartialEq)]
pub enum AttitudeError {
    #[error("dlong shape {dlong:?} does not match decl shape {decl:?}")]
    ShapeMismatch { dlong: Vec<usize>, decl: Vec<usize> },
    #[error("roll array shape {found:?} does not match grid shape {expected:?}")]
    RollShape {
        expected: Vec<usize>,
        found: Vec<usize>,
    },
    #[error("invalid roll value {0}")]
    InvalidRoll(f64),
}
