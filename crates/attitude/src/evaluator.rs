//! Sun direction and derived angles in spacecraft body coordinates.
//!
//! The body frame has the boresight along +Z with the sunshade facing +Z, so
//! a Sun elevation below the XY plane is on the shaded side. The Sun is taken
//! to be at infinity, fixed at `(0, 0, -1)` in a frame whose +Z is the
//! antisolar direction.

use ndarray::{Array, ArrayView, Dimension, Zip};
use serde::Serialize;
use sunshade_core::constants::{DEG_PER_DAY, DEG_PER_RAD, LEGACY_DEG_PER_RAD};
use sunshade_core::rotation::Rotation3;
use sunshade_core::units::{clamped_asin, sign_trit};
use sunshade_core::vector::Vector3;

use crate::AttitudeError;

/// Sun direction in the antisolar reference frame.
pub const SUN_INERTIAL: Vector3 = [0.0, 0.0, -1.0];

/// Pointing of the spacecraft relative to the antisolar direction (degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Orientation {
    /// Offset of the boresight from antisolar in ecliptic longitude.
    pub dlong_deg: f64,
    /// Ecliptic declination of the boresight.
    pub decl_deg: f64,
    /// Roll about the boresight.
    pub roll_deg: f64,
}

impl Orientation {
    pub fn new(dlong_deg: f64, decl_deg: f64, roll_deg: f64) -> Self {
        Self {
            dlong_deg,
            decl_deg,
            roll_deg,
        }
    }

    /// Same inertial pointing seen `days` later, as the antisolar point drifts in longitude.
    pub fn shifted(&self, days: f64) -> Self {
        Self {
            dlong_deg: self.dlong_deg + days * DEG_PER_DAY,
            ..*self
        }
    }
}

/// Angles the sunshade limits are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SunAngles {
    /// Sign of the Sun's X component: `1`, `-1`, or `0`.
    pub sign_x: i8,
    /// Elevation of the Sun above the sunshade (XY) plane; negative is shaded.
    pub sun_angle_deg: f64,
    /// Magnitude of the Sun's angle in spacecraft Y.
    pub sun_angle_sc_deg: f64,
}

/// Radian-to-degree factor used for arcsine results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegreeConversion {
    /// `180 / pi`.
    #[default]
    Exact,
    /// `57.296`, matching grids produced with the truncated factor.
    Legacy,
}

impl DegreeConversion {
    pub fn factor(self) -> f64 {
        match self {
            DegreeConversion::Exact => DEG_PER_RAD,
            DegreeConversion::Legacy => LEGACY_DEG_PER_RAD,
        }
    }
}

/// Roll input for batched evaluation.
///
/// A scalar is broadcast to every cell; a per-cell array must have the same
/// shape as the dlong/decl inputs.
#[derive(Debug, Clone)]
pub enum Roll<'a, D: Dimension> {
    Scalar(f64),
    PerCell(ArrayView<'a, f64, D>),
}

/// Column-wise batched result, shaped like the inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct SunAnglesArray<D: Dimension> {
    pub sign_x: Array<i8, D>,
    pub sun_angle_deg: Array<f64, D>,
    pub sun_angle_sc_deg: Array<f64, D>,
}

/// Rotation taking antisolar-frame vectors into body coordinates.
///
/// Each factor undoes one step of the physical pointing, so the angles are
/// negated; dlong acts first and roll last.
pub fn body_rotation(orientation: &Orientation) -> Rotation3 {
    let r_dlong = Rotation3::about_x(-orientation.dlong_deg);
    let r_decl = Rotation3::about_y(-orientation.decl_deg);
    let r_roll = Rotation3::about_z(-orientation.roll_deg);
    r_roll * r_decl * r_dlong
}

/// Unit Sun direction in body coordinates.
pub fn sun_vector(orientation: &Orientation) -> Vector3 {
    body_rotation(orientation).apply(&SUN_INERTIAL)
}

/// Evaluate with the exact degree conversion.
pub fn evaluate(orientation: &Orientation) -> SunAngles {
    Evaluator::default().evaluate(orientation)
}

/// Sun-angle evaluator bound to one degree conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evaluator {
    conversion: DegreeConversion,
}

impl Evaluator {
    pub fn new(conversion: DegreeConversion) -> Self {
        Self { conversion }
    }

    pub fn conversion(&self) -> DegreeConversion {
        self.conversion
    }

    pub fn evaluate(&self, orientation: &Orientation) -> SunAngles {
        self.angles_from_vector(&sun_vector(orientation))
    }

    /// Derive the angles from a body-frame Sun direction.
    pub fn angles_from_vector(&self, v: &Vector3) -> SunAngles {
        let factor = self.conversion.factor();
        SunAngles {
            sign_x: sign_trit(v[0]),
            sun_angle_deg: factor * clamped_asin(v[2]),
            sun_angle_sc_deg: factor * clamped_asin(v[1]).abs(),
        }
    }

    /// Element-wise evaluation over equally shaped arrays.
    pub fn evaluate_array<D: Dimension>(
        &self,
        dlong: ArrayView<'_, f64, D>,
        decl: ArrayView<'_, f64, D>,
        roll: Roll<'_, D>,
    ) -> Result<SunAnglesArray<D>, AttitudeError> {
        let angles = map_orientations(dlong, decl, roll, |o| self.evaluate(&o))?;
        Ok(SunAnglesArray {
            sign_x: angles.map(|a| a.sign_x),
            sun_angle_deg: angles.map(|a| a.sun_angle_deg),
            sun_angle_sc_deg: angles.map(|a| a.sun_angle_sc_deg),
        })
    }

    /// Slice convenience over [`Evaluator::evaluate_array`].
    pub fn evaluate_batch(
        &self,
        dlong: &[f64],
        decl: &[f64],
        roll: &[f64],
    ) -> Result<Vec<SunAngles>, AttitudeError> {
        let roll = if roll.len() == 1 {
            Roll::Scalar(roll[0])
        } else {
            Roll::PerCell(ArrayView::from(roll))
        };
        let angles = map_orientations(
            ArrayView::from(dlong),
            ArrayView::from(decl),
            roll,
            |o| self.evaluate(&o),
        )?;
        Ok(angles.to_vec())
    }
}

/// Pair the inputs cell by cell and map each orientation through `f`.
pub(crate) fn map_orientations<D, T, F>(
    dlong: ArrayView<'_, f64, D>,
    decl: ArrayView<'_, f64, D>,
    roll: Roll<'_, D>,
    f: F,
) -> Result<Array<T, D>, AttitudeError>
where
    D: Dimension,
    F: Fn(Orientation) -> T,
{
    if dlong.shape() != decl.shape() {
        return Err(AttitudeError::ShapeMismatch {
            dlong: dlong.shape().to_vec(),
            decl: decl.shape().to_vec(),
        });
    }
    match roll {
        Roll::Scalar(roll) => {
            if !roll.is_finite() {
                return Err(AttitudeError::InvalidRoll(roll));
            }
            Ok(Zip::from(dlong)
                .and(decl)
                .map_collect(|&dl, &de| f(Orientation::new(dl, de, roll))))
        }
        Roll::PerCell(rolls) => {
            if rolls.shape() != dlong.shape() {
                return Err(AttitudeError::RollShape {
                    expected: dlong.shape().to_vec(),
                    found: rolls.shape().to_vec(),
                });
            }
            if let Some(&bad) = rolls.iter().find(|r| !r.is_finite()) {
                return Err(AttitudeError::InvalidRoll(bad));
            }
            Ok(Zip::from(dlong)
                .and(decl)
                .and(rolls)
                .map_collect(|&dl, &de, &ro| f(Orientation::new(dl, de, ro))))
        }
    }
}
