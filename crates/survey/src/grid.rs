//! Brute-force sweep for pointings that stay allowable across a sector.

use ndarray::{Array2, ArrayView1};
use sunshade_attitude::{SectorConstraints, allowable_map_scalar_roll};
use tracing::{debug, info};

use crate::SurveyError;

/// Half-open axis `[start, stop)` sampled every `step` degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridAxis {
    start: f64,
    stop: f64,
    step: f64,
}

impl GridAxis {
    pub fn new(
        name: &'static str,
        start: f64,
        stop: f64,
        step: f64,
    ) -> Result<Self, SurveyError> {
        if !(start.is_finite() && stop.is_finite() && step.is_finite()) {
            return Err(SurveyError::InvalidAxis {
                axis: name,
                reason: format!("bounds must be finite (start={start}, stop={stop}, step={step})"),
            });
        }
        if step <= 0.0 {
            return Err(SurveyError::InvalidAxis {
                axis: name,
                reason: format!("step must be positive, got {step}"),
            });
        }
        if stop <= start {
            return Err(SurveyError::InvalidAxis {
                axis: name,
                reason: format!("empty range [{start}, {stop})"),
            });
        }
        Ok(Self { start, stop, step })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn stop(&self) -> f64 {
        self.stop
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn len(&self) -> usize {
        ((self.stop - self.start) / self.step).ceil() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sample values, computed from the index to avoid accumulated drift.
    pub fn values(&self) -> Vec<f64> {
        (0..self.len())
            .map(|k| self.start + k as f64 * self.step)
            .collect()
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.start && value < self.stop
    }
}

/// Axes of the (dlong, decl, roll) sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub dlong: GridAxis,
    pub decl: GridAxis,
    pub roll: GridAxis,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            dlong: GridAxis {
                start: -180.0,
                stop: 179.0,
                step: 2.0,
            },
            decl: GridAxis {
                start: -90.0,
                stop: 90.0,
                step: 2.0,
            },
            roll: GridAxis {
                start: -180.0,
                stop: 179.0,
                step: 5.0,
            },
        }
    }
}

impl GridSpec {
    /// Meshgrid of the dlong/decl plane; rows follow dlong, columns follow decl.
    pub fn mesh(&self) -> (Array2<f64>, Array2<f64>) {
        let dlong = self.dlong.values();
        let decl = self.decl.values();
        let shape = (dlong.len(), decl.len());
        (
            Array2::from_shape_fn(shape, |(i, _)| dlong[i]),
            Array2::from_shape_fn(shape, |(_, j)| decl[j]),
        )
    }

    /// Number of (dlong, decl, roll) cells evaluated by a full sweep.
    pub fn cell_count(&self) -> usize {
        self.dlong.len() * self.decl.len() * self.roll.len()
    }
}

/// Allowable `(dlong, decl, roll)` triples, one per row.
#[derive(Debug, Clone, PartialEq)]
pub struct AllowableGrid {
    rows: Array2<f64>,
}

impl AllowableGrid {
    pub const COLUMNS: [&'static str; 3] = ["dlong", "decl", "roll"];

    pub fn empty() -> Self {
        Self {
            rows: Array2::zeros((0, 3)),
        }
    }

    pub fn from_triples(triples: &[[f64; 3]]) -> Result<Self, SurveyError> {
        let flat: Vec<f64> = triples.iter().flatten().copied().collect();
        let rows = Array2::from_shape_vec((triples.len(), 3), flat)?;
        Ok(Self { rows })
    }

    /// `(N, 3)` array with columns in [`AllowableGrid::COLUMNS`] order.
    pub fn rows(&self) -> &Array2<f64> {
        &self.rows
    }

    pub fn into_array(self) -> Array2<f64> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.nrows() == 0
    }

    pub fn triples(&self) -> impl Iterator<Item = [f64; 3]> + '_ {
        self.rows.outer_iter().map(|row| [row[0], row[1], row[2]])
    }

    pub fn column(&self, index: usize) -> ArrayView1<'_, f64> {
        self.rows.column(index)
    }

    fn append(&mut self, triples: &[[f64; 3]]) -> Result<(), SurveyError> {
        for triple in triples {
            self.rows.push_row(ArrayView1::from(&triple[..]))?;
        }
        Ok(())
    }
}

/// Sweep every roll slice and keep the triples allowable across the sector.
///
/// Rows are grouped by roll in sweep order; within a slice they follow the
/// mesh in row-major (dlong-major) order.
pub fn build_grid(
    spec: &GridSpec,
    constraints: &SectorConstraints,
) -> Result<AllowableGrid, SurveyError> {
    let (dlong, decl) = spec.mesh();
    let rolls = spec.roll.values();
    let mut grid = AllowableGrid::empty();

    for &roll in &rolls {
        let allowable = allowable_map_scalar_roll(dlong.view(), decl.view(), roll, constraints)?;
        let slice: Vec<[f64; 3]> = allowable
            .indexed_iter()
            .filter(|&(_, &ok)| ok)
            .map(|(idx, _)| [dlong[idx], decl[idx], roll])
            .collect();
        debug!(roll, allowable = slice.len(), "roll slice evaluated");
        grid.append(&slice)?;
    }

    info!(
        cells = spec.cell_count(),
        rolls = rolls.len(),
        rows = grid.len(),
        "allowable grid built"
    );
    Ok(grid)
}

/// Count of allowable rows per roll, in ascending roll order.
pub fn rows_per_roll(grid: &AllowableGrid) -> Vec<(f64, usize)> {
    let mut rolls = grid.column(2).to_vec();
    rolls.sort_by(f64::total_cmp);
    let mut counts: Vec<(f64, usize)> = Vec::new();
    for roll in rolls {
        match counts.last_mut() {
            Some((last, count)) if *last == roll => *count += 1,
            _ => counts.push((roll, 1)),
        }
    }
    counts
}
