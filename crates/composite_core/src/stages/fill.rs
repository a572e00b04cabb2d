//! GapFiller: estimate Missing cells by spatial interpolation.

use tracing::debug;

use crate::math::interpolators;
use crate::types::{FusionError, Grid, InterpolationMethod};

/// Outcome of a single GapFiller pass.
///
/// `residual > 0` means some cells lie outside the region the method can
/// cover (the convex hull of the samples for linear and cubic). That is the
/// expected state after a linear pass and is resolved by a nearest pass;
/// it is never reported as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FillSummary {
    /// Method used for this pass
    pub method: InterpolationMethod,
    /// Cells that received an estimate
    pub filled: usize,
    /// Cells still Missing after the pass
    pub residual: usize,
}

impl FillSummary {
    /// True when the pass left no cell Missing.
    pub fn is_complete(&self) -> bool {
        self.residual == 0
    }
}

/// Fill Missing cells of `grid` in place.
///
/// All estimates are computed from the valid cells present when the call
/// starts; cells filled during the pass are not used as samples. Valid
/// cells are never modified. A grid without Missing cells is left as is.
///
/// # Errors
///
/// `FusionError::NoValidSamples` when the grid has Missing cells but no
/// valid cell to interpolate from.
///
/// # Example
///
/// ```
/// use composite_core::{fill_in_place, Grid, InterpolationMethod};
/// use ndarray::array;
///
/// let mut grid = Grid::new(array![
///     [None, Some(2.0), Some(2.0)],
///     [Some(2.0), None, Some(2.0)],
///     [Some(2.0), Some(2.0), Some(2.0)],
/// ]);
///
/// let first = fill_in_place(&mut grid, InterpolationMethod::Linear).unwrap();
/// assert_eq!((first.filled, first.residual), (1, 1));
///
/// let second = fill_in_place(&mut grid, InterpolationMethod::Nearest).unwrap();
/// assert!(second.is_complete());
/// assert!(grid.is_complete());
/// ```
pub fn fill_in_place(
    grid: &mut Grid,
    method: InterpolationMethod,
) -> Result<FillSummary, FusionError> {
    let missing = grid.missing_positions();
    if missing.is_empty() {
        return Ok(FillSummary {
            method,
            filled: 0,
            residual: 0,
        });
    }

    let samples = grid.samples();
    if samples.is_empty() {
        return Err(FusionError::NoValidSamples {
            missing: missing.len(),
        });
    }

    let interpolator = interpolators::build(method, &samples, grid.shape());

    let mut filled = 0;
    for &(row, col) in &missing {
        if let Some(value) = interpolator.estimate(row, col).filter(|v| v.is_finite()) {
            grid.set(row, col, Some(value));
            filled += 1;
        }
    }

    let summary = FillSummary {
        method,
        filled,
        residual: missing.len() - filled,
    };
    debug!(
        %method,
        samples = samples.len(),
        filled = summary.filled,
        residual = summary.residual,
        "fill pass finished"
    );
    Ok(summary)
}

/// Fill Missing cells and return the grid.
///
/// Takes the grid by value: the result is the same grid with Missing cells
/// replaced, so the usual two-pass workflow chains naturally.
///
/// # Example
///
/// ```
/// use composite_core::{fill, Grid, InterpolationMethod};
/// use ndarray::array;
///
/// let grid = Grid::new(array![
///     [Some(1.0), Some(1.0), Some(1.0)],
///     [Some(1.0), None, Some(1.0)],
///     [Some(1.0), Some(1.0), Some(1.0)],
/// ]);
/// let filled = fill(grid, InterpolationMethod::Linear).unwrap();
/// assert_eq!(filled.get(1, 1), Some(1.0));
/// ```
pub fn fill(mut grid: Grid, method: InterpolationMethod) -> Result<Grid, FusionError> {
    fill_in_place(&mut grid, method)?;
    Ok(grid)
}
