//! Sanitizer: reclassify out-of-range measurements as Missing.

use tracing::debug;

use crate::types::{FusionError, Grid, ValidRange};

/// Mark every cell outside `[fmin, fmax]` as Missing.
///
/// Both bounds are inclusive. Values inside the range are copied unchanged
/// and cells that were already Missing stay Missing. An all-Missing result
/// is valid output.
///
/// # Errors
///
/// `FusionError::InvalidRange` when `fmin > fmax` or a bound is not finite.
///
/// # Example
///
/// ```
/// use composite_core::{sanitize, Grid};
/// use ndarray::array;
///
/// let raw = Grid::from_raw(&array![[10, -50, 70]]);
/// let clean = sanitize(&raw, -32.0, 64.0).unwrap();
/// assert_eq!(clean, Grid::new(array![[Some(10.0), None, None]]));
/// ```
pub fn sanitize(grid: &Grid, fmin: f64, fmax: f64) -> Result<Grid, FusionError> {
    let range = ValidRange::new(fmin, fmax)?;
    Ok(sanitize_with(grid, range))
}

/// [`sanitize`] with a pre-validated range.
pub fn sanitize_with(grid: &Grid, range: ValidRange) -> Grid {
    let cells = grid
        .cells()
        .mapv(|cell| cell.filter(|&v| range.contains(v)));
    let sanitized = Grid::new(cells);

    debug!(
        fmin = range.fmin(),
        fmax = range.fmax(),
        rejected = sanitized.missing_count() - grid.missing_count(),
        missing = sanitized.missing_count(),
        "sanitized grid"
    );
    sanitized
}
