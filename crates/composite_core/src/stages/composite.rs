//! Compositor: merge two overlapping grids.

use ndarray::Zip;
use tracing::debug;

use crate::math::filters::{minimum_filter, BoundaryMode};
use crate::types::{FusionError, Grid};

/// Footprint of the seam-suppressing minimum filter.
const SMOOTH_WINDOW: usize = 2;

/// Combine two same-shape grids cell by cell.
///
/// Each output cell is the mean of the valid inputs at that position: the
/// average of both when both are valid, the single valid value when only
/// one is, and Missing when neither is.
///
/// With `smooth` set, a 2×2 minimum filter (window `{i-1, i} × {j-1, j}`,
/// reflect boundary) is applied afterwards. Any window touching a Missing
/// cell yields Missing. The filter erodes seams towards lower values; it is
/// a cosmetic pass, not a denoiser.
///
/// # Errors
///
/// `FusionError::ShapeMismatch` when the grids differ in dimensions.
///
/// # Example
///
/// ```
/// use composite_core::{composite, Grid};
/// use ndarray::array;
///
/// let a = Grid::new(array![[Some(10.0), None, None]]);
/// let b = Grid::new(array![[Some(20.0), Some(5.0), None]]);
/// let merged = composite(&a, &b, false).unwrap();
/// assert_eq!(merged, Grid::new(array![[Some(15.0), Some(5.0), None]]));
/// ```
pub fn composite(left: &Grid, right: &Grid, smooth: bool) -> Result<Grid, FusionError> {
    if left.shape() != right.shape() {
        return Err(FusionError::ShapeMismatch {
            left: left.shape(),
            right: right.shape(),
        });
    }

    let merged = Zip::from(left.cells())
        .and(right.cells())
        .map_collect(|&a, &b| match (a, b) {
            (Some(a), Some(b)) => Some((a + b) / 2.0),
            (Some(v), None) | (None, Some(v)) => Some(v),
            (None, None) => None,
        });

    let cells = if smooth {
        minimum_filter(&merged, SMOOTH_WINDOW, BoundaryMode::Reflect)
    } else {
        merged
    };
    let result = Grid::new(cells);

    debug!(
        rows = result.rows(),
        cols = result.cols(),
        smooth,
        missing = result.missing_count(),
        "composited grids"
    );
    Ok(result)
}
