//! Rank filters over rasters with Missing cells.
//!
//! The window for a filter of `size` covers offsets
//! `-(size / 2) ..= size - 1 - size / 2` along each axis, so an even-sized
//! window extends towards lower indices. For `size = 2` each output cell is
//! the minimum of `{i-1, i} × {j-1, j}`.
//!
//! A window containing a Missing cell produces Missing.

use ndarray::Array2;

/// Boundary handling for windows that extend past the grid edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryMode {
    /// Reflect: d c b a | a b c d | d c b a (half-sample symmetric)
    #[default]
    Reflect,
    /// Nearest edge value: a a a a | a b c d | d d d d
    Nearest,
}

impl BoundaryMode {
    /// Map a possibly out-of-range index onto `[0, len)`.
    fn resolve(&self, index: isize, len: usize) -> usize {
        let n = len as isize;
        match self {
            BoundaryMode::Nearest => index.clamp(0, n - 1) as usize,
            BoundaryMode::Reflect => {
                let period = 2 * n;
                let mut m = index.rem_euclid(period);
                if m >= n {
                    m = period - 1 - m;
                }
                m as usize
            }
        }
    }
}

/// Sliding-window minimum with Missing propagation.
///
/// # Arguments
///
/// * `cells` - Input raster (`None` is Missing)
/// * `size` - Window width along both axes (a `size` of 0 is treated as 1)
/// * `mode` - Boundary handling
///
/// # Example
///
/// ```
/// use composite_core::math::filters::{minimum_filter, BoundaryMode};
/// use ndarray::array;
///
/// let cells = array![[Some(4.0), Some(2.0)], [Some(3.0), Some(5.0)]];
/// let out = minimum_filter(&cells, 2, BoundaryMode::Reflect);
/// assert_eq!(out, array![[Some(4.0), Some(2.0)], [Some(3.0), Some(2.0)]]);
/// ```
pub fn minimum_filter(
    cells: &Array2<Option<f64>>,
    size: usize,
    mode: BoundaryMode,
) -> Array2<Option<f64>> {
    let (rows, cols) = cells.dim();
    if rows == 0 || cols == 0 {
        return cells.clone();
    }

    let size = size.max(1) as isize;
    let lo = -(size / 2);
    let hi = size - 1 - size / 2;

    Array2::from_shape_fn((rows, cols), |(i, j)| {
        let mut acc: Option<f64> = None;
        for di in lo..=hi {
            let r = mode.resolve(i as isize + di, rows);
            for dj in lo..=hi {
                let c = mode.resolve(j as isize + dj, cols);
                let v = cells[(r, c)]?;
                acc = Some(acc.map_or(v, |m| m.min(v)));
            }
        }
        acc
    })
}
