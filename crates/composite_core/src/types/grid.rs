//! The 2D measurement raster.

use ndarray::Array2;

/// A rectangular raster of measurements over `[0, rows) × [0, cols)`.
///
/// Each cell holds either a finite measurement (`Some(v)`) or Missing
/// (`None`). Missing is explicit rather than a NaN payload so that grid
/// equality behaves as expected in comparisons and tests.
///
/// Non-finite values are never stored: every constructor maps NaN and
/// infinities to Missing.
///
/// # Example
///
/// ```
/// use composite_core::Grid;
/// use ndarray::array;
///
/// let grid = Grid::new(array![[Some(1.0), None], [Some(f64::NAN), Some(4.0)]]);
/// assert_eq!(grid.shape(), (2, 2));
/// assert_eq!(grid.missing_count(), 2);
/// assert_eq!(grid.get(1, 1), Some(4.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: Array2<Option<f64>>,
}

/// A valid cell used as an interpolation sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Row index of the cell
    pub row: usize,
    /// Column index of the cell
    pub col: usize,
    /// Measured value
    pub value: f64,
}

impl Sample {
    /// Create a new sample.
    pub fn new(row: usize, col: usize, value: f64) -> Self {
        Self { row, col, value }
    }
}

impl Grid {
    /// Wrap an array of optional cells, demoting non-finite values to Missing.
    pub fn new(cells: Array2<Option<f64>>) -> Self {
        Self {
            cells: cells.mapv(|cell| cell.filter(|v| v.is_finite())),
        }
    }

    /// An all-Missing grid of the given shape.
    pub fn missing(rows: usize, cols: usize) -> Self {
        Self {
            cells: Array2::from_elem((rows, cols), None),
        }
    }

    /// Lift a floating-point array, treating NaN and infinities as Missing.
    pub fn from_values(values: &Array2<f64>) -> Self {
        Self {
            cells: values.mapv(|v| v.is_finite().then_some(v)),
        }
    }

    /// Lift a parsed integer grid. Every cell is valid until sanitized.
    pub fn from_raw(raw: &Array2<i32>) -> Self {
        Self {
            cells: raw.mapv(|v| Some(f64::from(v))),
        }
    }

    /// Grid dimensions as `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.cells.dim()
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Value at `(row, col)`; `None` when the cell is Missing or out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.cells.get((row, col)).copied().flatten()
    }

    /// Whether `(row, col)` is inside the grid and Missing.
    #[inline]
    pub fn is_missing(&self, row: usize, col: usize) -> bool {
        matches!(self.cells.get((row, col)), Some(None))
    }

    /// Borrow the underlying cells.
    #[inline]
    pub fn cells(&self) -> &Array2<Option<f64>> {
        &self.cells
    }

    /// Consume the grid, returning the underlying cells.
    pub fn into_cells(self) -> Array2<Option<f64>> {
        self.cells
    }

    /// Number of Missing cells.
    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// Number of valid cells.
    pub fn valid_count(&self) -> usize {
        self.cells.len() - self.missing_count()
    }

    /// True when no cell is Missing.
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Every valid cell as a `(position, value)` sample, in row-major order.
    pub fn samples(&self) -> Vec<Sample> {
        self.cells
            .indexed_iter()
            .filter_map(|((row, col), cell)| cell.map(|v| Sample::new(row, col, v)))
            .collect()
    }

    /// Positions of every Missing cell, in row-major order.
    pub fn missing_positions(&self) -> Vec<(usize, usize)> {
        self.cells
            .indexed_iter()
            .filter_map(|(pos, cell)| cell.is_none().then_some(pos))
            .collect()
    }

    /// Minimum and maximum over valid cells, or `None` if there are none.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.cells.iter().flatten().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    /// Plain floating-point view with Missing as NaN, for renderers.
    pub fn to_values(&self) -> Array2<f64> {
        self.cells.mapv(|cell| cell.unwrap_or(f64::NAN))
    }

    /// Overwrite a single cell. Non-finite values are stored as Missing.
    pub(crate) fn set(&mut self, row: usize, col: usize, value: Option<f64>) {
        self.cells[(row, col)] = value.filter(|v| v.is_finite());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_new_demotes_non_finite() {
        let grid = Grid::new(array![[Some(f64::INFINITY), Some(f64::NAN), Some(2.0)]]);
        assert_eq!(grid.get(0, 0), None);
        assert_eq!(grid.get(0, 1), None);
        assert_eq!(grid.get(0, 2), Some(2.0));
    }

    #[test]
    fn test_from_values_nan_is_missing() {
        let grid = Grid::from_values(&array![[1.0, f64::NAN], [f64::NEG_INFINITY, 4.0]]);
        assert_eq!(grid.missing_count(), 2);
        assert_eq!(grid.valid_count(), 2);
    }

    #[test]
    fn test_from_raw_is_all_valid() {
        let grid = Grid::from_raw(&array![[-100, 0], [5, 200]]);
        assert!(grid.is_complete());
        assert_eq!(grid.get(0, 0), Some(-100.0));
        assert_eq!(grid.get(1, 1), Some(200.0));
    }

    #[test]
    fn test_missing_constructor() {
        let grid = Grid::missing(2, 3);
        assert_eq!(grid.shape(), (2, 3));
        assert_eq!(grid.missing_count(), 6);
        assert!(grid.samples().is_empty());
    }

    #[test]
    fn test_get_out_of_bounds() {
        let grid = Grid::missing(1, 1);
        assert_eq!(grid.get(5, 5), None);
        assert!(!grid.is_missing(5, 5));
        assert!(grid.is_missing(0, 0));
    }

    #[test]
    fn test_samples_and_missing_positions() {
        let grid = Grid::new(array![[Some(1.0), None], [None, Some(4.0)]]);
        assert_eq!(
            grid.samples(),
            vec![Sample::new(0, 0, 1.0), Sample::new(1, 1, 4.0)]
        );
        assert_eq!(grid.missing_positions(), vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn test_value_range() {
        let grid = Grid::new(array![[Some(3.0), None], [Some(-7.5), Some(12.0)]]);
        assert_eq!(grid.value_range(), Some((-7.5, 12.0)));
        assert_eq!(Grid::missing(2, 2).value_range(), None);
    }

    #[test]
    fn test_to_values_marks_missing_as_nan() {
        let grid = Grid::new(array![[Some(3.0), None]]);
        let values = grid.to_values();
        assert_eq!(values[(0, 0)], 3.0);
        assert!(values[(0, 1)].is_nan());
    }

    #[test]
    fn test_equality_with_missing_cells() {
        let a = Grid::new(array![[Some(1.0), None]]);
        let b = Grid::new(array![[Some(1.0), None]]);
        assert_eq!(a, b);
    }
}
