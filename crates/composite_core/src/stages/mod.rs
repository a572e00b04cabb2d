//! The three pipeline stages.
//!
//! Data flows strictly forward: two sanitized grids are merged by the
//! Compositor into one grid with Missing cells, which the GapFiller then
//! fills in one or more passes.
//!
//! - [`sanitize()`]: Out-of-range cells become Missing
//! - [`composite()`]: Mean of the valid inputs per cell, optional 2×2 minimum filter
//! - [`fill()`]: Missing cells estimated by spatial interpolation

mod composite;
mod fill;
mod sanitize;

pub use composite::composite;
pub use fill::{fill, fill_in_place, FillSummary};
pub use sanitize::{sanitize, sanitize_with};

#[cfg(test)]
pub(crate) mod strategies {
    //! Grid generators shared by the stage property tests.

    use crate::Grid;
    use ndarray::Array2;
    use proptest::prelude::*;

    /// A cell that is Missing roughly one time in four.
    fn cell() -> impl Strategy<Value = Option<f64>> {
        prop_oneof![1 => Just(None), 3 => (-60.0f64..90.0).prop_map(Some)]
    }

    fn cells(rows: usize, cols: usize) -> impl Strategy<Value = Grid> {
        prop::collection::vec(cell(), rows * cols).prop_map(move |cells| {
            Grid::new(Array2::from_shape_vec((rows, cols), cells).expect("shape matches"))
        })
    }

    /// Grids up to `max_dim` on each side.
    pub fn grid(max_dim: usize) -> impl Strategy<Value = Grid> {
        (1..=max_dim, 1..=max_dim).prop_flat_map(|(rows, cols)| cells(rows, cols))
    }

    /// Two grids of the same shape.
    pub fn grid_pair(max_dim: usize) -> impl Strategy<Value = (Grid, Grid)> {
        (1..=max_dim, 1..=max_dim)
            .prop_flat_map(|(rows, cols)| (cells(rows, cols), cells(rows, cols)))
    }
}
