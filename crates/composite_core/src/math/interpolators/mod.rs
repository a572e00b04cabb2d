//! Scattered-data interpolators for filling Missing cells.
//!
//! Every interpolator is built once from the valid samples of a grid and
//! then queried at Missing cell positions.
//!
//! ## Available Interpolators
//!
//! - [`LinearInterpolator`]: Barycentric interpolation on a Delaunay triangulation
//! - [`NearestInterpolator`]: Value of the closest sample, via an R-tree
//! - [`CloughTocherInterpolator`]: C¹ piecewise cubic on a Delaunay triangulation
//!
//! ## Core Trait
//!
//! All interpolators implement [`ScatteredInterpolator`]. `estimate` returns
//! `None` when the position cannot be estimated, which for the triangulated
//! methods means it lies outside the convex hull of the samples.
//!
//! ## Example
//!
//! ```
//! use composite_core::math::interpolators::{build, ScatteredInterpolator};
//! use composite_core::{InterpolationMethod, Sample};
//!
//! let samples = [
//!     Sample::new(0, 0, 0.0),
//!     Sample::new(0, 4, 4.0),
//!     Sample::new(4, 0, 8.0),
//!     Sample::new(4, 4, 12.0),
//! ];
//! let interp = build(InterpolationMethod::Linear, &samples, (5, 5));
//! assert_eq!(interp.estimate(2, 2), Some(6.0));
//! ```

mod clough_tocher;
mod linear;
mod mesh;
mod nearest;

pub use clough_tocher::CloughTocherInterpolator;
pub use linear::LinearInterpolator;
pub use nearest::NearestInterpolator;

use crate::types::{InterpolationMethod, Sample};

/// Interpolation over samples scattered on a cell lattice.
pub trait ScatteredInterpolator {
    /// Estimate the value at cell `(row, col)`.
    ///
    /// Returns `None` when the cell lies outside the region the method can
    /// cover.
    fn estimate(&self, row: usize, col: usize) -> Option<f64>;
}

/// Build the interpolator for `method` over `samples` on a grid of `shape`.
pub fn build(
    method: InterpolationMethod,
    samples: &[Sample],
    shape: (usize, usize),
) -> Box<dyn ScatteredInterpolator> {
    match method {
        InterpolationMethod::Linear => Box::new(LinearInterpolator::new(samples, shape)),
        InterpolationMethod::Nearest => Box::new(NearestInterpolator::new(samples)),
        InterpolationMethod::Cubic => Box::new(CloughTocherInterpolator::new(samples, shape)),
    }
}
