//! Core grid, range, and method types.
//!
//! This module provides:
//! - `grid`: The [`Grid`] raster with explicit Missing cells, and [`Sample`]
//! - `range`: [`ValidRange`], the inclusive band of acceptable measurements
//! - `method`: [`InterpolationMethod`], the GapFiller strategy selector
//! - `error`: Structured error type for all three pipeline stages
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level.

pub mod error;
pub mod grid;
pub mod method;
pub mod range;

pub use error::FusionError;
pub use grid::{Grid, Sample};
pub use method::InterpolationMethod;
pub use range::ValidRange;
