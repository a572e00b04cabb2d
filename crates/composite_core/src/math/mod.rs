//! Numerical building blocks for the pipeline stages.
//!
//! - [`filters`]: Rank filters over Missing-aware rasters
//! - [`triangulation`]: Exact Delaunay triangulation of lattice points
//! - [`interpolators`]: Scattered-data interpolators used by the GapFiller

pub mod filters;
pub mod interpolators;
pub mod triangulation;
