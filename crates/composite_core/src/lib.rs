//! # composite_core: Grid Fusion Kernel for Radar Composites
//!
//! ## Layer 1 (Kernel) Role
//!
//! composite_core is the bottom layer of the composite workspace, providing:
//! - Grid types: [`Grid`], [`ValidRange`], [`InterpolationMethod`] (`types`)
//! - Error types: [`FusionError`] (`types::error`)
//! - The three pipeline stages (`stages`):
//!   - Sanitizer: [`sanitize`] marks out-of-range cells as Missing
//!   - Compositor: [`composite`] averages two overlapping grids
//!   - GapFiller: [`fill`] estimates Missing cells by spatial interpolation
//! - Numerical building blocks (`math`): minimum filter, Delaunay
//!   triangulation on lattice points, scattered-data interpolators
//!
//! ## No I/O
//!
//! Parsing, rendering and export live in `adapter_loader` and `service_cli`.
//! Everything here is synchronous, single-threaded and in-memory.
//!
//! ## Usage Examples
//!
//! ```rust
//! use composite_core::{composite, fill, sanitize, Grid, InterpolationMethod};
//! use ndarray::array;
//!
//! let left = Grid::from_raw(&array![[10, -50, 12], [11, 13, 99], [14, 15, 16]]);
//! let right = Grid::from_raw(&array![[12, 20, 12], [-40, 13, 70], [14, 15, 16]]);
//!
//! let left = sanitize(&left, -32.0, 64.0).unwrap();
//! let right = sanitize(&right, -32.0, 64.0).unwrap();
//!
//! let merged = composite(&left, &right, false).unwrap();
//! assert_eq!(merged.get(0, 0), Some(11.0));
//! assert_eq!(merged.get(0, 1), Some(20.0));
//! assert_eq!(merged.get(1, 2), None);
//!
//! // Interior fill first, then mop up anything outside the convex hull
//! let filled = fill(merged, InterpolationMethod::Linear).unwrap();
//! let filled = fill(filled, InterpolationMethod::Nearest).unwrap();
//! assert!(filled.is_complete());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `InterpolationMethod` and `FillSummary`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod stages;
pub mod types;

pub use stages::{composite, fill, fill_in_place, sanitize, sanitize_with, FillSummary};
pub use types::{FusionError, Grid, InterpolationMethod, Sample, ValidRange};
