//! Radar composite service layer
//!
//! Orchestrates the composite kernel into a command-line tool: configuration
//! layering (file, environment, CLI), the full fusion pipeline, and the two
//! output collaborators.
//!
//! # Modules
//!
//! - [`config`]: `PipelineConfig` loading and validation
//! - [`pipeline`]: Loader → Sanitizer → Compositor → GapFiller driver
//! - [`export`]: `;`-delimited integer export with explicit rounding
//! - [`render`]: greyscale PGM snapshots
//!
//! # Example
//!
//! ```
//! use composite_core::{Grid, InterpolationMethod};
//! use ndarray::array;
//! use service_cli::export::{write_grid, Rounding};
//! use service_cli::pipeline::fill_grid;
//!
//! let mut grid = Grid::new(array![
//!     [Some(4.0), Some(4.0), None],
//!     [Some(4.0), None, Some(4.0)],
//! ]);
//! fill_grid(&mut grid, &[InterpolationMethod::Linear, InterpolationMethod::Nearest]).unwrap();
//!
//! let mut out = Vec::new();
//! write_grid(&mut out, &grid, Rounding::Truncate).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "4;4;4\n4;4;4\n");
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod render;

pub use error::{CliError, Result};
