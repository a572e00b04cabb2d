//! # adapter_loader: Grid File Input
//!
//! Reads `;`-delimited integer grids, one row per line, into
//! `ndarray::Array2<i32>` and lifts them into [`composite_core::Grid`].
//!
//! ```text
//! 12;14;-99;20
//! 13;15;18;22
//! ```
//!
//! Blank lines are skipped and fields are trimmed. Every row must have the
//! same number of fields, and every field must be an integer.
//!
//! ## Usage
//!
//! ```rust
//! use adapter_loader::parse_grid;
//!
//! let raw = parse_grid("1;2;3\n4;5;6\n".as_bytes()).unwrap();
//! assert_eq!(raw.dim(), (2, 3));
//! assert_eq!(raw[(1, 2)], 6);
//! ```

#![deny(missing_docs)]

mod error;
mod reader;

pub use error::LoaderError;
pub use reader::{load_grid, parse_grid, read_grid, DELIMITER};
