//! Loader error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a grid file.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The file could not be opened.
    #[error("Loader: cannot open {}: {source}", .path.display())]
    Io {
        /// Path that failed to open
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The delimited reader failed.
    #[error("Loader: malformed delimited data: {0}")]
    Csv(#[from] csv::Error),

    /// A field is not an integer.
    #[error("Loader: line {line}, field {field}: '{value}' is not an integer")]
    Parse {
        /// 1-based line number
        line: u64,
        /// 1-based field position within the row
        field: usize,
        /// Offending text
        value: String,
    },

    /// A row has a different number of fields than the first row.
    #[error("Loader: line {line} has {found} field(s), expected {expected}")]
    Ragged {
        /// 1-based line number
        line: u64,
        /// Width of the first row
        expected: usize,
        /// Width of this row
        found: usize,
    },

    /// Parsed values do not fill a rectangular array.
    #[error("Loader: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// The input contains no rows.
    #[error("Loader: input contains no rows")]
    Empty,
}

impl LoaderError {
    /// Wrap an I/O error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
