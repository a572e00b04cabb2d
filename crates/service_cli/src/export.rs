//! Exporter: write a filled grid as `;`-delimited integer rows.
//!
//! Export is the only place where floating-point estimates become integers,
//! so the rounding policy is explicit. A Missing cell at export time is an
//! error; the exporter never invents values.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use composite_core::Grid;
use csv::WriterBuilder;
use ndarray::Array2;
use serde::Deserialize;
use thiserror::Error;

/// Exporter error types
#[derive(Debug, Error)]
pub enum ExportError {
    /// A cell is still Missing.
    #[error("Exporter: cell ({row}, {col}) is still Missing, run a nearest fill pass first")]
    UnfilledCell {
        /// Row of the first Missing cell
        row: usize,
        /// Column of the first Missing cell
        col: usize,
    },

    /// The output file could not be created.
    #[error("Exporter: cannot create {}: {source}", .path.display())]
    Io {
        /// Output path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Writing delimited rows failed.
    #[error("Exporter: {0}")]
    Csv(#[from] csv::Error),
}

/// How estimates are turned into integers at export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rounding {
    /// Drop the fractional part (toward zero)
    #[default]
    Truncate,
    /// Round half away from zero
    Nearest,
}

impl std::str::FromStr for Rounding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "truncate" => Ok(Rounding::Truncate),
            "nearest" => Ok(Rounding::Nearest),
            _ => Err(format!(
                "Invalid rounding: {}. Must be one of: truncate, nearest",
                s
            )),
        }
    }
}

impl std::fmt::Display for Rounding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rounding::Truncate => write!(f, "truncate"),
            Rounding::Nearest => write!(f, "nearest"),
        }
    }
}

impl Rounding {
    /// Convert a single value.
    pub fn apply(&self, value: f64) -> i64 {
        match self {
            Rounding::Truncate => value.trunc() as i64,
            Rounding::Nearest => value.round() as i64,
        }
    }
}

/// Convert a complete grid to integers.
///
/// # Errors
///
/// `ExportError::UnfilledCell` for the first Missing cell in row-major order.
pub fn to_integers(grid: &Grid, rounding: Rounding) -> Result<Array2<i64>, ExportError> {
    if let Some(&(row, col)) = grid.missing_positions().first() {
        return Err(ExportError::UnfilledCell { row, col });
    }
    Ok(grid.cells().mapv(|cell| rounding.apply(cell.unwrap_or_default())))
}

/// Write a complete grid to `writer`, one `;`-delimited row per line.
pub fn write_grid<W: Write>(writer: W, grid: &Grid, rounding: Rounding) -> Result<(), ExportError> {
    let values = to_integers(grid, rounding)?;
    let mut csv_writer = WriterBuilder::new()
        .delimiter(adapter_loader::DELIMITER)
        .has_headers(false)
        .from_writer(writer);

    for row in values.rows() {
        csv_writer.write_record(row.iter().map(|v| v.to_string()))?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write a complete grid to the file at `path`.
pub fn export_grid(path: &Path, grid: &Grid, rounding: Rounding) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_grid(BufWriter::new(file), grid, rounding)?;
    tracing::debug!(path = %path.display(), %rounding, "exported grid");
    Ok(())
}
