//! Pipeline driver: Loader → Sanitizer → Compositor → GapFiller → outputs.
//!
//! Every stage owns the grid it produces. Fill passes run in the configured
//! order, each one operating on the previous pass's result.

use std::path::{Path, PathBuf};

use composite_core::{
    composite, fill_in_place, sanitize_with, FillSummary, Grid, InterpolationMethod,
};
use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::error::{CliError, Result};
use crate::export::export_grid;
use crate::render::{render_grid, RenderOptions};

/// Snapshot of the left input after sanitizing.
pub const RAW_LEFT: &str = "raw_left.pgm";
/// Snapshot of the right input after sanitizing.
pub const RAW_RIGHT: &str = "raw_right.pgm";
/// Snapshot of the composite before filling.
pub const COMPOSITE_NOFILL: &str = "simple_composite_nofill.pgm";
/// Snapshot of the composite after every fill pass.
pub const COMPOSITE_FILL: &str = "simple_composite_fill.pgm";
/// Exported integer grid.
pub const FINAL_CSV: &str = "final.csv";

/// What a full pipeline run produced.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// Shape of the composite
    pub shape: (usize, usize),
    /// Missing cells in the composite before any fill pass
    pub missing_before_fill: usize,
    /// One entry per fill pass, in order
    pub passes: Vec<FillSummary>,
    /// Every file written, in order
    pub artifacts: Vec<PathBuf>,
}

impl PipelineOutcome {
    /// Missing cells left after the last pass.
    pub fn residual(&self) -> usize {
        self.passes
            .last()
            .map_or(self.missing_before_fill, |pass| pass.residual)
    }
}

/// Shape, counts and value range of a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridReport {
    /// Rows
    pub rows: usize,
    /// Columns
    pub cols: usize,
    /// Valid cells
    pub valid: usize,
    /// Missing cells
    pub missing: usize,
    /// Smallest and largest valid value
    pub range: Option<(f64, f64)>,
}

impl GridReport {
    /// Summarise `grid`.
    pub fn of(grid: &Grid) -> Self {
        let (rows, cols) = grid.shape();
        Self {
            rows,
            cols,
            valid: grid.valid_count(),
            missing: grid.missing_count(),
            range: grid.value_range(),
        }
    }
}

impl std::fmt::Display for GridReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{} grid: {} valid, {} missing",
            self.rows, self.cols, self.valid, self.missing
        )?;
        match self.range {
            Some((lo, hi)) => write!(f, ", values in [{}, {}]", lo, hi),
            None => write!(f, ", no valid values"),
        }
    }
}

/// Load a grid file and sanitize it against the configured range.
pub fn load_sanitized(path: &Path, config: &PipelineConfig) -> Result<Grid> {
    let range = config.valid_range()?;
    let raw = adapter_loader::load_grid(path)?;
    let clean = sanitize_with(&raw, range);
    info!(
        path = %path.display(),
        rows = clean.rows(),
        cols = clean.cols(),
        rejected = clean.missing_count(),
        "loaded and sanitized grid"
    );
    Ok(clean)
}

/// Apply fill passes in order, each one on the previous pass's output.
///
/// A pass that leaves cells Missing is not an error; a `warn!` is emitted
/// only when the final pass still leaves cells behind.
pub fn fill_grid(grid: &mut Grid, methods: &[InterpolationMethod]) -> Result<Vec<FillSummary>> {
    let mut passes = Vec::with_capacity(methods.len());
    for (index, &method) in methods.iter().enumerate() {
        let summary = fill_in_place(grid, method)?;
        info!(
            pass = index + 1,
            %method,
            filled = summary.filled,
            residual = summary.residual,
            "fill pass complete"
        );
        passes.push(summary);
    }
    if let Some(last) = passes.last().filter(|pass| !pass.is_complete()) {
        warn!(
            residual = last.residual,
            method = %last.method,
            "cells still Missing after the final fill pass"
        );
    }
    Ok(passes)
}

fn render_to(
    dir: &Path,
    name: &str,
    grid: &Grid,
    options: &RenderOptions,
    artifacts: &mut Vec<PathBuf>,
) -> Result<()> {
    let path = dir.join(name);
    render_grid(&path, grid, options).map_err(|source| CliError::Render {
        path: path.clone(),
        source,
    })?;
    artifacts.push(path);
    Ok(())
}

fn render_options(config: &PipelineConfig) -> RenderOptions {
    RenderOptions::new(config.fmin, config.fmax).with_plot_zero(config.plot_zero)
}

/// Run the full pipeline on two input files.
pub fn run_pipeline(left: &Path, right: &Path, config: &PipelineConfig) -> Result<PipelineOutcome> {
    config.validate()?;

    let left_grid = load_sanitized(left, config)?;
    let right_grid = load_sanitized(right, config)?;

    let out = config.output_dir.as_path();
    std::fs::create_dir_all(out)?;
    let options = render_options(config);
    let mut artifacts = Vec::new();

    if config.render {
        render_to(out, RAW_LEFT, &left_grid, &options, &mut artifacts)?;
        render_to(out, RAW_RIGHT, &right_grid, &options, &mut artifacts)?;
    }

    let mut merged = composite(&left_grid, &right_grid, config.smooth)?;
    let missing_before_fill = merged.missing_count();
    info!(
        smooth = config.smooth,
        missing = missing_before_fill,
        "composite built"
    );

    if config.render {
        render_to(out, COMPOSITE_NOFILL, &merged, &options, &mut artifacts)?;
    }

    let passes = fill_grid(&mut merged, &config.fill_methods)?;

    if config.render {
        render_to(out, COMPOSITE_FILL, &merged, &options, &mut artifacts)?;
    }

    let csv_path = out.join(FINAL_CSV);
    export_grid(&csv_path, &merged, config.rounding)?;
    artifacts.push(csv_path);
    info!(artifacts = artifacts.len(), dir = %out.display(), "pipeline finished");

    Ok(PipelineOutcome {
        shape: merged.shape(),
        missing_before_fill,
        passes,
        artifacts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn ring(value: f64) -> Grid {
        Grid::new(array![
            [Some(value), Some(value), Some(value)],
            [Some(value), None, Some(value)],
            [Some(value), Some(value), Some(value)],
        ])
    }

    #[test]
    fn test_fill_grid_runs_passes_in_order() {
        let mut grid = Grid::new(array![
            [None, Some(2.0), Some(2.0)],
            [Some(2.0), None, Some(2.0)],
            [Some(2.0), Some(2.0), Some(2.0)],
        ]);
        let passes = fill_grid(
            &mut grid,
            &[InterpolationMethod::Linear, InterpolationMethod::Nearest],
        )
        .unwrap();
        assert_eq!(passes.len(), 2);
        assert_eq!(passes[0].method, InterpolationMethod::Linear);
        assert_eq!((passes[0].filled, passes[0].residual), (1, 1));
        assert_eq!((passes[1].filled, passes[1].residual), (1, 0));
        assert!(grid.is_complete());
    }

    #[test]
    fn test_fill_grid_complete_input() {
        let mut grid = ring(1.0);
        fill_grid(&mut grid, &[InterpolationMethod::Nearest]).unwrap();
        let passes = fill_grid(&mut grid, &[InterpolationMethod::Linear]).unwrap();
        assert_eq!(passes[0].filled, 0);
        assert!(passes[0].is_complete());
    }

    #[test]
    fn test_fill_grid_without_samples() {
        let mut grid = Grid::missing(2, 2);
        let err = fill_grid(&mut grid, &[InterpolationMethod::Linear]).unwrap_err();
        assert!(matches!(err, CliError::Fusion(_)));
    }

    #[test]
    fn test_grid_report() {
        let report = GridReport::of(&Grid::new(array![[Some(-3.0), None], [Some(7.0), None]]));
        assert_eq!((report.rows, report.cols), (2, 2));
        assert_eq!((report.valid, report.missing), (2, 2));
        assert_eq!(report.range, Some((-3.0, 7.0)));
        assert_eq!(
            report.to_string(),
            "2x2 grid: 2 valid, 2 missing, values in [-3, 7]"
        );

        let empty = GridReport::of(&Grid::missing(1, 3));
        assert_eq!(empty.to_string(), "1x3 grid: 0 valid, 3 missing, no valid values");
    }

    #[test]
    fn test_outcome_residual() {
        let outcome = PipelineOutcome {
            shape: (2, 2),
            missing_before_fill: 3,
            passes: Vec::new(),
            artifacts: Vec::new(),
        };
        assert_eq!(outcome.residual(), 3);
    }
}
