//! Renderer: greyscale portable graymap (PGM) snapshots of a grid.
//!
//! Valid values map linearly onto grey levels `1..=255` over `[vmin, vmax]`
//! (clamped). Level 0 is the background used for Missing cells.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use composite_core::Grid;
use ndarray::Array2;

/// Colour scale and masking for a rendered grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Value drawn at the darkest data level
    pub vmin: f64,
    /// Value drawn at full white
    pub vmax: f64,
    /// When false, cells equal to `vmin` are drawn as background
    pub plot_zero: bool,
}

impl RenderOptions {
    /// Scale over `[vmin, vmax]`, drawing every valid cell.
    pub fn new(vmin: f64, vmax: f64) -> Self {
        Self {
            vmin,
            vmax,
            plot_zero: true,
        }
    }

    /// Set whether cells equal to `vmin` are drawn.
    pub fn with_plot_zero(mut self, plot_zero: bool) -> Self {
        self.plot_zero = plot_zero;
        self
    }

    fn level(&self, cell: Option<f64>) -> u8 {
        let Some(v) = cell else {
            return 0;
        };
        if !self.plot_zero && v == self.vmin {
            return 0;
        }
        if self.vmax <= self.vmin {
            return u8::MAX;
        }
        let t = ((v - self.vmin) / (self.vmax - self.vmin)).clamp(0.0, 1.0);
        1 + (t * 254.0).round() as u8
    }
}

/// Map every cell to a grey level.
pub fn to_gray(grid: &Grid, options: &RenderOptions) -> Array2<u8> {
    grid.cells().mapv(|cell| options.level(cell))
}

/// Write grey levels as a binary (P5) PGM image.
pub fn write_pgm<W: Write>(mut writer: W, gray: &Array2<u8>) -> io::Result<()> {
    let (rows, cols) = gray.dim();
    write!(writer, "P5\n{} {}\n255\n", cols, rows)?;
    let bytes: Vec<u8> = gray.iter().copied().collect();
    writer.write_all(&bytes)?;
    writer.flush()
}

/// Render `grid` to a PGM file at `path`.
pub fn render_grid(path: &Path, grid: &Grid, options: &RenderOptions) -> io::Result<()> {
    let file = File::create(path)?;
    write_pgm(BufWriter::new(file), &to_gray(grid, options))?;
    tracing::debug!(path = %path.display(), "rendered grid");
    Ok(())
}
