//! Fill command implementation
//!
//! Sanitizes and gap-fills a single grid file.

use std::path::Path;

use composite_core::InterpolationMethod;
use service_cli::config::PipelineConfig;
use service_cli::export::export_grid;
use service_cli::pipeline::{fill_grid, load_sanitized};
use service_cli::Result;
use tracing::info;

/// Run the fill command
pub fn run(
    input: &Path,
    methods: &[InterpolationMethod],
    output: &Path,
    config: &PipelineConfig,
) -> Result<()> {
    info!("Starting fill...");
    info!("  Input: {}", input.display());
    info!("  Output: {}", output.display());

    let mut grid = load_sanitized(input, config)?;
    let passes = fill_grid(&mut grid, methods)?;
    for pass in &passes {
        println!(
            "{:<8} filled {:>6}  residual {:>6}",
            pass.method, pass.filled, pass.residual
        );
    }

    export_grid(output, &grid, config.rounding)?;
    info!("Fill complete");
    Ok(())
}
