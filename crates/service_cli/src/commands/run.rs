//! Run command implementation
//!
//! Fuses two grid files and writes every pipeline artifact.

use std::path::Path;

use service_cli::config::PipelineConfig;
use service_cli::pipeline::run_pipeline;
use service_cli::Result;
use tracing::info;

/// Run the run command
pub fn run(left: &Path, right: &Path, config: &PipelineConfig) -> Result<()> {
    info!("Starting composite run...");
    info!("  Left: {}", left.display());
    info!("  Right: {}", right.display());
    info!("  Valid range: [{}, {}]", config.fmin, config.fmax);
    info!("  Smoothing: {}", config.smooth);
    info!(
        "  Fill passes: {}",
        config
            .fill_methods
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(" -> ")
    );

    let outcome = run_pipeline(left, right, config)?;

    info!(
        "Composite {}x{}: {} cell(s) Missing before fill, {} after",
        outcome.shape.0,
        outcome.shape.1,
        outcome.missing_before_fill,
        outcome.residual()
    );
    for artifact in &outcome.artifacts {
        println!("{}", artifact.display());
    }

    info!("Run complete");
    Ok(())
}
