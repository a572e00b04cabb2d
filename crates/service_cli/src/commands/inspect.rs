//! Inspect command implementation

use std::path::Path;

use service_cli::config::PipelineConfig;
use service_cli::pipeline::{load_sanitized, GridReport};
use service_cli::Result;

/// Run the inspect command
pub fn run(input: &Path, config: &PipelineConfig) -> Result<()> {
    let grid = load_sanitized(input, config)?;
    println!("{}: {}", input.display(), GridReport::of(&grid));
    Ok(())
}
