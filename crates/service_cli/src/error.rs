//! Error types for the radar-composite CLI

use std::path::PathBuf;

use adapter_loader::LoaderError;
use composite_core::FusionError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::export::ExportError;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input grid could not be read
    #[error(transparent)]
    Loader(#[from] LoaderError),

    /// A fusion stage rejected its input
    #[error(transparent)]
    Fusion(#[from] FusionError),

    /// Final grid could not be exported
    #[error(transparent)]
    Export(#[from] ExportError),

    /// A snapshot image could not be written
    #[error("Renderer: cannot write {}: {source}", .path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_errors_keep_their_prefix() {
        let err: CliError = FusionError::NoValidSamples { missing: 4 }.into();
        assert!(err.to_string().starts_with("GapFiller:"));

        let err: CliError = LoaderError::Empty.into();
        assert!(err.to_string().starts_with("Loader:"));

        let err: CliError = ExportError::UnfilledCell { row: 0, col: 1 }.into();
        assert!(err.to_string().starts_with("Exporter:"));
    }

    #[test]
    fn test_config_error_conversion() {
        let err: CliError = ConfigError::NoFillMethods.into();
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().contains("fill method"));
    }
}
