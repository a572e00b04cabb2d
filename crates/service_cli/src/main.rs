//! radar-composite - Command Line Radar Grid Fusion
//!
//! Operational entry point for the composite pipeline.
//!
//! # Commands
//!
//! - `radar-composite run --left <file> --right <file>` - Fuse two grids and fill the gaps
//! - `radar-composite fill --input <file>` - Sanitize and gap-fill a single grid
//! - `radar-composite inspect --input <file>` - Report shape, counts and value range
//!
//! # Configuration
//!
//! Settings are layered: defaults, then the TOML file given with `--config`,
//! then `RADAR_*` environment variables, then command-line flags.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use composite_core::InterpolationMethod;
use service_cli::config::{build_config, CliArgs, PipelineConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

/// Radar grid fusion and gap filling
#[derive(Parser)]
#[command(name = "radar-composite")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(flatten)]
    range: RangeArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Valid-range overrides shared by every command
#[derive(Args)]
struct RangeArgs {
    /// Lowest valid measurement (inclusive)
    #[arg(long, global = true, allow_negative_numbers = true)]
    fmin: Option<f64>,

    /// Highest valid measurement (inclusive)
    #[arg(long, global = true, allow_negative_numbers = true)]
    fmax: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fuse two grids, fill the gaps and write every artifact
    Run {
        /// Left input grid (`;`-delimited integers)
        #[arg(short, long)]
        left: PathBuf,

        /// Right input grid (`;`-delimited integers)
        #[arg(short, long)]
        right: PathBuf,

        /// Skip the 2x2 minimum filter after compositing
        #[arg(long)]
        no_smooth: bool,

        /// Draw cells equal to fmin as background
        #[arg(long)]
        no_plot_zero: bool,

        /// Skip PGM snapshots
        #[arg(long)]
        no_render: bool,

        /// Fill passes in order (linear, nearest, cubic)
        #[arg(short, long = "method", value_delimiter = ',')]
        methods: Vec<InterpolationMethod>,

        /// Directory receiving the artifacts
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Sanitize and gap-fill a single grid
    Fill {
        /// Input grid (`;`-delimited integers)
        #[arg(short, long)]
        input: PathBuf,

        /// Fill passes in order (linear, nearest, cubic)
        #[arg(short, long = "method", value_delimiter = ',')]
        methods: Vec<InterpolationMethod>,

        /// Output file [default: <output_dir>/final.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report shape, valid/missing counts and value range after sanitizing
    Inspect {
        /// Input grid (`;`-delimited integers)
        #[arg(short, long)]
        input: PathBuf,
    },
}

impl Cli {
    fn config_args(&self) -> CliArgs {
        let mut args = CliArgs {
            config_file: self.config.clone(),
            fmin: self.range.fmin,
            fmax: self.range.fmax,
            log_level: self.log_level.clone(),
            ..Default::default()
        };
        match &self.command {
            Commands::Run {
                no_smooth,
                no_plot_zero,
                no_render,
                methods,
                output_dir,
                ..
            } => {
                args.no_smooth = *no_smooth;
                args.no_plot_zero = *no_plot_zero;
                args.no_render = *no_render;
                args.fill_methods = (!methods.is_empty()).then(|| methods.clone());
                args.output_dir = output_dir.clone();
            }
            Commands::Fill { methods, .. } => {
                args.fill_methods = (!methods.is_empty()).then(|| methods.clone());
            }
            Commands::Inspect { .. } => {}
        }
        args
    }
}

fn init_tracing(config: &PipelineConfig) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_filter_str())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Build configuration from file, environment and flags
    let config = build_config(&cli.config_args())?;

    // Initialise tracing
    init_tracing(&config);
    info!(log_level = %config.log_level, "configuration loaded");

    match cli.command {
        Commands::Run { left, right, .. } => commands::run::run(&left, &right, &config)?,
        Commands::Fill { input, output, .. } => {
            let output = output.unwrap_or_else(|| {
                config.output_dir.join(service_cli::pipeline::FINAL_CSV)
            });
            commands::fill::run(&input, &config.fill_methods, &output, &config)?
        }
        Commands::Inspect { input } => commands::inspect::run(&input, &config)?,
    }
    Ok(())
}
