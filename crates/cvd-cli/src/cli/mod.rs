use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `cvd` binary.
#[derive(Debug, Parser)]
#[command(
    name = "cvd",
    version,
    about = "Cardiovascular disease risk predictor"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Encoder artifact (overrides `artifacts.encoders_path`)
    #[arg(long, global = true, value_name = "PATH")]
    pub encoders: Option<PathBuf>,

    /// Classifier artifact (overrides `artifacts.model_path`)
    #[arg(long, global = true, value_name = "PATH")]
    pub model: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            encoders: self.encoders.clone(),
            model: self.model.clone(),
        }
    }
}
