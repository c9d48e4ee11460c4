use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;

/// Prints the operations that keep a mirror directory in step with a
/// sequence of file listings.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// YAML manifests listing each generation's files, oldest first
    #[clap(required = true)]
    pub manifests: Vec<PathBuf>,

    /// Treat the first manifest as already materialized
    #[clap(long)]
    pub seed: bool,

    /// Replay every patch against an in-memory mirror and check the outcome
    #[clap(long)]
    pub verify: bool,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,
}
