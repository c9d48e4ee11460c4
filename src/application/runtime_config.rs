use std::path::PathBuf;

use crate::cli::Cli;

/// Settings for one run, fixed once the command line has been parsed.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub manifests: Vec<PathBuf>,
    pub seed: bool,
    pub verify: bool,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            manifests: cli.manifests,
            seed: cli.seed,
            verify: cli.verify,
        }
    }
}
