use snafu::Snafu;
use snafu::prelude::*;
use tracing::debug;
use tracing::info;
use treemirror::manifest::{ManifestError, PathManifest};
use treemirror::replay::MirrorError;
use treemirror::{MemoryMirror, MirrorEngine, TreeBuildError, apply_patch};

use crate::application::{PatchPrinter, RuntimeConfig};

pub struct Application;

impl Application {
    pub async fn run(runtime_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let runtime_config: RuntimeConfig = runtime_config.into();
        Self::run_with_printer(runtime_config, PatchPrinter::detect()).await?;
        Ok(())
    }

    async fn run_with_printer(
        runtime_config: RuntimeConfig,
        printer: PatchPrinter,
    ) -> Result<Vec<Vec<String>>, ApplicationError> {
        let mut generations = Vec::with_capacity(runtime_config.manifests.len());
        for path in &runtime_config.manifests {
            let manifest = PathManifest::read(path)
                .await
                .context(ManifestLoadSnafu)?;
            generations.push((path.display().to_string(), manifest));
        }
        debug!("Loaded {} manifests", generations.len());

        let mut generations = generations.into_iter();
        let mut engine = MirrorEngine::new();
        if runtime_config.seed {
            if let Some((name, manifest)) = generations.next() {
                engine = MirrorEngine::seeded(&manifest).context(SeedSnafu { manifest: &name })?;
                info!("Seeded mirror from {} ({} files)", name, engine.current().len());
            }
        }

        let mut mirror = MemoryMirror::from_tree(engine.current());
        let mut printed = Vec::new();

        for (name, manifest) in generations {
            let patch = engine
                .calculate_patch(&manifest)
                .context(PatchSnafu { manifest: &name })?;
            info!("{} needs {} operations", name, patch.len());

            if runtime_config.verify {
                apply_patch(&mut mirror, &patch).context(ReplaySnafu { manifest: &name })?;
                ensure!(
                    mirror.matches(engine.current()),
                    VerificationSnafu { manifest: &name }
                );
                debug!("Verified patch for {}", name);
            }

            let lines = printer.render(&name, &patch);
            for line in &lines {
                println!("{line}");
            }
            printed.push(lines);
        }

        Ok(printed)
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while loading manifests"))]
    ManifestLoadError { source: ManifestError },
    #[snafu(display("Failed to seed the mirror from {}", manifest))]
    SeedError {
        manifest: String,
        source: TreeBuildError,
    },
    #[snafu(display("Failed to calculate the patch for {}", manifest))]
    PatchError {
        manifest: String,
        source: TreeBuildError,
    },
    #[snafu(display("The patch for {} could not be replayed", manifest))]
    ReplayError {
        manifest: String,
        source: MirrorError,
    },
    #[snafu(display("Replaying the patch for {} did not reproduce its listing", manifest))]
    VerificationError { manifest: String },
}
