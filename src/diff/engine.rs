use tracing::debug;

use crate::tree::{Tree, TreeBuildError, TryIntoTree};

use super::{PatchOperation, diff_trees};

/// Keeps the most recently materialized tree and diffs each new request
/// against it.
///
/// Calls take `&mut self`, so one engine serves one build generation at a
/// time. A failed call leaves the retained tree untouched.
#[derive(Debug, Clone, Default)]
pub struct MirrorEngine {
    current: Tree,
}

impl MirrorEngine {
    /// An engine whose mirror starts out empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine that treats `initial` as already materialized. No operations
    /// are produced for it.
    pub fn seeded(initial: impl TryIntoTree) -> Result<Self, TreeBuildError> {
        let current = initial.try_into_tree()?;
        debug!("Seeded mirror engine with {} files", current.len());
        Ok(Self { current })
    }

    pub fn from_tree(current: Tree) -> Self {
        Self { current }
    }

    /// The tree the mirror is expected to match right now.
    pub fn current(&self) -> &Tree {
        &self.current
    }

    pub fn into_current(self) -> Tree {
        self.current
    }

    /// Diffs `requested` against the retained tree and adopts it.
    ///
    /// Returns removals (post-order over the old tree) followed by additions
    /// (pre-order over the requested tree). Replaying them in order against a
    /// mirror of [`MirrorEngine::current`] yields a mirror of `requested`.
    pub fn calculate_patch(
        &mut self,
        requested: impl TryIntoTree,
    ) -> Result<Vec<PatchOperation>, TreeBuildError> {
        let requested = requested.try_into_tree()?;
        let operations = diff_trees(&self.current, &requested);

        debug!(
            "Adopting requested tree with {} files ({} operations)",
            requested.len(),
            operations.len()
        );
        self.current = requested;

        Ok(operations)
    }
}
