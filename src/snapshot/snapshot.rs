use hashlink::LinkedHashSet;
use tracing::debug;

use super::{PathValidationError, RelativePath};

/// The caller-declared set of files that should exist, in the order they were
/// listed. Repeated paths collapse onto their first occurrence.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    paths: LinkedHashSet<RelativePath>,
}

impl Snapshot {
    /// Validates every path before accepting any of them, so a bad entry
    /// anywhere in the list yields no snapshot at all.
    pub fn try_from_paths<I, S>(paths: I) -> Result<Self, PathValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut validated = LinkedHashSet::new();
        let mut listed = 0usize;

        for raw in paths {
            listed += 1;
            let path = RelativePath::parse(raw.as_ref())?;
            // Re-inserting would move the path to the back
            if !validated.contains(&path) {
                validated.insert(path);
            }
        }

        if validated.len() != listed {
            debug!(
                "Collapsed {} duplicate paths in snapshot",
                listed - validated.len()
            );
        }

        Ok(Self { paths: validated })
    }

    pub fn paths(&self) -> impl Iterator<Item = &RelativePath> {
        self.paths.iter()
    }

    pub fn contains(&self, path: &RelativePath) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
