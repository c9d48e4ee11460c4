use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;

use derive_more::Display;
use snafu::{Snafu, ensure};

use crate::snapshot::{RelativePath, SEPARATOR};
use crate::tree::Tree;

use super::PatchExecutor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MirrorEntry {
    #[display("file")]
    File,
    #[display("directory")]
    Directory,
}

/// An in-memory destination that enforces the executor contract: `mkdir` and
/// `create` need an existing parent directory and a free name, `rmdir` needs
/// an empty directory, `unlink` needs an existing file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryMirror {
    entries: BTreeMap<RelativePath, MirrorEntry>,
}

impl MemoryMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mirror that already holds every file and directory of `tree`.
    pub fn from_tree(tree: &Tree) -> Self {
        let mut entries = BTreeMap::new();
        for directory in tree.directories() {
            entries.insert(directory, MirrorEntry::Directory);
        }
        for file in tree.files() {
            entries.insert(file, MirrorEntry::File);
        }
        Self { entries }
    }

    pub fn entry(&self, path: &RelativePath) -> Option<MirrorEntry> {
        self.entries.get(path).copied()
    }

    pub fn files(&self) -> BTreeSet<RelativePath> {
        self.paths_of(MirrorEntry::File)
    }

    pub fn directories(&self) -> BTreeSet<RelativePath> {
        self.paths_of(MirrorEntry::Directory)
    }

    /// Whether the mirror holds exactly the files and directories of `tree`.
    pub fn matches(&self, tree: &Tree) -> bool {
        self.files() == tree.files().into_iter().collect()
            && self.directories() == tree.directories().into_iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn paths_of(&self, kind: MirrorEntry) -> BTreeSet<RelativePath> {
        self.entries
            .iter()
            .filter(|(_, entry)| **entry == kind)
            .map(|(path, _)| path.clone())
            .collect()
    }

    fn ensure_parent(&self, path: &RelativePath) -> Result<(), MirrorError> {
        let Some(parent) = path.parent() else {
            return Ok(());
        };
        match self.entry(&parent) {
            Some(MirrorEntry::Directory) => Ok(()),
            Some(MirrorEntry::File) => KindMismatchSnafu {
                path: parent,
                expected: MirrorEntry::Directory,
            }
            .fail(),
            None => ParentMissingSnafu { path: path.clone() }.fail(),
        }
    }

    fn ensure_kind(&self, path: &RelativePath, expected: MirrorEntry) -> Result<(), MirrorError> {
        match self.entry(path) {
            Some(found) if found == expected => Ok(()),
            Some(_) => KindMismatchSnafu {
                path: path.clone(),
                expected,
            }
            .fail(),
            None => NotFoundSnafu { path: path.clone() }.fail(),
        }
    }

    fn insert(&mut self, path: &RelativePath, entry: MirrorEntry) -> Result<(), MirrorError> {
        self.ensure_parent(path)?;
        ensure!(
            !self.entries.contains_key(path),
            AlreadyExistsSnafu { path: path.clone() }
        );
        self.entries.insert(path.clone(), entry);
        Ok(())
    }
}

impl PatchExecutor for MemoryMirror {
    type Error = MirrorError;

    fn mkdir(&mut self, path: &RelativePath) -> Result<(), Self::Error> {
        self.insert(path, MirrorEntry::Directory)
    }

    fn rmdir(&mut self, path: &RelativePath) -> Result<(), Self::Error> {
        self.ensure_kind(path, MirrorEntry::Directory)?;
        // Descendants sort contiguously right after `path/`
        let prefix = format!("{path}{SEPARATOR}");
        let occupied = self
            .entries
            .range::<str, _>((Bound::Included(prefix.as_str()), Bound::Unbounded))
            .next()
            .is_some_and(|(candidate, _)| path.is_ancestor_of(candidate));
        ensure!(!occupied, NotEmptySnafu { path: path.clone() });
        self.entries.remove(path);
        Ok(())
    }

    fn create(&mut self, path: &RelativePath) -> Result<(), Self::Error> {
        self.insert(path, MirrorEntry::File)
    }

    fn unlink(&mut self, path: &RelativePath) -> Result<(), Self::Error> {
        self.ensure_kind(path, MirrorEntry::File)?;
        self.entries.remove(path);
        Ok(())
    }
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum MirrorError {
    #[snafu(display("Cannot place '{}', its parent directory does not exist", path))]
    ParentMissing { path: RelativePath },
    #[snafu(display("Cannot place '{}', the name is already taken", path))]
    AlreadyExists { path: RelativePath },
    #[snafu(display("Nothing exists at '{}'", path))]
    NotFound { path: RelativePath },
    #[snafu(display("Directory '{}' is not empty", path))]
    NotEmpty { path: RelativePath },
    #[snafu(display("Expected '{}' to be a {}", path, expected))]
    KindMismatch {
        path: RelativePath,
        expected: MirrorEntry,
    },
}
