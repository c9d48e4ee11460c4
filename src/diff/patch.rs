use std::fmt;

use derive_more::Display;

use crate::snapshot::RelativePath;

/// Kind of structural change a patch operation performs.
///
/// The display names are the fixed vocabulary executors match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatchKind {
    Mkdir,
    Rmdir,
    Create,
    Unlink,
}

impl fmt::Display for PatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatchKind::Mkdir => "mkdir",
            PatchKind::Rmdir => "rmdir",
            PatchKind::Create => "create",
            PatchKind::Unlink => "unlink",
        }
    }

    /// Removals are always emitted before any addition.
    pub fn is_removal(&self) -> bool {
        matches!(self, PatchKind::Rmdir | PatchKind::Unlink)
    }

    pub fn is_addition(&self) -> bool {
        !self.is_removal()
    }

    pub fn is_directory_kind(&self) -> bool {
        matches!(self, PatchKind::Mkdir | PatchKind::Rmdir)
    }
}

/// A single required change: a kind applied to a path relative to the
/// mirror root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{kind} {path}")]
pub struct PatchOperation {
    kind: PatchKind,
    path: RelativePath,
}

impl PatchOperation {
    pub fn new(kind: PatchKind, path: RelativePath) -> Self {
        Self { kind, path }
    }

    pub fn mkdir(path: RelativePath) -> Self {
        Self::new(PatchKind::Mkdir, path)
    }

    pub fn rmdir(path: RelativePath) -> Self {
        Self::new(PatchKind::Rmdir, path)
    }

    pub fn create(path: RelativePath) -> Self {
        Self::new(PatchKind::Create, path)
    }

    pub fn unlink(path: RelativePath) -> Self {
        Self::new(PatchKind::Unlink, path)
    }

    pub fn kind(&self) -> PatchKind {
        self.kind
    }

    pub fn path(&self) -> &RelativePath {
        &self.path
    }

    /// The `(kind, path)` pair form executors consume.
    pub fn as_pair(&self) -> (&'static str, &str) {
        (self.kind.as_str(), self.path.as_str())
    }

    pub fn into_parts(self) -> (PatchKind, RelativePath) {
        (self.kind, self.path)
    }
}
