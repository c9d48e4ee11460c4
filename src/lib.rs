//! Keeps a destination directory tree in step with a declared set of files.
//!
//! Each build generation hands the [`MirrorEngine`] the relative paths that
//! should exist. The engine infers the implied directories, diffs them against
//! the previous generation and returns the `unlink`/`rmdir`/`mkdir`/`create`
//! operations, in a replayable order, that bring a mirror up to date. Doing
//! the I/O is left to a [`PatchExecutor`].
//!
//! ```
//! use treemirror::MirrorEngine;
//!
//! let mut engine = MirrorEngine::new();
//! let patch = engine.calculate_patch(["bar/baz.js", "foo.js"]).unwrap();
//! let lines: Vec<String> = patch.iter().map(ToString::to_string).collect();
//! assert_eq!(lines, ["mkdir bar", "create foo.js", "create bar/baz.js"]);
//! ```

#![allow(clippy::enum_variant_names)]

pub mod diff;
pub mod ext;
pub mod manifest;
pub mod replay;
pub mod snapshot;
pub mod tree;

pub use diff::{MirrorEngine, PatchKind, PatchOperation};
pub use replay::{MemoryMirror, PatchExecutor, apply_patch};
pub use snapshot::{PathValidationError, RelativePath, Snapshot};
pub use tree::{Tree, TreeBuildError, TreeNode, TryIntoTree};
