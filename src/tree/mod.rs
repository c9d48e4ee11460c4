//! Tree representation of a snapshot.
//!
//! This module turns a flat, ordered list of file paths into a hierarchy of
//! directories and files, where directories are synthesized from path
//! prefixes and siblings keep the order in which they were first seen.

mod node;
#[allow(clippy::module_inception)]
mod tree;

pub use node::{Children, TreeNode};
pub use tree::{Tree, TreeBuildError, TryIntoTree};
