//! Replaying patches against a destination.
//!
//! [`PatchExecutor`] is the seam where real storage plugs in; [`MemoryMirror`]
//! is an in-memory executor used to check that a patch is valid and sound.

mod executor;
mod memory_mirror;

pub use executor::{PatchExecutor, apply_patch};
pub use memory_mirror::{MemoryMirror, MirrorEntry, MirrorError};
