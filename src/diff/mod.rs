//! Tree differencing.
//!
//! [`MirrorEngine`] retains the last materialized tree and turns each new
//! request into an ordered list of [`PatchOperation`]s for an executor to
//! replay.

mod calculate;
mod engine;
mod patch;

pub use calculate::diff_trees;
pub use engine::MirrorEngine;
pub use patch::{PatchKind, PatchOperation};
