//! Validated relative paths and the snapshots built from them.
//!
//! A snapshot lists exactly the files a mirror should contain. Directories
//! are never listed; they are implied by the paths' prefixes.

mod relative_path;
#[allow(clippy::module_inception)]
mod snapshot;

pub use relative_path::{PathValidationError, RelativePath, SEPARATOR};
pub use snapshot::Snapshot;
