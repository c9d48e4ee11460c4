//! YAML file listings that feed the engine one generation at a time.

mod path_manifest;

pub use path_manifest::{ManifestError, PathManifest};
