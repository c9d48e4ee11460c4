use std::{borrow::Cow, path::Path};

use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::debug;

use crate::ext::BestEffortPathExt;
use crate::tree::{Tree, TreeBuildError, TryIntoTree};

const FILES_KEY: &str = "files";

/// An ordered file listing loaded from a YAML manifest:
///
/// ```yaml
/// files:
///   - bar/baz.js
///   - foo.js
/// ```
///
/// Entries are kept as written; validation happens when the manifest is
/// turned into a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathManifest {
    files: Vec<String>,
}

impl PathManifest {
    pub async fn read(path: &Path) -> Result<Self, ManifestError> {
        debug!("Reading manifest: {}", path.best_effort_path_display());
        let bytes = compio::fs::read(path).await.context(ReadSnafu {
            file_path: path.best_effort_path_display(),
        })?;
        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            file_path: path.best_effort_path_display(),
        })?;

        let manifest = Self::try_from(contents.as_str())?;
        debug!("Manifest lists {} files", manifest.files.len());
        Ok(manifest)
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    fn parse_files(node: &Yaml) -> Result<Vec<String>, ManifestError> {
        node.as_sequence()
            .context(FilesNotSequenceSnafu)?
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item.as_str()
                    .map(str::to_owned)
                    .context(NonStringEntrySnafu { index })
            })
            .collect()
    }
}

impl TryFrom<&str> for PathManifest {
    type Error = ManifestError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let document = documents.first().context(MalformedManifestSnafu)?;
        let top_level = document.as_mapping().context(TopLevelNotMapSnafu)?;

        let files = match top_level.get(&Yaml::Value(Scalar::String(Cow::Borrowed(FILES_KEY)))) {
            Some(node) => Self::parse_files(node)?,
            None => {
                debug!("Manifest has no '{}' section, treating it as empty", FILES_KEY);
                Vec::new()
            }
        };

        Ok(PathManifest { files })
    }
}

impl TryIntoTree for &PathManifest {
    fn try_into_tree(self) -> Result<Tree, TreeBuildError> {
        Tree::build(&self.files)
    }
}

impl TryIntoTree for PathManifest {
    fn try_into_tree(self) -> Result<Tree, TreeBuildError> {
        Tree::build(self.files)
    }
}

#[derive(Debug, Snafu)]
pub enum ManifestError {
    #[snafu(display("Failed to read the manifest: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Manifest {} is not valid UTF-8", file_path))]
    EncodingError {
        file_path: String,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to parse the manifest"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted manifest"))]
    MalformedManifest,
    #[snafu(display("Top level of the manifest should be a map"))]
    TopLevelNotMap,
    #[snafu(display("The '{}' section should be a list", FILES_KEY))]
    FilesNotSequence,
    #[snafu(display("Entry {} of the '{}' section is not a string", index, FILES_KEY))]
    NonStringEntry { index: usize },
}
