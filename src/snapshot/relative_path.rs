use std::{borrow::Borrow, path::Path, str::FromStr};

use derive_more::Display;
use snafu::Snafu;

/// Canonical separator between path segments.
pub const SEPARATOR: char = '/';

const CURRENT_DIR: &str = ".";
const PARENT_DIR: &str = "..";

/// A normalized, validated path relative to the mirror root.
///
/// Equality is equality of the normalized segment sequence, so `a//b` and
/// `./a/b` compare equal to `a/b`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub struct RelativePath(String);

impl RelativePath {
    pub fn parse(raw: &str) -> Result<Self, PathValidationError> {
        if raw.is_empty() {
            return EmptySnafu.fail();
        }
        if raw.starts_with(SEPARATOR) || Path::new(raw).is_absolute() {
            return AbsoluteSnafu { path: raw }.fail();
        }
        if raw.ends_with(SEPARATOR) {
            return DirectoryEntrySnafu { path: raw }.fail();
        }

        let mut segments = Vec::new();
        for segment in raw.split(SEPARATOR) {
            match segment {
                "" | CURRENT_DIR => continue,
                PARENT_DIR => return TraversalSnafu { path: raw }.fail(),
                segment => segments.push(segment),
            }
        }

        if segments.is_empty() {
            return EmptySnafu.fail();
        }

        Ok(Self(segments.join("/")))
    }

    /// Path of the entry `name` directly inside `parent`, or at the root when
    /// there is no parent. `name` must already be a single valid segment.
    pub(crate) fn child_of(parent: Option<&RelativePath>, name: &str) -> Self {
        match parent {
            Some(parent) => Self(format!("{}{}{}", parent.0, SEPARATOR, name)),
            None => Self(name.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR)
    }

    /// Number of segments; root-level entries have depth 1.
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    pub fn file_name(&self) -> &str {
        match self.0.rsplit_once(SEPARATOR) {
            Some((_, name)) => name,
            None => &self.0,
        }
    }

    /// The containing directory, `None` for entries at the mirror root.
    pub fn parent(&self) -> Option<RelativePath> {
        self.0
            .rsplit_once(SEPARATOR)
            .map(|(parent, _)| Self(parent.to_owned()))
    }

    /// Whether `self` is a strict ancestor directory of `other`.
    pub fn is_ancestor_of(&self, other: &RelativePath) -> bool {
        other
            .0
            .strip_prefix(self.0.as_str())
            .is_some_and(|rest| rest.starts_with(SEPARATOR))
    }
}

impl AsRef<str> for RelativePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Ordering and hashing match the inner string, so maps keyed by paths can be
// queried with plain prefixes.
impl Borrow<str> for RelativePath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for RelativePath {
    type Err = PathValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

impl TryFrom<&str> for RelativePath {
    type Error = PathValidationError;

    fn try_from(raw: &str) -> Result<Self, Self::Error> {
        Self::parse(raw)
    }
}

impl TryFrom<String> for RelativePath {
    type Error = PathValidationError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum PathValidationError {
    #[snafu(display("Path must not be empty"))]
    Empty,
    #[snafu(display("Path '{}' is absolute", path))]
    Absolute { path: String },
    #[snafu(display("Path '{}' contains a parent-traversal segment", path))]
    Traversal { path: String },
    #[snafu(display("Path '{}' names a directory, only files may be listed", path))]
    DirectoryEntry { path: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("foo.js", "foo.js")]
    #[case("bar/baz.js", "bar/baz.js")]
    #[case("bar//baz.js", "bar/baz.js")]
    #[case("./bar/baz.js", "bar/baz.js")]
    #[case("bar/./quz/baz.js", "bar/quz/baz.js")]
    #[case("...", "...")]
    #[case("..foo/bar", "..foo/bar")]
    fn parse_normalizes_segments(#[case] raw: &str, #[case] expected: &str) {
        let path = RelativePath::parse(raw).expect("path should be valid");
        assert_eq!(path.as_str(), expected);
    }

    #[rstest]
    #[case("", PathValidationError::Empty)]
    #[case(".", PathValidationError::Empty)]
    #[case("./.", PathValidationError::Empty)]
    #[case("/etc/passwd", PathValidationError::Absolute { path: "/etc/passwd".into() })]
    #[case("../outside.js", PathValidationError::Traversal { path: "../outside.js".into() })]
    #[case("bar/../../baz.js", PathValidationError::Traversal { path: "bar/../../baz.js".into() })]
    #[case("bar/..", PathValidationError::Traversal { path: "bar/..".into() })]
    #[case("bar/", PathValidationError::DirectoryEntry { path: "bar/".into() })]
    fn parse_rejects_invalid_paths(#[case] raw: &str, #[case] expected: PathValidationError) {
        assert_eq!(RelativePath::parse(raw), Err(expected));
    }

    #[test]
    fn equal_segment_sequences_are_equal_paths() {
        let a: RelativePath = "bar//quz/./baz.js".parse().unwrap();
        let b: RelativePath = "bar/quz/baz.js".parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn parent_and_file_name() {
        let path = RelativePath::parse("bar/quz/baz.js").unwrap();
        assert_eq!(path.file_name(), "baz.js");
        assert_eq!(path.depth(), 3);
        assert_eq!(
            path.parent().map(|p| p.to_string()),
            Some("bar/quz".to_string())
        );

        let root_level = RelativePath::parse("foo.js").unwrap();
        assert_eq!(root_level.file_name(), "foo.js");
        assert_eq!(root_level.parent(), None);
    }

    #[rstest]
    #[case("bar", "bar/baz.js", true)]
    #[case("bar", "bar/quz/baz.js", true)]
    #[case("bar", "bar", false)]
    #[case("bar", "barn/baz.js", false)]
    #[case("bar/quz", "bar/baz.js", false)]
    fn ancestry(#[case] ancestor: &str, #[case] descendant: &str, #[case] expected: bool) {
        let ancestor = RelativePath::parse(ancestor).unwrap();
        let descendant = RelativePath::parse(descendant).unwrap();
        assert_eq!(ancestor.is_ancestor_of(&descendant), expected);
    }

    #[test]
    fn child_of_joins_with_separator() {
        let parent = RelativePath::parse("bar").unwrap();
        assert_eq!(
            RelativePath::child_of(Some(&parent), "baz.js").as_str(),
            "bar/baz.js"
        );
        assert_eq!(RelativePath::child_of(None, "foo.js").as_str(), "foo.js");
    }
}
