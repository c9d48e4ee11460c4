use hashlink::linked_hash_map::RawEntryMut;
use snafu::{ResultExt, Snafu};
use tracing::debug;

use crate::snapshot::{PathValidationError, RelativePath, Snapshot};

use super::{Children, TreeNode};

/// The directory/file hierarchy implied by a snapshot.
///
/// Only files are ever inserted; directory nodes are synthesized from path
/// prefixes the first time they are seen, and every level keeps its entries
/// in that first-encounter order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tree {
    root: Children,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tree from raw relative paths.
    pub fn build<I, S>(paths: I) -> Result<Self, TreeBuildError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let snapshot = Snapshot::try_from_paths(paths).context(ValidationSnafu)?;
        Self::from_snapshot(&snapshot)
    }

    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, TreeBuildError> {
        let mut tree = Self::new();
        for path in snapshot.paths() {
            tree.try_insert_path(path)?;
        }

        debug!("Built tree from {} snapshot paths", snapshot.len());
        Ok(tree)
    }

    fn try_insert_path(&mut self, path: &RelativePath) -> Result<(), TreeBuildError> {
        let mut segments = path.segments().peekable();
        let mut children = &mut self.root;
        let mut walked: Option<RelativePath> = None;

        while let Some(segment) = segments.next() {
            let here = RelativePath::child_of(walked.as_ref(), segment);

            if segments.peek().is_none() {
                // Last component, record the file
                return match children.get(segment) {
                    None => {
                        children.insert(segment.to_owned(), TreeNode::File);
                        Ok(())
                    }
                    Some(TreeNode::File) => Ok(()),
                    Some(TreeNode::Directory { .. }) => {
                        ConflictingEntryKindSnafu { path: here }.fail()
                    }
                };
            }

            // Intermediate component, ensure the directory exists without
            // moving an existing one to the back
            let node = match children.raw_entry_mut().from_key(segment) {
                RawEntryMut::Occupied(entry) => entry.into_mut(),
                RawEntryMut::Vacant(entry) => {
                    let (_, node) = entry.insert(segment.to_owned(), TreeNode::directory());
                    node
                }
            };
            match node {
                TreeNode::Directory { children: next } => children = next,
                TreeNode::File => return ConflictingEntryKindSnafu { path: here }.fail(),
            }
            walked = Some(here);
        }

        Ok(())
    }

    /// Entries at the mirror root.
    pub fn children(&self) -> &Children {
        &self.root
    }

    pub fn get(&self, path: &RelativePath) -> Option<&TreeNode> {
        let mut segments = path.segments();
        let mut node = self.root.get(segments.next()?)?;
        for segment in segments {
            node = node.children()?.get(segment)?;
        }
        Some(node)
    }

    pub fn contains_file(&self, path: &RelativePath) -> bool {
        self.get(path).is_some_and(TreeNode::is_file)
    }

    pub fn contains_directory(&self, path: &RelativePath) -> bool {
        self.get(path).is_some_and(TreeNode::is_directory)
    }

    /// File paths, depth first in encounter order.
    pub fn files(&self) -> Vec<RelativePath> {
        let mut files = Vec::new();
        visit_pre_order(&self.root, None, &mut |path: &RelativePath, node: &TreeNode| {
            if node.is_file() {
                files.push(path.clone());
            }
        });
        files
    }

    /// Implied directories, every directory before its subdirectories.
    pub fn directories(&self) -> Vec<RelativePath> {
        let mut directories = Vec::new();
        visit_pre_order(&self.root, None, &mut |path: &RelativePath, node: &TreeNode| {
            if node.is_directory() {
                directories.push(path.clone());
            }
        });
        directories
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        let mut count = 0;
        visit_pre_order(&self.root, None, &mut |_: &RelativePath, node: &TreeNode| {
            if node.is_file() {
                count += 1;
            }
        });
        count
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// The part of this tree that survives into `other`: files that are files
    /// in both trees, plus the directories leading to them. Directories with
    /// no surviving file beneath them are dropped. Order follows `self`.
    pub fn retained_with(&self, other: &Tree) -> Tree {
        Tree {
            root: retain_children(&self.root, &other.root),
        }
    }
}

fn retain_children(ours: &Children, theirs: &Children) -> Children {
    let mut kept = Children::new();

    for (name, node) in ours {
        match (node, theirs.get(name)) {
            (TreeNode::File, Some(TreeNode::File)) => {
                kept.insert(name.clone(), TreeNode::File);
            }
            (
                TreeNode::Directory { children: ours },
                Some(TreeNode::Directory { children: theirs }),
            ) => {
                let children = retain_children(ours, theirs);
                if !children.is_empty() {
                    kept.insert(name.clone(), TreeNode::Directory { children });
                }
            }
            _ => {}
        }
    }

    kept
}

fn visit_pre_order(
    children: &Children,
    parent: Option<&RelativePath>,
    visit: &mut dyn FnMut(&RelativePath, &TreeNode),
) {
    for (name, node) in children {
        let path = RelativePath::child_of(parent, name);
        visit(&path, node);
        if let TreeNode::Directory { children } = node {
            visit_pre_order(children, Some(&path), visit);
        }
    }
}

/// Anything that can stand in for a requested tree: raw path lists,
/// validated snapshots, or trees built earlier.
pub trait TryIntoTree {
    fn try_into_tree(self) -> Result<Tree, TreeBuildError>;
}

impl TryIntoTree for Tree {
    fn try_into_tree(self) -> Result<Tree, TreeBuildError> {
        Ok(self)
    }
}

impl TryIntoTree for &Tree {
    fn try_into_tree(self) -> Result<Tree, TreeBuildError> {
        Ok(self.clone())
    }
}

impl TryIntoTree for Snapshot {
    fn try_into_tree(self) -> Result<Tree, TreeBuildError> {
        Tree::from_snapshot(&self)
    }
}

impl TryIntoTree for &Snapshot {
    fn try_into_tree(self) -> Result<Tree, TreeBuildError> {
        Tree::from_snapshot(self)
    }
}

impl<S: AsRef<str>> TryIntoTree for Vec<S> {
    fn try_into_tree(self) -> Result<Tree, TreeBuildError> {
        Tree::build(self)
    }
}

impl<S: AsRef<str>> TryIntoTree for &Vec<S> {
    fn try_into_tree(self) -> Result<Tree, TreeBuildError> {
        Tree::build(self)
    }
}

impl<S: AsRef<str>> TryIntoTree for &[S] {
    fn try_into_tree(self) -> Result<Tree, TreeBuildError> {
        Tree::build(self)
    }
}

impl<S: AsRef<str>, const N: usize> TryIntoTree for [S; N] {
    fn try_into_tree(self) -> Result<Tree, TreeBuildError> {
        Tree::build(self)
    }
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum TreeBuildError {
    #[snafu(display("Snapshot contains an invalid path"))]
    ValidationError { source: PathValidationError },
    #[snafu(display("Path '{}' is required to be both a file and a directory", path))]
    ConflictingEntryKind { path: RelativePath },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    fn path(raw: &str) -> RelativePath {
        RelativePath::parse(raw).unwrap()
    }

    fn names(children: &Children) -> Vec<&str> {
        children.keys().map(String::as_str).collect()
    }

    #[test]
    fn directories_are_inferred_from_prefixes() {
        let tree = Tree::build(["bar/quz/baz.js", "foo.js"]).unwrap();

        assert!(tree.contains_directory(&path("bar")));
        assert!(tree.contains_directory(&path("bar/quz")));
        assert!(tree.contains_file(&path("bar/quz/baz.js")));
        assert!(tree.contains_file(&path("foo.js")));
        assert!(!tree.contains_file(&path("bar")));
        assert!(!tree.contains_directory(&path("foo.js")));
        assert_eq!(tree.get(&path("bar/missing.js")), None);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn children_keep_first_encounter_order() {
        let tree = Tree::build(["foo/two.js", "bar/one.js", "foo/one.js", "alpha.js"]).unwrap();

        assert_eq!(names(tree.children()), vec!["foo", "bar", "alpha.js"]);
        let foo = tree.get(&path("foo")).and_then(TreeNode::children).unwrap();
        assert_eq!(names(foo), vec!["two.js", "one.js"]);
    }

    #[test]
    fn files_and_directories_in_pre_order() {
        let tree = Tree::build(["bar/quz/baz.js", "foo.js", "bar/a.js", "zed/z.js"]).unwrap();

        let files: Vec<String> = tree.files().iter().map(ToString::to_string).collect();
        assert_eq!(
            files,
            vec!["bar/quz/baz.js", "bar/a.js", "foo.js", "zed/z.js"]
        );

        let directories: Vec<String> = tree.directories().iter().map(ToString::to_string).collect();
        assert_eq!(directories, vec!["bar", "bar/quz", "zed"]);
    }

    #[test]
    fn reentering_a_directory_keeps_its_position() {
        let tree = Tree::build(["a/1.js", "b/1.js", "a/2.js", "c.js", "b/2.js", "a/x/3.js"]).unwrap();

        assert_eq!(names(tree.children()), vec!["a", "b", "c.js"]);
        let a = tree.get(&path("a")).and_then(TreeNode::children).unwrap();
        assert_eq!(names(a), vec!["1.js", "2.js", "x"]);
    }

    #[test]
    fn building_twice_yields_identical_trees() {
        let paths = ["foo/one.js", "foo/two.js", "bar/one.js", "bar/two.js"];
        assert_eq!(Tree::build(paths).unwrap(), Tree::build(paths).unwrap());
    }

    #[test]
    fn duplicate_file_is_recorded_once() {
        let tree = Tree::build(["foo.js", "bar.js", "foo.js"]).unwrap();
        assert_eq!(names(tree.children()), vec!["foo.js", "bar.js"]);
        assert_eq!(tree.len(), 2);
    }

    #[rstest]
    #[case::file_then_directory(&["bar", "bar/baz.js"], "bar")]
    #[case::directory_then_file(&["bar/baz.js", "bar"], "bar")]
    #[case::nested_file_then_directory(&["a/b/c", "a/b/c/d/e.js"], "a/b/c")]
    #[case::nested_directory_then_file(&["a/b/c/d.js", "a/b"], "a/b")]
    fn conflicting_entry_kinds_are_rejected(#[case] paths: &[&str], #[case] conflict: &str) {
        assert_eq!(
            Tree::build(paths),
            Err(TreeBuildError::ConflictingEntryKind {
                path: path(conflict)
            })
        );
    }

    #[test]
    fn invalid_paths_are_rejected_before_building() {
        let result = Tree::build(["foo.js", "/abs/path.js"]);
        assert!(matches!(
            result,
            Err(TreeBuildError::ValidationError {
                source: PathValidationError::Absolute { .. }
            })
        ));
    }

    #[test]
    fn empty_listing_builds_an_empty_tree() {
        let tree = Tree::build(Vec::<&str>::new()).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.files().is_empty());
    }

    #[test]
    fn retained_keeps_only_surviving_files_and_their_directories() {
        let old = Tree::build(["foo/one.js", "foo/two.js", "bar/one.js", "bar/two.js", "top.js"]).unwrap();
        let new = Tree::build(["bar/two.js", "baz/new.js", "top.js"]).unwrap();

        let retained = old.retained_with(&new);
        let files: Vec<String> = retained.files().iter().map(ToString::to_string).collect();
        assert_eq!(files, vec!["bar/two.js", "top.js"]);
        assert!(!retained.contains_directory(&path("foo")));
        assert!(!retained.contains_directory(&path("baz")));
    }

    #[test]
    fn retained_drops_entries_that_changed_kind() {
        let old = Tree::build(["a/b", "c/d.js"]).unwrap();
        let new = Tree::build(["a/b/inner.js", "c"]).unwrap();

        assert!(old.retained_with(&new).is_empty());
    }
}
