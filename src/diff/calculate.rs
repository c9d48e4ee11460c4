use tracing::debug;

use crate::snapshot::RelativePath;
use crate::tree::{Children, Tree, TreeNode};

use super::PatchOperation;

/// Computes the operations that turn a mirror of `current` into a mirror of
/// `requested`.
///
/// The patch has two phases. First every entry of `current` that does not
/// survive is removed, walking the old tree; then every entry of `requested`
/// that is missing is added, walking the new tree. An entry survives when it
/// is part of [`Tree::retained_with`], so a directory is kept only while some
/// file beneath it is kept, and otherwise removed and (if still requested)
/// recreated.
///
/// At each directory the operations for its immediate children are emitted
/// together, in encounter order. Subdirectories are descended into before
/// that group during removal and after it during addition, which keeps
/// every directory's contents gone before its `rmdir` and every `mkdir`
/// ahead of the contents placed inside it.
pub fn diff_trees(current: &Tree, requested: &Tree) -> Vec<PatchOperation> {
    let retained = current.retained_with(requested);
    let mut operations = Vec::new();

    collect_removals(
        current.children(),
        Some(retained.children()),
        None,
        &mut operations,
    );
    let removals = operations.len();

    collect_additions(
        requested.children(),
        Some(retained.children()),
        None,
        &mut operations,
    );

    debug!(
        "Calculated patch with {} removals and {} additions",
        removals,
        operations.len() - removals
    );
    operations
}

fn collect_removals(
    old: &Children,
    retained: Option<&Children>,
    parent: Option<&RelativePath>,
    operations: &mut Vec<PatchOperation>,
) {
    for (name, node) in old {
        if let TreeNode::Directory { children } = node {
            let path = RelativePath::child_of(parent, name);
            collect_removals(
                children,
                retained_child(retained, name),
                Some(&path),
                operations,
            );
        }
    }

    for (name, node) in old {
        if is_retained(retained, name) {
            continue;
        }
        let path = RelativePath::child_of(parent, name);
        operations.push(match node {
            TreeNode::File => PatchOperation::unlink(path),
            TreeNode::Directory { .. } => PatchOperation::rmdir(path),
        });
    }
}

fn collect_additions(
    new: &Children,
    retained: Option<&Children>,
    parent: Option<&RelativePath>,
    operations: &mut Vec<PatchOperation>,
) {
    for (name, node) in new {
        if is_retained(retained, name) {
            continue;
        }
        let path = RelativePath::child_of(parent, name);
        operations.push(match node {
            TreeNode::File => PatchOperation::create(path),
            TreeNode::Directory { .. } => PatchOperation::mkdir(path),
        });
    }

    for (name, node) in new {
        if let TreeNode::Directory { children } = node {
            let path = RelativePath::child_of(parent, name);
            collect_additions(
                children,
                retained_child(retained, name),
                Some(&path),
                operations,
            );
        }
    }
}

// Retained entries always have the same kind on both sides, so a name match
// is enough.
fn is_retained(retained: Option<&Children>, name: &str) -> bool {
    retained.is_some_and(|children| children.contains_key(name))
}

fn retained_child<'a>(retained: Option<&'a Children>, name: &str) -> Option<&'a Children> {
    retained
        .and_then(|children| children.get(name))
        .and_then(TreeNode::children)
}
