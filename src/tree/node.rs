use hashlink::LinkedHashMap;

/// Children of a directory keyed by segment name, in first-encounter order.
pub type Children = LinkedHashMap<String, TreeNode>;

/// One entry of a tree implied by a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    File,
    Directory { children: Children },
}

impl TreeNode {
    pub fn directory() -> Self {
        TreeNode::Directory {
            children: LinkedHashMap::new(),
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, TreeNode::File)
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, TreeNode::Directory { .. })
    }

    pub fn children(&self) -> Option<&Children> {
        match self {
            TreeNode::Directory { children } => Some(children),
            TreeNode::File => None,
        }
    }
}
