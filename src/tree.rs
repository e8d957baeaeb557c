//! Version tree for one file
//!
//! The tree owns every node of a file's history in an arena. Parent and child
//! links are arena slots, so dropping the tree releases every node at once and
//! no link can dangle or form a cycle: a node's parent always has a smaller id.
//!
//! ## Structure
//!
//! ```text
//! 0 [snapshot] Initial version
//! ├── 1 [snapshot] v1
//! │   ├── 2 [editing] hello world
//! │   └── 4 [editing] hello there (branch)
//! └── 3 [editing] scratch
//! ```
//!
//! Ids are handed out in creation order across all branches, and every new
//! node is registered in the tree's [`VersionIndex`] so that rollback by id
//! never searches the tree.
//!
//! ## Examples
//!
//! ```rust
//! use vertree::tree::VersionTree;
//!
//! let mut tree = VersionTree::new("Initial version");
//! let root = tree.root();
//! let child = tree.create_child(root, "hello".to_string());
//!
//! assert_eq!(tree.node(child).id(), 1);
//! assert_eq!(tree.find(1), Some(child));
//! assert!(tree.snapshot(child, "v1").is_ok());
//! ```

use crate::error::{Result, VersionError};
use crate::index::VersionIndex;
use crate::node::{NodeRef, VersionId, VersionNode};
use crate::utils::monotonic_now;
use serde::Serialize;
use tracing::debug;

/// Arena-backed tree of versions for a single file
///
/// # Thread Safety
///
/// The tree is not synchronised. A caller sharing a file between threads must
/// guard the tree, its index and the file's active pointer with one lock.
#[derive(Debug, Clone)]
pub struct VersionTree {
    /// Nodes in creation order; a node's slot equals its id
    nodes: Vec<VersionNode>,
    /// Id lookup, filled as nodes are created
    index: VersionIndex,
}

impl VersionTree {
    /// Create a tree holding only the root
    ///
    /// The root has id 0, empty content, and is snapshotted immediately with
    /// `initial_message`.
    pub fn new(initial_message: impl Into<String>) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            index: VersionIndex::new(),
        };
        let root = tree.allocate(String::new(), None);
        tree.stamp_snapshot(root, initial_message.into());
        tree
    }

    /// Handle of the root node
    pub fn root(&self) -> NodeRef {
        NodeRef(0)
    }

    /// Borrow a node
    ///
    /// # Panics
    ///
    /// Panics if `node` was issued by a different tree.
    pub fn node(&self, node: NodeRef) -> &VersionNode {
        &self.nodes[node.0]
    }

    /// Borrow a node, or `None` if the handle does not belong to this tree
    pub fn get(&self, node: NodeRef) -> Option<&VersionNode> {
        self.nodes.get(node.0)
    }

    /// Number of nodes ever created, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; a tree has at least its root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The id lookup table of this tree
    pub fn index(&self) -> &VersionIndex {
        &self.index
    }

    /// Create a new in-progress child of `parent`
    ///
    /// The child receives the next sequential id, is appended to the parent's
    /// children and registered in the index.
    pub fn create_child(&mut self, parent: NodeRef, content: String) -> NodeRef {
        let child = self.allocate(content, Some(parent));
        self.nodes[parent.0].children.push(child);
        debug!(
            "Created version {} under version {}",
            self.nodes[child.0].id, self.nodes[parent.0].id
        );
        child
    }

    /// Freeze a node as a snapshot
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::AlreadySnapshot`] with the node's id if it is
    /// already a snapshot; the node is left untouched.
    pub fn snapshot(&mut self, node: NodeRef, message: impl Into<String>) -> Result<()> {
        let target = &self.nodes[node.0];
        if target.is_snapshot() {
            return Err(VersionError::AlreadySnapshot(target.id));
        }
        self.stamp_snapshot(node, message.into());
        debug!("Snapshotted version {}", self.nodes[node.0].id);
        Ok(())
    }

    /// Replace the content of an in-progress node
    ///
    /// # Panics
    ///
    /// Panics if the node is a snapshot. Edits to a snapshot must go to a new
    /// child through [`create_child`](Self::create_child).
    pub fn mutate_in_place(&mut self, node: NodeRef, content: String) {
        let target = &mut self.nodes[node.0];
        assert!(
            !target.is_snapshot(),
            "version {} is a snapshot and cannot be edited in place",
            target.id
        );
        target.content = content;
    }

    /// Find a node by version id in constant time
    pub fn find(&self, id: VersionId) -> Option<NodeRef> {
        self.index.find(id)
    }

    /// Parent of a node, `None` for the root
    pub fn parent(&self, node: NodeRef) -> Option<NodeRef> {
        self.nodes[node.0].parent
    }

    /// Children of a node in creation order
    pub fn children(&self, node: NodeRef) -> &[NodeRef] {
        &self.nodes[node.0].children
    }

    /// Walk from `node` up to the root, `node` first
    pub fn ancestors(&self, node: NodeRef) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: Some(node),
        }
    }

    /// Snapshots on the path from the root to `node`, oldest first
    ///
    /// The path is walked afresh on every call. In-progress nodes are skipped;
    /// `node` itself is included when it is a snapshot. Parent links only lead
    /// towards the root, so the snapshots are collected once and handed out in
    /// reverse; iteration itself does no further tree work.
    pub fn history(&self, node: NodeRef) -> History<'_> {
        let mut path: Vec<&VersionNode> = self
            .ancestors(node)
            .filter(|n| n.is_snapshot())
            .collect();
        path.reverse();
        History {
            inner: path.into_iter(),
        }
    }

    /// Depth of a node, the root being at depth 0
    pub fn depth(&self, node: NodeRef) -> usize {
        self.ancestors(node).count() - 1
    }

    /// Get tree statistics
    pub fn stats(&self) -> TreeStats {
        let total_versions = self.nodes.len();
        let snapshots = self.nodes.iter().filter(|n| n.is_snapshot()).count();
        let leaf_versions = self.nodes.iter().filter(|n| n.children.is_empty()).count();
        let branch_points = self.nodes.iter().filter(|n| n.children.len() > 1).count();

        // Parents precede children in the arena, so one forward pass fills depths.
        let mut depths = vec![0usize; self.nodes.len()];
        for (slot, node) in self.nodes.iter().enumerate() {
            if let Some(parent) = node.parent {
                depths[slot] = depths[parent.0] + 1;
            }
        }
        let max_depth = depths.iter().copied().max().unwrap_or(0) + 1;

        TreeStats {
            total_versions,
            snapshots,
            leaf_versions,
            max_depth,
            branch_points,
        }
    }

    /// Render the tree as text, root line first, marking `active` with `*`
    ///
    /// A version with a single child continues in the same column, so
    /// indentation only grows below branch points and a long linear history
    /// renders in output proportional to its length. The walk keeps its own
    /// stack of pending lines instead of recursing.
    pub fn render(&self, active: Option<NodeRef>) -> String {
        let mut out = String::new();
        let mut pending = vec![RenderLine {
            node: self.root(),
            prefix: String::new(),
            connector: None,
        }];

        while let Some(line) = pending.pop() {
            let version = &self.nodes[line.node.0];

            out.push_str(&line.prefix);
            let body = match line.connector {
                Some(is_last) => {
                    out.push_str(if is_last { "└── " } else { "├── " });
                    let extension = if is_last { "    " } else { "│   " };
                    format!("{}{}", line.prefix, extension)
                }
                None => line.prefix,
            };
            if active == Some(line.node) {
                out.push_str("* ");
            }
            out.push_str(&version.display_format());
            out.push('\n');

            match version.children.as_slice() {
                [only] => pending.push(RenderLine {
                    node: *only,
                    prefix: body,
                    connector: None,
                }),
                children => {
                    let last = children.len().saturating_sub(1);
                    // Reversed so the first child is popped first
                    for (i, child) in children.iter().enumerate().rev() {
                        pending.push(RenderLine {
                            node: *child,
                            prefix: body.clone(),
                            connector: Some(i == last),
                        });
                    }
                }
            }
        }

        out
    }

    fn allocate(&mut self, content: String, parent: Option<NodeRef>) -> NodeRef {
        let id = self.nodes.len() as VersionId;
        let node = NodeRef(self.nodes.len());
        self.nodes.push(VersionNode::new(id, content, parent));
        self.index.insert(id, node);
        node
    }

    fn stamp_snapshot(&mut self, node: NodeRef, message: String) {
        let target = &mut self.nodes[node.0];
        target.snapshot_message = Some(message);
        target.snapshot_at = Some(monotonic_now());
    }
}

/// Iterator from a node up to the root
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    tree: &'a VersionTree,
    next: Option<NodeRef>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a VersionNode;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.tree.get(self.next?)?;
        self.next = current.parent;
        Some(current)
    }
}

/// Snapshotted ancestors of a node, root first
#[derive(Debug)]
pub struct History<'a> {
    inner: std::vec::IntoIter<&'a VersionNode>,
}

impl<'a> Iterator for History<'a> {
    type Item = &'a VersionNode;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for History<'_> {}

/// A line waiting to be rendered
struct RenderLine {
    node: NodeRef,
    /// Indentation inherited from the enclosing branches
    prefix: String,
    /// `Some(is_last)` for a branch child, `None` when continuing a linear run
    connector: Option<bool>,
}

/// Version tree statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    /// Number of versions ever created
    pub total_versions: usize,
    /// Number of snapshotted versions
    pub snapshots: usize,
    /// Number of versions without children
    pub leaf_versions: usize,
    /// Number of levels, the root alone being depth 1
    pub max_depth: usize,
    /// Number of versions with more than one child
    pub branch_points: usize,
}
