//! Version nodes, the unit a version tree is built from
//!
//! A node is one checkpoint of a file's content. While it is in progress its
//! content may be rewritten; once snapshotted the content is frozen and any
//! further edit has to go to a new child node.

use crate::utils::monotonic_now;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a version, dense and sequential per file starting at 0
pub type VersionId = u64;

/// Handle to a node inside the tree that owns it
///
/// A `NodeRef` is a slot in the owning tree's arena. It carries no ownership and
/// is only meaningful for the tree that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeRef(pub(crate) usize);

impl NodeRef {
    /// Arena slot of this node
    pub fn slot(self) -> usize {
        self.0
    }
}

/// A single content checkpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionNode {
    pub(crate) id: VersionId,
    pub(crate) content: String,
    pub(crate) snapshot_message: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) snapshot_at: Option<DateTime<Utc>>,
    pub(crate) parent: Option<NodeRef>,
    pub(crate) children: Vec<NodeRef>,
}

impl VersionNode {
    pub(crate) fn new(id: VersionId, content: String, parent: Option<NodeRef>) -> Self {
        Self {
            id,
            content,
            snapshot_message: None,
            created_at: monotonic_now(),
            snapshot_at: None,
            parent,
            children: Vec::new(),
        }
    }

    /// Version id of this node
    pub fn id(&self) -> VersionId {
        self.id
    }

    /// Current content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether the node has been frozen as a snapshot
    pub fn is_snapshot(&self) -> bool {
        self.snapshot_at.is_some()
    }

    /// Snapshot message, `None` while the node is in progress
    pub fn snapshot_message(&self) -> Option<&str> {
        self.snapshot_message.as_deref()
    }

    /// Creation timestamp
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Snapshot timestamp, `None` while the node is in progress
    pub fn snapshot_at(&self) -> Option<DateTime<Utc>> {
        self.snapshot_at
    }

    /// Parent node, `None` for the root
    pub fn parent(&self) -> Option<NodeRef> {
        self.parent
    }

    /// Children in creation order
    pub fn children(&self) -> &[NodeRef] {
        &self.children
    }

    /// Short single-line form used by tree rendering
    pub fn display_format(&self) -> String {
        match &self.snapshot_message {
            Some(message) => format!("{} [snapshot] {}", self.id, message),
            None => format!("{} [editing] {}", self.id, crate::utils::preview(&self.content, 32)),
        }
    }
}
