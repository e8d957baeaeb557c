//! Version index for constant-time rollback by id
//!
//! The index maps a version id to the arena slot of its node. It is filled
//! once per node at creation time and never updated or pruned, so a lookup
//! costs the same regardless of how deep or wide the tree has grown.
//!
//! The index never owns nodes; ownership stays with the tree's arena.

use crate::collections::HashMap;
#[cfg(feature = "gxhash")]
use crate::collections::HashMapExt;
use crate::node::{NodeRef, VersionId};
use tracing::trace;

/// Lookup table from version id to node handle, scoped to one file
#[derive(Debug, Clone)]
pub struct VersionIndex {
    /// Node handles keyed by version id
    slots: HashMap<VersionId, NodeRef>,
}

impl VersionIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    /// Register a freshly created node
    ///
    /// Ids are permanent; registering the same id twice is a bug in the caller.
    pub fn insert(&mut self, id: VersionId, node: NodeRef) {
        trace!("Indexing version {} at slot {}", id, node.slot());
        let previous = self.slots.insert(id, node);
        debug_assert!(previous.is_none(), "version {} indexed twice", id);
    }

    /// Find the node registered for `id`
    pub fn find(&self, id: VersionId) -> Option<NodeRef> {
        let found = self.slots.get(&id).copied();
        trace!("Index lookup for version {}: {:?}", id, found);
        found
    }

    /// Check whether `id` is registered
    pub fn contains(&self, id: VersionId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Number of registered versions
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for VersionIndex {
    fn default() -> Self {
        Self::new()
    }
}
