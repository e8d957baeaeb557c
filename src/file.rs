//! File records and their version navigation
//!
//! A [`FileRecord`] pairs one [`VersionTree`] with the file's active version and
//! modification time. All navigation state lives in the active pointer; the
//! tree only ever grows.
//!
//! Editing after a snapshot always branches: the edit lands in a new child of
//! the snapshot, which becomes the active version. Editing an in-progress
//! version rewrites it in place.
//!
//! ## Examples
//!
//! ```rust
//! use vertree::file::FileRecord;
//!
//! let mut file = FileRecord::new("notes", "Initial version");
//! file.update("hello")?;            // root is a snapshot: branches to version 1
//! file.snapshot("v1")?;
//! file.insert(" world")?;           // version 1 is a snapshot: branches to version 2
//!
//! assert_eq!(file.read()?, "hello world");
//! assert_eq!(file.rollback()?, 1);
//! assert_eq!(file.rollback_to(2)?, 2);
//! # Ok::<(), vertree::VersionError>(())
//! ```

use crate::error::{Result, VersionError};
use crate::node::{NodeRef, VersionId, VersionNode};
use crate::tree::{History, TreeStats, VersionTree};
use crate::utils::monotonic_now;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, trace};

/// One tracked file: its version tree plus navigation state
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Unique, immutable file name
    name: String,
    /// Every version of this file
    tree: VersionTree,
    /// Version the next read or edit applies to
    active: NodeRef,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last content-affecting operation
    last_modified: DateTime<Utc>,
}

/// Result of an UPDATE or INSERT
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpdateOutcome {
    /// Active version after the edit
    pub version: VersionId,
    /// Whether the edit created a new child version
    pub branched: bool,
}

/// Result of a SNAPSHOT request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SnapshotOutcome {
    /// The active version was frozen with the given message
    Created {
        /// Snapshotted version
        version: VersionId,
    },
    /// The active version already was a snapshot; nothing changed
    AlreadySnapshot {
        /// Existing snapshot version
        version: VersionId,
        /// Message it was snapshotted with
        message: String,
    },
}

/// Ranking view of a file used by fleet-wide queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary<'a> {
    /// File name
    pub name: &'a str,
    /// Last content-affecting operation
    pub last_modified: DateTime<Utc>,
    /// Number of versions ever created
    pub total_versions: usize,
}

impl FileRecord {
    /// Create a file whose root version is snapshotted with `initial_message`
    pub fn new(name: impl Into<String>, initial_message: impl Into<String>) -> Self {
        let name = name.into();
        let tree = VersionTree::new(initial_message);
        let active = tree.root();
        let now = monotonic_now();
        debug!("Created file '{}'", name);
        Self {
            name,
            tree,
            active,
            created_at: now,
            last_modified: now,
        }
    }

    /// File name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The file's version tree
    pub fn tree(&self) -> &VersionTree {
        &self.tree
    }

    /// Handle of the active version
    pub fn active(&self) -> NodeRef {
        self.active
    }

    /// The active version
    pub fn active_version(&self) -> Result<&VersionNode> {
        self.tree.get(self.active).ok_or(VersionError::NoActiveVersion)
    }

    /// Id of the active version
    pub fn active_id(&self) -> Result<VersionId> {
        Ok(self.active_version()?.id())
    }

    /// Creation timestamp
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last content-affecting operation
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    /// Number of versions ever created; never decreases
    pub fn total_versions(&self) -> usize {
        self.tree.len()
    }

    /// Content of the active version
    pub fn read(&self) -> Result<&str> {
        Ok(self.active_version()?.content())
    }

    /// Replace the content of the active version
    ///
    /// If the active version is a snapshot, a new child holding `content`
    /// becomes active; otherwise the active version is rewritten in place.
    pub fn update(&mut self, content: impl Into<String>) -> Result<UpdateOutcome> {
        let content = content.into();
        let branched = self.active_version()?.is_snapshot();

        if branched {
            self.active = self.tree.create_child(self.active, content);
        } else {
            self.tree.mutate_in_place(self.active, content);
        }
        self.last_modified = monotonic_now();

        let version = self.active_id()?;
        trace!("Updated '{}' at version {} (branched: {})", self.name, version, branched);
        Ok(UpdateOutcome { version, branched })
    }

    /// Append `text` to the active content, following the same rules as [`update`](Self::update)
    pub fn insert(&mut self, text: &str) -> Result<UpdateOutcome> {
        let mut content = self.read()?.to_string();
        content.push_str(text);
        self.update(content)
    }

    /// Snapshot the active version
    ///
    /// Snapshotting a version that already is one changes nothing and reports
    /// the existing snapshot instead of failing.
    pub fn snapshot(&mut self, message: impl Into<String>) -> Result<SnapshotOutcome> {
        match self.tree.snapshot(self.active, message) {
            Ok(()) => Ok(SnapshotOutcome::Created {
                version: self.active_id()?,
            }),
            Err(VersionError::AlreadySnapshot(version)) => {
                let message = self
                    .active_version()?
                    .snapshot_message()
                    .unwrap_or_default()
                    .to_string();
                Ok(SnapshotOutcome::AlreadySnapshot { version, message })
            }
            Err(e) => Err(e),
        }
    }

    /// Move the active version to its parent
    ///
    /// # Errors
    ///
    /// [`VersionError::AtRoot`] if the active version is the root; the active
    /// version is unchanged.
    pub fn rollback(&mut self) -> Result<VersionId> {
        let parent = self.active_version()?.parent().ok_or(VersionError::AtRoot)?;
        self.active = parent;
        let version = self.active_id()?;
        debug!("Rolled back '{}' to parent version {}", self.name, version);
        Ok(version)
    }

    /// Make any version of this file active, across branches
    ///
    /// # Errors
    ///
    /// [`VersionError::VersionNotFound`] if `id` was never created; the active
    /// version is unchanged.
    pub fn rollback_to(&mut self, id: VersionId) -> Result<VersionId> {
        let target = self.tree.find(id).ok_or(VersionError::VersionNotFound(id))?;
        self.active = target;
        debug!("Rolled back '{}' to version {}", self.name, id);
        Ok(id)
    }

    /// Snapshots from the root to the active version, oldest first
    pub fn history(&self) -> Result<History<'_>> {
        self.active_version()?;
        Ok(self.tree.history(self.active))
    }

    /// Statistics of the version tree
    pub fn stats(&self) -> TreeStats {
        self.tree.stats()
    }

    /// Render the version tree with the active version marked
    pub fn render_tree(&self) -> String {
        self.tree.render(Some(self.active))
    }

    /// Ranking view of this file
    pub fn summary(&self) -> FileSummary<'_> {
        FileSummary {
            name: &self.name,
            last_modified: self.last_modified,
            total_versions: self.total_versions(),
        }
    }
}
