//! Shared data types: configuration and command replies
//!
//! [`Reply`] is the typed result of executing one command. Its `Display`
//! implementation produces the console form; its `Serialize` implementation
//! backs the JSON output mode of the command-line tool.
//!
//! ## Examples
//!
//! ```rust
//! use vertree::types::{Reply, WorkspaceConfig};
//!
//! let config = WorkspaceConfig::default();
//! assert_eq!(config.initial_message, "Initial version");
//!
//! let reply = Reply::Ranked { files: vec!["b".to_string(), "c".to_string()] };
//! assert_eq!(reply.to_string(), "b c");
//! ```

use crate::file::{SnapshotOutcome, UpdateOutcome};
use crate::node::{VersionId, VersionNode};
use crate::tree::TreeStats;
use crate::utils::format_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Message every root version is snapshotted with unless configured otherwise
pub const DEFAULT_INITIAL_MESSAGE: &str = "Initial version";

/// Configuration for a workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Snapshot message of each file's root version
    pub initial_message: String,
    /// Number of files returned by ranking commands given no count
    pub default_selection_size: usize,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            initial_message: DEFAULT_INITIAL_MESSAGE.to_string(),
            default_selection_size: 1,
        }
    }
}

/// One line of a file's snapshot history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// Snapshot version
    pub version: VersionId,
    /// When the snapshot was taken
    pub snapshot_at: DateTime<Utc>,
    /// Snapshot message
    pub message: String,
}

impl HistoryEntry {
    /// Build an entry from a snapshotted node, `None` if it is still in progress
    pub fn from_node(node: &VersionNode) -> Option<Self> {
        Some(Self {
            version: node.id(),
            snapshot_at: node.snapshot_at()?,
            message: node.snapshot_message().unwrap_or_default().to_string(),
        })
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Version {} | Time: {} | Message: {}",
            self.version,
            format_timestamp(&self.snapshot_at),
            self.message
        )
    }
}

/// Result of executing one command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reply", rename_all = "snake_case")]
pub enum Reply {
    /// A file was created
    Created { file: String },
    /// Content of the active version
    Content { file: String, content: String },
    /// Content of the active version was replaced or extended
    Updated {
        file: String,
        #[serde(flatten)]
        outcome: UpdateOutcome,
    },
    /// Result of a snapshot request
    Snapshot {
        file: String,
        #[serde(flatten)]
        outcome: SnapshotOutcome,
    },
    /// The active version moved
    RolledBack { file: String, version: VersionId },
    /// Snapshots from the root to the active version
    History { file: String, entries: Vec<HistoryEntry> },
    /// Rendered version tree
    Tree { file: String, rendered: String },
    /// Version tree statistics
    Stats { file: String, stats: TreeStats },
    /// File names of a ranking query, best first
    Ranked { files: Vec<String> },
}

impl Reply {
    /// Whether the console form of this reply is empty
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            Reply::Created { .. }
                | Reply::Updated { .. }
                | Reply::RolledBack { .. }
                | Reply::Snapshot {
                    outcome: SnapshotOutcome::Created { .. },
                    ..
                }
        )
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Created { .. } | Reply::Updated { .. } | Reply::RolledBack { .. } => Ok(()),
            Reply::Content { content, .. } => f.write_str(content),
            Reply::Snapshot { outcome, .. } => match outcome {
                SnapshotOutcome::Created { .. } => Ok(()),
                SnapshotOutcome::AlreadySnapshot { version, .. } => {
                    write!(f, "This version is already a snapshot (ID: {})", version)
                }
            },
            Reply::History { entries, .. } => {
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}", entry)?;
                }
                Ok(())
            }
            Reply::Tree { rendered, .. } => f.write_str(rendered.trim_end_matches('\n')),
            Reply::Stats { stats, .. } => write!(
                f,
                "Versions: {} | Snapshots: {} | Leaves: {} | Depth: {} | Branch points: {}",
                stats.total_versions,
                stats.snapshots,
                stats.leaf_versions,
                stats.max_depth,
                stats.branch_points
            ),
            Reply::Ranked { files } => f.write_str(&files.join(" ")),
        }
    }
}
