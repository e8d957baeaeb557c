//! # vertree - Branching version trees for text files
//!
//! An in-memory versioning engine that tracks the content of many files as
//! branching trees of checkpoints, with constant-time jumps to any version and
//! fleet-wide ranking queries.
//!
//! ## Overview
//!
//! Each file keeps a tree of versions rooted at version 0:
//! - Edit the active version in place while it is in progress
//! - Freeze it as an immutable, named snapshot
//! - Keep editing after a snapshot: the edit forks a new child version
//! - Roll back to the parent, or jump to any version id across branches
//! - List the snapshot history leading to the active version
//!
//! Across files, ranking queries return the most recently modified files or the
//! files with the largest version trees without sorting the whole collection.
//!
//! ## Quick Start
//!
//! ```rust
//! use vertree::FileRecord;
//!
//! let mut file = FileRecord::new("notes", "Initial version");
//!
//! // The root is a snapshot, so the first edit creates version 1
//! file.update("hello")?;
//! file.snapshot("greeting")?;
//!
//! // Version 1 is now frozen; appending forks version 2
//! file.insert(" world")?;
//! assert_eq!(file.read()?, "hello world");
//!
//! // Jump anywhere
//! file.rollback_to(1)?;
//! assert_eq!(file.read()?, "hello");
//!
//! let history: Vec<_> = file.history()?.map(|v| v.id()).collect();
//! assert_eq!(history, vec![0, 1]);
//! # Ok::<(), vertree::VersionError>(())
//! ```
//!
//! ## Command Sessions
//!
//! ```rust
//! use vertree::WorkspaceBuilder;
//!
//! let mut ws = WorkspaceBuilder::new().build()?;
//! for line in ["CREATE a", "CREATE b", "UPDATE b draft", "SNAPSHOT b v1", "UPDATE b more"] {
//!     ws.execute_line(line)?;
//! }
//! let reply = ws.execute_line("BIGGEST_TREES 2")?.unwrap();
//! assert_eq!(reply.to_string(), "b a");
//! # Ok::<(), vertree::VersionError>(())
//! ```
//!
//! ## Key Concepts
//!
//! ### Versions
//!
//! Version ids are assigned sequentially per file in creation order,
//! independent of which branch a version lands on, and are never reused.
//!
//! ### Snapshots
//!
//! A snapshot is terminal: its content never changes again. The root of every
//! file is snapshotted on creation with a configurable message.
//!
//! ### Ranking
//!
//! Ranking queries use bounded top-K selection in O(N log K). Files the ranking
//! considers equal are returned in creation order.
//!
//! ## Module Organization
//!
//! - [`node`]: version nodes and handles
//! - [`index`]: id lookup table
//! - [`tree`]: the per-file version tree
//! - [`file`]: file records and navigation
//! - [`select`]: bounded top-K selection and rankings
//! - [`registry`]: the collection of files
//! - [`command`]: text command parsing
//! - [`workspace`]: command execution
//! - [`types`]: configuration and replies
//! - [`error`]: error types and handling

// Public API modules
pub mod command;
pub mod error;
pub mod file;
pub mod index;
pub mod node;
pub mod registry;
pub mod select;
pub mod tree;
pub mod types;
pub mod utils;
pub mod workspace;

// Internal modules (not part of public API)
mod collections;

// Re-export main types for convenience
pub use command::Command;
pub use error::{Result, VersionError};
pub use file::{FileRecord, FileSummary, SnapshotOutcome, UpdateOutcome};
pub use index::VersionIndex;
pub use node::{NodeRef, VersionId, VersionNode};
pub use registry::FileRegistry;
pub use select::{select_top_k, ByRecency, ByVersionCount, RankBy, Ranking};
pub use tree::{TreeStats, VersionTree};
pub use types::*;
pub use workspace::{Workspace, WorkspaceBuilder};
