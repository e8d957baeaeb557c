//! Error types for the vertree library
//!
//! Every condition in this module is recoverable from the point of view of a
//! command session: a failed command is reported and the next one runs. The
//! only fatal condition, running out of memory while allocating a node, is
//! left to the allocator and never surfaces as a `VersionError`.

use crate::node::VersionId;
use thiserror::Error;

/// Type alias for Results in the vertree library
pub type Result<T> = std::result::Result<T, VersionError>;

/// Main error type for all vertree operations
#[derive(Debug, Error)]
pub enum VersionError {
    /// The file record has no usable active version
    #[error("No active version")]
    NoActiveVersion,

    /// Rollback to the parent was requested while on the root version
    #[error("Cannot rollback from root version")]
    AtRoot,

    /// Rollback target is not a version of this file
    #[error("Version {0} not found")]
    VersionNotFound(VersionId),

    /// Snapshot requested on a version that is already a snapshot
    #[error("This version is already a snapshot (ID: {0})")]
    AlreadySnapshot(VersionId),

    /// Ranking query asked for a non-positive number of results
    #[error("Invalid selection size: {0} (must be at least 1)")]
    InvalidSelectionSize(i64),

    /// No file with this name has been created
    #[error("File '{0}' not found")]
    FileNotFound(String),

    /// A file with this name already exists
    #[error("File '{0}' already exists")]
    FileExists(String),

    /// Command keyword not recognised
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Command is missing a required argument
    #[error("{command}: missing {argument}")]
    MissingArgument {
        /// Command keyword
        command: &'static str,
        /// Name of the missing argument
        argument: &'static str,
    },

    /// Command argument could not be parsed
    #[error("{command}: invalid argument '{value}'")]
    InvalidArgument {
        /// Command keyword
        command: &'static str,
        /// Offending token
        value: String,
    },

    /// I/O errors while reading commands or writing replies
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors during JSON serialization of replies
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VersionError {
    /// Check if a session can carry on after this error
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, VersionError::Io(_))
    }

    /// Check if this error came from parsing a command line
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            VersionError::UnknownCommand(_)
                | VersionError::MissingArgument { .. }
                | VersionError::InvalidArgument { .. }
        )
    }

    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            VersionError::FileNotFound(name) => {
                format!("File '{}' not found. Use 'CREATE {}' first.", name, name)
            }
            VersionError::VersionNotFound(id) => {
                format!("Version {} not found. Use 'TREE <file>' to see existing versions.", id)
            }
            VersionError::AtRoot => {
                "Cannot rollback from root version. Use 'ROLLBACK <file> <id>' to jump to another version."
                    .to_string()
            }
            VersionError::InvalidSelectionSize(k) => {
                format!("Invalid selection size {}. Ask for at least one file.", k)
            }
            _ => self.to_string(),
        }
    }
}
