//! Command execution over a set of files
//!
//! A [`Workspace`] owns the file registry and configuration of one session and
//! turns parsed [`Command`]s into [`Reply`]s. Every command names its file
//! explicitly; there is no implicit "current file".
//!
//! ## Examples
//!
//! ```rust
//! use vertree::{Reply, Workspace};
//!
//! let mut ws = Workspace::new();
//! for line in ["CREATE a", "UPDATE a hello", "SNAPSHOT a v1", "INSERT a  world"] {
//!     ws.execute_line(line)?;
//! }
//!
//! let reply = ws.execute_line("READ a")?.unwrap();
//! assert_eq!(reply.to_string(), "hello world");
//! # Ok::<(), vertree::VersionError>(())
//! ```

use crate::command::Command;
use crate::error::{Result, VersionError};
use crate::file::FileRecord;
use crate::registry::FileRegistry;
use crate::select::{select_top_k, RankBy};
use crate::types::{HistoryEntry, Reply, WorkspaceConfig};
use tracing::debug;

/// Session state: all files plus configuration
#[derive(Debug)]
pub struct Workspace {
    config: WorkspaceConfig,
    registry: FileRegistry,
}

impl Workspace {
    /// Create a workspace with default configuration
    pub fn new() -> Self {
        Self {
            config: WorkspaceConfig::default(),
            registry: FileRegistry::new(),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    /// All files of this workspace
    pub fn registry(&self) -> &FileRegistry {
        &self.registry
    }

    /// Look up a file
    pub fn file(&self, name: &str) -> Result<&FileRecord> {
        self.registry.get(name)
    }

    /// Look up a file for editing
    pub fn file_mut(&mut self, name: &str) -> Result<&mut FileRecord> {
        self.registry.get_mut(name)
    }

    /// Create a file with the configured root message
    pub fn create_file(&mut self, name: &str) -> Result<&mut FileRecord> {
        let message = self.config.initial_message.clone();
        self.registry.create(name, &message)
    }

    /// Names of the top `count` files under `by`, best first
    ///
    /// # Errors
    ///
    /// [`VersionError::InvalidSelectionSize`] if `count` is not positive.
    pub fn top_files(&self, by: RankBy, count: i64) -> Result<Vec<String>> {
        if count <= 0 {
            return Err(VersionError::InvalidSelectionSize(count));
        }
        let k = usize::try_from(count).unwrap_or(usize::MAX);
        let top = select_top_k(self.registry.summaries(), k, &by)?;
        Ok(top.into_iter().map(|s| s.name.to_string()).collect())
    }

    /// Parse and execute one input line
    ///
    /// Blank lines and comments yield `Ok(None)`.
    pub fn execute_line(&mut self, line: &str) -> Result<Option<Reply>> {
        match Command::parse_line(line)? {
            Some(command) => self.execute(command).map(Some),
            None => Ok(None),
        }
    }

    /// Execute a parsed command
    pub fn execute(&mut self, command: Command) -> Result<Reply> {
        debug!("Executing {}", command.keyword());
        match command {
            Command::Create { file } => {
                self.create_file(&file)?;
                Ok(Reply::Created { file })
            }
            Command::Read { file } => {
                let content = self.registry.get(&file)?.read()?.to_string();
                Ok(Reply::Content { file, content })
            }
            Command::Insert { file, text } => {
                let outcome = self.registry.get_mut(&file)?.insert(&text)?;
                Ok(Reply::Updated { file, outcome })
            }
            Command::Update { file, text } => {
                let outcome = self.registry.get_mut(&file)?.update(text)?;
                Ok(Reply::Updated { file, outcome })
            }
            Command::Snapshot { file, message } => {
                let outcome = self.registry.get_mut(&file)?.snapshot(message)?;
                Ok(Reply::Snapshot { file, outcome })
            }
            Command::Rollback { file, target } => {
                let record = self.registry.get_mut(&file)?;
                let version = match target {
                    Some(id) => record.rollback_to(id)?,
                    None => record.rollback()?,
                };
                Ok(Reply::RolledBack { file, version })
            }
            Command::History { file } => {
                let entries = self
                    .registry
                    .get(&file)?
                    .history()?
                    .filter_map(HistoryEntry::from_node)
                    .collect();
                Ok(Reply::History { file, entries })
            }
            Command::Tree { file } => {
                let rendered = self.registry.get(&file)?.render_tree();
                Ok(Reply::Tree { file, rendered })
            }
            Command::Stats { file } => {
                let stats = self.registry.get(&file)?.stats();
                Ok(Reply::Stats { file, stats })
            }
            Command::Rank { by, count } => {
                let count = count.unwrap_or(self.config.default_selection_size as i64);
                let files = self.top_files(by, count)?;
                Ok(Reply::Ranked { files })
            }
        }
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for configuring a [`Workspace`]
///
/// # Examples
///
/// ```rust
/// use vertree::WorkspaceBuilder;
///
/// let ws = WorkspaceBuilder::new()
///     .initial_message("created")
///     .default_selection_size(10)
///     .build()?;
/// assert_eq!(ws.config().default_selection_size, 10);
/// # Ok::<(), vertree::VersionError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct WorkspaceBuilder {
    config: WorkspaceConfig,
}

impl WorkspaceBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn from_config(config: WorkspaceConfig) -> Self {
        Self { config }
    }

    /// Set the snapshot message of every file's root version
    pub fn initial_message(mut self, message: impl Into<String>) -> Self {
        self.config.initial_message = message.into();
        self
    }

    /// Set the result count of ranking commands given without a count
    pub fn default_selection_size(mut self, size: usize) -> Self {
        self.config.default_selection_size = size;
        self
    }

    /// Build the workspace
    ///
    /// # Errors
    ///
    /// [`VersionError::InvalidSelectionSize`] if the default selection size is zero.
    pub fn build(self) -> Result<Workspace> {
        if self.config.default_selection_size == 0 {
            return Err(VersionError::InvalidSelectionSize(0));
        }
        debug!("Building workspace with {:?}", self.config);
        Ok(Workspace {
            config: self.config,
            registry: FileRegistry::new(),
        })
    }
}
