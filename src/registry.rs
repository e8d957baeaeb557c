//! Registry of tracked files
//!
//! Owns every [`FileRecord`] for the lifetime of a session, keeps them in
//! creation order and resolves names in constant time. Creation order is the
//! tie-break used by ranking queries.

use crate::collections::HashMap;
#[cfg(feature = "gxhash")]
use crate::collections::HashMapExt;
use crate::error::{Result, VersionError};
use crate::file::{FileRecord, FileSummary};

/// Collection of file records addressed by name
#[derive(Debug, Default)]
pub struct FileRegistry {
    /// Records in creation order
    files: Vec<FileRecord>,
    /// Position of each record in `files`
    by_name: HashMap<String, usize>,
}

impl FileRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create and register a new file
    ///
    /// # Errors
    ///
    /// [`VersionError::FileExists`] if the name is taken.
    pub fn create(&mut self, name: &str, initial_message: &str) -> Result<&mut FileRecord> {
        if self.by_name.contains_key(name) {
            return Err(VersionError::FileExists(name.to_string()));
        }
        let position = self.files.len();
        self.files.push(FileRecord::new(name, initial_message));
        self.by_name.insert(name.to_string(), position);
        Ok(&mut self.files[position])
    }

    /// Look up a file by name
    pub fn get(&self, name: &str) -> Result<&FileRecord> {
        self.by_name
            .get(name)
            .map(|&position| &self.files[position])
            .ok_or_else(|| VersionError::FileNotFound(name.to_string()))
    }

    /// Look up a file by name for editing
    pub fn get_mut(&mut self, name: &str) -> Result<&mut FileRecord> {
        match self.by_name.get(name) {
            Some(&position) => Ok(&mut self.files[position]),
            None => Err(VersionError::FileNotFound(name.to_string())),
        }
    }

    /// Check whether a file exists
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Number of files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no file has been created
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files in creation order
    pub fn iter(&self) -> impl Iterator<Item = &FileRecord> {
        self.files.iter()
    }

    /// Ranking views of all files in creation order
    pub fn summaries(&self) -> impl Iterator<Item = FileSummary<'_>> {
        self.files.iter().map(FileRecord::summary)
    }
}
