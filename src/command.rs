//! Text command language
//!
//! One command per line. The first token is an upper-case keyword; file
//! commands take the file name as second token. Free-text arguments (the text
//! of INSERT/UPDATE and the message of SNAPSHOT) are the rest of the line with a
//! single separating space removed, so other whitespace is kept verbatim.
//!
//! ```text
//! CREATE notes
//! UPDATE notes hello
//! SNAPSHOT notes first draft
//! INSERT notes  world
//! ROLLBACK notes 1
//! RECENT_FILES 3
//! ```

use crate::error::{Result, VersionError};
use crate::node::VersionId;
use crate::select::RankBy;
use serde::Serialize;
use std::num::IntErrorKind;
use std::str::FromStr;

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// `CREATE <file>`
    Create { file: String },
    /// `READ <file>`
    Read { file: String },
    /// `INSERT <file> <text>`
    Insert { file: String, text: String },
    /// `UPDATE <file> <text>`
    Update { file: String, text: String },
    /// `SNAPSHOT <file> <message>`
    Snapshot { file: String, message: String },
    /// `ROLLBACK <file> [id]`
    Rollback { file: String, target: Option<VersionId> },
    /// `HISTORY <file>`
    History { file: String },
    /// `TREE <file>`
    Tree { file: String },
    /// `STATS <file>`
    Stats { file: String },
    /// `RECENT_FILES [k]` and `BIGGEST_TREES [k]`
    Rank { by: RankBy, count: Option<i64> },
}

impl Command {
    /// Keyword this command is written with
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::Create { .. } => "CREATE",
            Command::Read { .. } => "READ",
            Command::Insert { .. } => "INSERT",
            Command::Update { .. } => "UPDATE",
            Command::Snapshot { .. } => "SNAPSHOT",
            Command::Rollback { .. } => "ROLLBACK",
            Command::History { .. } => "HISTORY",
            Command::Tree { .. } => "TREE",
            Command::Stats { .. } => "STATS",
            Command::Rank { by: RankBy::Recency, .. } => "RECENT_FILES",
            Command::Rank { by: RankBy::VersionCount, .. } => "BIGGEST_TREES",
        }
    }

    /// Parse one input line, skipping blank lines and `#` comments
    pub fn parse_line(line: &str) -> Result<Option<Command>> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }
        line.trim_end_matches(&['\r', '\n'][..]).parse().map(Some)
    }
}

impl FromStr for Command {
    type Err = VersionError;

    fn from_str(line: &str) -> Result<Self> {
        let mut cursor = Cursor::new(line);
        let keyword = cursor
            .token()
            .ok_or_else(|| VersionError::UnknownCommand(String::new()))?;

        let command = match keyword {
            "RECENT_FILES" => Command::Rank {
                by: RankBy::Recency,
                count: cursor.count("RECENT_FILES")?,
            },
            "BIGGEST_TREES" => Command::Rank {
                by: RankBy::VersionCount,
                count: cursor.count("BIGGEST_TREES")?,
            },
            "CREATE" => Command::Create {
                file: cursor.file("CREATE")?,
            },
            "READ" => Command::Read {
                file: cursor.file("READ")?,
            },
            "INSERT" => Command::Insert {
                file: cursor.file("INSERT")?,
                text: cursor.rest(),
            },
            "UPDATE" => Command::Update {
                file: cursor.file("UPDATE")?,
                text: cursor.rest(),
            },
            "SNAPSHOT" => Command::Snapshot {
                file: cursor.file("SNAPSHOT")?,
                message: cursor.rest(),
            },
            "ROLLBACK" => {
                let file = cursor.file("ROLLBACK")?;
                let target = match cursor.token() {
                    Some(token) => Some(token.parse::<VersionId>().map_err(|_| {
                        VersionError::InvalidArgument {
                            command: "ROLLBACK",
                            value: token.to_string(),
                        }
                    })?),
                    None => None,
                };
                Command::Rollback { file, target }
            }
            "HISTORY" => Command::History {
                file: cursor.file("HISTORY")?,
            },
            "TREE" => Command::Tree {
                file: cursor.file("TREE")?,
            },
            "STATS" => Command::Stats {
                file: cursor.file("STATS")?,
            },
            other => return Err(VersionError::UnknownCommand(other.to_string())),
        };
        // Free-text commands have consumed the whole line already
        cursor.finish(command.keyword())?;
        Ok(command)
    }
}

/// Whitespace tokenizer that can hand back the untouched remainder
struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(line: &'a str) -> Self {
        Self { rest: line }
    }

    fn token(&mut self) -> Option<&'a str> {
        let start = self.rest.trim_start();
        if start.is_empty() {
            self.rest = start;
            return None;
        }
        let end = start.find(char::is_whitespace).unwrap_or(start.len());
        let (token, rest) = start.split_at(end);
        self.rest = rest;
        Some(token)
    }

    fn file(&mut self, command: &'static str) -> Result<String> {
        self.token()
            .map(str::to_string)
            .ok_or(VersionError::MissingArgument { command, argument: "file name" })
    }

    /// Optional result count; counts beyond `i64` saturate
    fn count(&mut self, command: &'static str) -> Result<Option<i64>> {
        let Some(token) = self.token() else {
            return Ok(None);
        };
        match token.parse::<i64>() {
            Ok(count) => Ok(Some(count)),
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => Ok(Some(i64::MAX)),
            Err(e) if *e.kind() == IntErrorKind::NegOverflow => Ok(Some(i64::MIN)),
            Err(_) => Err(VersionError::InvalidArgument {
                command,
                value: token.to_string(),
            }),
        }
    }

    /// Fail on any token left after a complete command
    fn finish(&mut self, command: &'static str) -> Result<()> {
        match self.token() {
            Some(extra) => Err(VersionError::InvalidArgument {
                command,
                value: extra.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Remainder of the line minus the one separating space
    fn rest(&mut self) -> String {
        let rest = self.rest.strip_prefix(' ').unwrap_or(self.rest);
        self.rest = "";
        rest.to_string()
    }
}
