//! Storage layer for todo
//!
//! Each scope is backed by one JSON file holding a single named array:
//!
//! ```text
//! ./tasks.json             {"local_tasks":  [{"description": ..., "priority": ...}, ...]}
//! ~/tasks_global.json      {"global_tasks": [{"description": ..., "priority": ...}, ...]}
//! ```
//!
//! Files are rewritten whole on every save. Other top-level keys are neither
//! read nor preserved.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use crate::config::Paths;
use crate::error::{Error, Result};
use crate::task::{Scope, Task};

/// Upper bound on symlink chains followed when saving
const MAX_SYMLINK_HOPS: usize = 40;

/// What a load found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file held at least one task
    Loaded(Vec<Task>),
    /// The file exists but the scope's key is missing or empty
    Empty,
    /// The file did not exist; an empty one was written
    Created,
}

impl LoadOutcome {
    /// Tasks read by the load (empty unless `Loaded`)
    pub fn into_tasks(self) -> Vec<Task> {
        match self {
            LoadOutcome::Loaded(tasks) => tasks,
            LoadOutcome::Empty | LoadOutcome::Created => Vec::new(),
        }
    }
}

/// Storage manager for the two task files
#[derive(Debug, Clone)]
pub struct Storage {
    paths: Paths,
}

impl Storage {
    pub fn new(paths: Paths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &Paths {
        &self.paths
    }

    /// File backing a scope
    pub fn file(&self, scope: Scope) -> &Path {
        self.paths.file(scope)
    }

    /// Read a scope's file.
    ///
    /// A missing file is bootstrapped with an empty list; if that first write
    /// fails the error comes back as `Error::Save`. A single malformed record
    /// fails the whole load.
    pub fn load(&self, scope: Scope) -> Result<LoadOutcome> {
        let path = self.file(scope);
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(%scope, path = %path.display(), "task file missing, creating");
                self.save(scope, &[])
                    .map_err(|err| Error::save(scope, err))?;
                return Ok(LoadOutcome::Created);
            }
            Err(err) => return Err(err.into()),
        };

        let data: Value = serde_json::from_str(&content)?;
        let tasks = parse_document(scope, &data)?;
        tracing::debug!(%scope, count = tasks.len(), path = %path.display(), "loaded tasks");

        if tasks.is_empty() {
            Ok(LoadOutcome::Empty)
        } else {
            Ok(LoadOutcome::Loaded(tasks))
        }
    }

    /// Overwrite a scope's file with `tasks`
    pub fn save(&self, scope: Scope, tasks: &[Task]) -> Result<()> {
        let records = tasks.iter().map(Task::to_record).collect();
        let mut document = Map::new();
        document.insert(scope.file_key().to_string(), Value::Array(records));

        let path = self.file(scope);
        self.write_json(path, &Value::Object(document))?;
        tracing::debug!(%scope, count = tasks.len(), path = %path.display(), "saved tasks");
        Ok(())
    }

    // =========================================================================
    // File I/O helpers
    // =========================================================================

    /// Write pretty-printed JSON (2-space indent, UTF-8 kept literal)
    pub fn write_json(&self, path: &Path, data: &Value) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        self.write_atomic(path, json.as_bytes())
    }

    /// Replace the contents of `path` without a torn write.
    ///
    /// Symlinks are followed so the link itself survives, and an existing
    /// file keeps its permissions. A file that does not exist yet is created
    /// directly and gets the usual umask mode.
    pub fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<()> {
        let target = resolve_target(path);
        let parent = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;

        let permissions = match fs::metadata(&target) {
            Ok(metadata) => metadata.permissions(),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                fs::write(&target, data)?;
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        let mut file = NamedTempFile::new_in(&parent)?;
        file.write_all(data)?;
        file.as_file().set_permissions(permissions)?;
        file.as_file().sync_all()?;
        file.persist(&target).map_err(|err| Error::Io(err.error))?;

        Ok(())
    }
}

/// Follow symlinks to the file that should actually be written.
///
/// Dangling links are resolved by hand since `canonicalize` needs the target
/// to exist.
fn resolve_target(path: &Path) -> PathBuf {
    if let Ok(real) = fs::canonicalize(path) {
        return real;
    }

    let mut current = path.to_path_buf();
    for _ in 0..MAX_SYMLINK_HOPS {
        let Ok(link) = fs::read_link(&current) else {
            break;
        };
        current = match current.parent() {
            Some(parent) => parent.join(link),
            None => link,
        };
    }
    current
}

/// Pull the scope's task list out of a parsed file
fn parse_document(scope: Scope, data: &Value) -> Result<Vec<Task>> {
    let object = data.as_object().ok_or_else(|| {
        Error::InvalidRecord(format!("expected a JSON object at the top of the {scope} file"))
    })?;

    let records = match object.get(scope.file_key()) {
        None => return Ok(Vec::new()),
        Some(Value::Array(records)) => records,
        Some(other) => {
            return Err(Error::InvalidRecord(format!(
                "'{}' must be an array, got {other}",
                scope.file_key()
            )))
        }
    };

    records.iter().map(Task::from_record).collect()
}
