//! In-memory task lists and the operations on them.
//!
//! The manager owns one ordered list per scope. Every mutation is written
//! back to disk before the call returns, so the list and its file agree after
//! each successful operation.

use std::collections::BTreeMap;
use std::num::IntErrorKind;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::storage::{LoadOutcome, Storage};
use crate::task::{Scope, SearchScope, Task};

/// Result of loading one scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "count", rename_all = "lowercase")]
pub enum LoadStatus {
    Loaded(usize),
    Empty,
    Created,
}

/// Outcome of a startup load for one scope
#[derive(Debug)]
pub struct LoadReport {
    pub scope: Scope,
    pub file: PathBuf,
    pub result: Result<LoadStatus>,
}

/// A task that was just added
#[derive(Debug, Clone, Serialize)]
pub struct Added {
    pub scope: Scope,
    pub task: Task,
    /// Directory holding the scope's file
    pub dir: PathBuf,
}

/// A task that was just removed
#[derive(Debug, Clone, Serialize)]
pub struct Removed {
    pub scope: Scope,
    pub number: usize,
    pub task: Task,
}

pub struct TaskManager {
    storage: Storage,
    lists: BTreeMap<Scope, Vec<Task>>,
}

impl TaskManager {
    /// Create a manager with empty lists, without touching disk
    pub fn new(storage: Storage) -> Self {
        let lists = Scope::ALL.iter().map(|scope| (*scope, Vec::new())).collect();
        Self { storage, lists }
    }

    /// Create a manager and load local then global tasks.
    ///
    /// Never fails: per-scope problems come back in the reports and leave that
    /// scope's list empty.
    pub fn open(storage: Storage) -> (Self, Vec<LoadReport>) {
        let mut manager = Self::new(storage);
        let reports = Scope::ALL
            .iter()
            .map(|&scope| LoadReport {
                scope,
                file: manager.storage.file(scope).to_path_buf(),
                result: manager.load(scope),
            })
            .collect();
        (manager, reports)
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Tasks of a scope, in insertion order
    pub fn tasks(&self, scope: Scope) -> &[Task] {
        self.lists.get(&scope).map(Vec::as_slice).unwrap_or(&[])
    }

    fn list_mut(&mut self, scope: Scope) -> &mut Vec<Task> {
        self.lists.entry(scope).or_default()
    }

    /// Replace a scope's list with the contents of its file.
    ///
    /// The list is cleared first and stays empty if the load fails. A file
    /// that was missing and could not be created is reported as a save error.
    pub fn load(&mut self, scope: Scope) -> Result<LoadStatus> {
        self.list_mut(scope).clear();

        let outcome = self.storage.load(scope).map_err(|err| match err {
            Error::Save { .. } => err,
            other => Error::load(scope, other),
        })?;

        let status = match outcome {
            LoadOutcome::Loaded(tasks) => {
                let count = tasks.len();
                *self.list_mut(scope) = tasks;
                LoadStatus::Loaded(count)
            }
            LoadOutcome::Empty => LoadStatus::Empty,
            LoadOutcome::Created => LoadStatus::Created,
        };
        Ok(status)
    }

    /// Write a scope's list to its file
    pub fn save(&self, scope: Scope) -> Result<()> {
        self.storage
            .save(scope, self.tasks(scope))
            .map_err(|err| Error::save(scope, err))
    }

    /// Append a task to a scope and persist it
    pub fn add(&mut self, description: &str, priority: i64, scope: Scope) -> Result<Added> {
        if description.trim().is_empty() {
            return Err(Error::EmptyDescription);
        }

        let task = Task::new(description, priority);
        self.list_mut(scope).push(task.clone());
        self.save(scope)?;
        tracing::debug!(%scope, priority, "added task");

        Ok(Added {
            scope,
            task,
            dir: self.storage.paths().dir(scope),
        })
    }

    /// Remove the task at 1-based position `identifier` from a scope.
    ///
    /// Both files are rewritten after a successful removal.
    pub fn remove(&mut self, identifier: &str, scope: Scope) -> Result<Removed> {
        // Digits that overflow i64 are still a number, just never a valid one.
        let number = match identifier.trim().parse::<i64>() {
            Ok(number) => number,
            Err(err) => match err.kind() {
                IntErrorKind::PosOverflow => i64::MAX,
                IntErrorKind::NegOverflow => i64::MIN,
                _ => return Err(Error::InvalidIdentifier(identifier.to_string())),
            },
        };

        let len = self.tasks(scope).len();
        let index = match usize::try_from(number) {
            Ok(n) if (1..=len).contains(&n) => n - 1,
            _ => return Err(Error::TaskNotFound { scope, number }),
        };

        let task = self.list_mut(scope).remove(index);
        for target in Scope::ALL {
            self.save(target)?;
        }
        tracing::debug!(%scope, number, "removed task");

        Ok(Removed {
            scope,
            number: index + 1,
            task,
        })
    }

    /// Tasks whose description contains `keyword`, ignoring case.
    ///
    /// `SearchScope::All` yields global matches before local ones.
    pub fn search(&self, scope: SearchScope, keyword: &str) -> Vec<&Task> {
        scope
            .scopes()
            .iter()
            .flat_map(|&scope| self.tasks(scope))
            .filter(|task| task.matches(keyword))
            .collect()
    }
}
