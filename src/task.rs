//! Task model
//!
//! A task is a description plus a priority. Tasks live in one of two
//! scopes, each backed by its own file. The on-disk form of a task is a plain
//! JSON object (a "record"):
//!
//! ```json
//! { "description": "Buy milk", "priority": 2 }
//! ```
//!
//! Records are taken as they are: only the two keys are required, and values
//! of unexpected types are carried through untouched and written back as read.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Priority used when none is given
pub const DEFAULT_PRIORITY: i64 = 1;

/// A task priority as read from disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Priority {
    Level(i64),
    /// Anything that is not an `i64` (`2.0`, `"3"`, huge integers)
    Raw(Value),
}

impl Priority {
    pub fn from_value(value: &Value) -> Self {
        match value.as_i64() {
            Some(level) => Priority::Level(level),
            None => Priority::Raw(value.clone()),
        }
    }

    /// Integer level, if the priority is one
    pub fn level(&self) -> Option<i64> {
        match self {
            Priority::Level(level) => Some(*level),
            Priority::Raw(_) => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Priority::Level(level) => Value::from(*level),
            Priority::Raw(value) => value.clone(),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Level(level) => write!(f, "{level}"),
            Priority::Raw(Value::String(text)) => f.write_str(text),
            Priority::Raw(value) => write!(f, "{value}"),
        }
    }
}

/// A single task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    /// Description text; a non-string description shows as its JSON text
    pub description: String,
    pub priority: Priority,
    /// Original description value when it was not a string
    #[serde(skip)]
    raw_description: Option<Value>,
}

impl Task {
    pub fn new(description: impl Into<String>, priority: i64) -> Self {
        Self::with_priority(description, Priority::Level(priority))
    }

    pub fn with_priority(description: impl Into<String>, priority: Priority) -> Self {
        Self {
            description: description.into(),
            priority,
            raw_description: None,
        }
    }

    /// Convert into the record form written to disk
    pub fn to_record(&self) -> Value {
        let description = match &self.raw_description {
            Some(raw) => raw.clone(),
            None => Value::String(self.description.clone()),
        };
        let mut record = Map::new();
        record.insert("description".to_string(), description);
        record.insert("priority".to_string(), self.priority.to_value());
        Value::Object(record)
    }

    /// Build a task from its record form.
    ///
    /// Both keys are required; no defaults are filled in and the values are
    /// not validated.
    pub fn from_record(record: &Value) -> Result<Self> {
        let fields = record
            .as_object()
            .ok_or_else(|| Error::InvalidRecord(format!("expected an object, got {record}")))?;

        let description = fields
            .get("description")
            .ok_or(Error::MissingField("description"))?;
        let priority = fields
            .get("priority")
            .ok_or(Error::MissingField("priority"))?;

        let priority = Priority::from_value(priority);
        let task = match description {
            Value::String(text) => Self::with_priority(text.as_str(), priority),
            other => Self {
                description: other.to_string(),
                priority,
                raw_description: Some(other.clone()),
            },
        };
        Ok(task)
    }

    /// Case-insensitive substring match against the description
    pub fn matches(&self, keyword: &str) -> bool {
        self.description
            .to_lowercase()
            .contains(&keyword.to_lowercase())
    }
}

/// Which task list (and file) an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Local,
    Global,
}

impl Scope {
    /// Load order used at startup
    pub const ALL: [Scope; 2] = [Scope::Local, Scope::Global];

    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Local => "local",
            Scope::Global => "global",
        }
    }

    /// Capitalized name used at the start of messages
    pub fn title(self) -> &'static str {
        match self {
            Scope::Local => "Local",
            Scope::Global => "Global",
        }
    }

    /// Top-level key of the scope's file
    pub fn file_key(self) -> &'static str {
        match self {
            Scope::Local => "local_tasks",
            Scope::Global => "global_tasks",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "local" => Ok(Scope::Local),
            "global" => Ok(Scope::Global),
            _ => Err(Error::InvalidScope(s.to_string())),
        }
    }
}

/// Lists covered by a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// Global tasks followed by local tasks
    All,
    Only(Scope),
}

impl SearchScope {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchScope::All => "all",
            SearchScope::Only(scope) => scope.as_str(),
        }
    }

    /// Scopes to search, in result order
    pub fn scopes(self) -> &'static [Scope] {
        match self {
            SearchScope::All => &[Scope::Global, Scope::Local],
            SearchScope::Only(Scope::Global) => &[Scope::Global],
            SearchScope::Only(Scope::Local) => &[Scope::Local],
        }
    }
}

impl FromStr for SearchScope {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "all" => Ok(SearchScope::All),
            other => other.parse().map(SearchScope::Only),
        }
    }
}
