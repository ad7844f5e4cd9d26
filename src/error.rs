//! Error types for todo
//!
//! Every failure is reported to the user as a printed line and the process
//! still exits 0. The typed variants exist so the core can be tested without
//! scraping terminal output.

use thiserror::Error;

use crate::task::Scope;

/// Main error type for todo operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid task type '{0}'. Accepted values are 'local' or 'global'.")]
    InvalidScope(String),

    #[error("Invalid task identifier. Please provide a valid task number.")]
    InvalidIdentifier(String),

    #[error("Invalid task number for {scope} tasks.")]
    TaskNotFound { scope: Scope, number: i64 },

    #[error("missing field '{0}' in task record")]
    MissingField(&'static str),

    #[error("invalid task record: {0}")]
    InvalidRecord(String),

    #[error("Error while loading data: {source}")]
    Load {
        scope: Scope,
        #[source]
        source: Box<Error>,
    },

    #[error("Error while saving data: {source}")]
    Save {
        scope: Scope,
        #[source]
        source: Box<Error>,
    },

    #[error("Task description cannot be empty")]
    EmptyDescription,

    #[error("Could not determine the home directory")]
    HomeNotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    pub(crate) fn load(scope: Scope, source: Error) -> Self {
        Error::Load {
            scope,
            source: Box::new(source),
        }
    }

    pub(crate) fn save(scope: Scope, source: Error) -> Self {
        Error::Save {
            scope,
            source: Box::new(source),
        }
    }

    /// Stable label used in JSON output
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidScope(_) => "invalid_scope",
            Error::InvalidIdentifier(_) => "invalid_identifier",
            Error::TaskNotFound { .. } => "task_not_found",
            Error::MissingField(_) => "missing_field",
            Error::InvalidRecord(_) => "invalid_record",
            Error::Load { .. } => "load_failed",
            Error::Save { .. } => "save_failed",
            Error::EmptyDescription => "empty_description",
            Error::HomeNotFound => "home_not_found",
            Error::Io(_) => "io",
            Error::Json(_) => "json",
            Error::TomlParse(_) => "config",
        }
    }
}

/// Result type alias for todo operations
pub type Result<T> = std::result::Result<T, Error>;
