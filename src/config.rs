//! Configuration loading and path resolution
//!
//! Handles the optional `~/.todo.toml` file and resolves where the two task
//! files live. Nothing here reads the process environment implicitly except
//! [`home_dir`]; callers pass the working directory and home in.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::task::{Scope, DEFAULT_PRIORITY};

/// Name of the optional config file in the home directory
pub const CONFIG_FILENAME: &str = ".todo.toml";

/// Default local task file, relative to the working directory
pub const LOCAL_FILENAME: &str = "tasks.json";

/// Default global task file, relative to the home directory
pub const GLOBAL_FILENAME: &str = "tasks_global.json";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Priority for new tasks when `-p` is not given
    #[serde(default = "default_priority")]
    pub default_priority: i64,

    /// Colorize terminal output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Local task file, relative to the working directory
    #[serde(default = "default_local_file")]
    pub local_file: PathBuf,

    /// Global task file; relative paths are joined onto the home directory
    #[serde(default)]
    pub global_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_priority: default_priority(),
            color: default_true(),
            local_file: default_local_file(),
            global_file: None,
        }
    }
}

fn default_priority() -> i64 {
    DEFAULT_PRIORITY
}

fn default_true() -> bool {
    true
}

fn default_local_file() -> PathBuf {
    PathBuf::from(LOCAL_FILENAME)
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from `path`, or return defaults.
    ///
    /// A broken config file never stops the tool; it is logged and ignored.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "ignoring invalid config");
                Self::default()
            }
        }
    }

    /// Default config location inside `home`
    pub fn default_path(home: &Path) -> PathBuf {
        home.join(CONFIG_FILENAME)
    }
}

/// Locations of the two task files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub local_file: PathBuf,
    pub global_file: PathBuf,
}

impl Paths {
    pub fn new(local_file: impl Into<PathBuf>, global_file: impl Into<PathBuf>) -> Self {
        Self {
            local_file: local_file.into(),
            global_file: global_file.into(),
        }
    }

    /// Resolve file locations from config against a working directory and home
    pub fn resolve(config: &Config, cwd: &Path, home: &Path) -> Self {
        let local_file = cwd.join(&config.local_file);
        let global_file = match &config.global_file {
            Some(path) => home.join(path),
            None => home.join(GLOBAL_FILENAME),
        };
        Self {
            local_file,
            global_file,
        }
    }

    /// File backing a scope
    pub fn file(&self, scope: Scope) -> &Path {
        match scope {
            Scope::Local => &self.local_file,
            Scope::Global => &self.global_file,
        }
    }

    /// Directory a scope's file lives in
    pub fn dir(&self, scope: Scope) -> PathBuf {
        let file = self.file(scope);
        match file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

/// The current user's home directory
pub fn home_dir() -> Result<PathBuf> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(Error::HomeNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_when_missing() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_or_default(&Config::default_path(temp.path()));
        assert_eq!(config, Config::default());
        assert_eq!(config.default_priority, 1);
        assert!(config.color);
    }

    #[test]
    fn overrides_from_toml() {
        let temp = TempDir::new().unwrap();
        let path = Config::default_path(temp.path());
        std::fs::write(
            &path,
            "default_priority = 3\ncolor = false\nglobal_file = \"notes/global.json\"\n",
        )
        .unwrap();

        let config = Config::load_or_default(&path);
        assert_eq!(config.default_priority, 3);
        assert!(!config.color);
        assert_eq!(config.local_file, PathBuf::from("tasks.json"));
        assert_eq!(config.global_file, Some(PathBuf::from("notes/global.json")));
    }

    #[test]
    fn invalid_toml_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        let path = Config::default_path(temp.path());
        std::fs::write(&path, "default_priority = \"high\"").unwrap();

        assert!(Config::load(&path).is_err());
        assert_eq!(Config::load_or_default(&path), Config::default());
    }

    #[test]
    fn resolve_default_paths() {
        let paths = Paths::resolve(
            &Config::default(),
            Path::new("/work/project"),
            Path::new("/home/alice"),
        );
        assert_eq!(paths.local_file, PathBuf::from("/work/project/tasks.json"));
        assert_eq!(
            paths.global_file,
            PathBuf::from("/home/alice/tasks_global.json")
        );
        assert_eq!(paths.dir(Scope::Local), PathBuf::from("/work/project"));
        assert_eq!(paths.dir(Scope::Global), PathBuf::from("/home/alice"));
    }

    #[test]
    fn dir_of_bare_filename_is_current_dir() {
        let paths = Paths::new("tasks.json", "/tmp/tasks_global.json");
        assert_eq!(paths.dir(Scope::Local), PathBuf::from("."));
    }
}
