//! Command-line interface for todo
//!
//! The flag surface mirrors a classic single-dash task tool (`-ag`, `-rl`,
//! `-sg`, ...). clap only knows single-character short flags, so argv goes
//! through [`normalize_args`] first, which rewrites the multi-letter ones to
//! their `--` long form.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use crate::config::{self, Config, Paths};
use crate::error::Result;
use crate::manager::TaskManager;
use crate::output::{emit_error, load_notices, OutputOptions};
use crate::storage::Storage;
use crate::task::{Scope, SearchScope};

mod task;

/// Multi-letter flags written with a single dash
const LONG_SHORT_FLAGS: &[&str] = &["ag", "al", "rg", "rl", "sg", "sl", "ll"];

/// todo - personal task tracker
///
/// Keeps a local task list in ./tasks.json and a global one in
/// ~/tasks_global.json. With no flags, shows both lists.
#[derive(Parser, Debug)]
#[command(name = "todo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Add global task
    #[arg(long = "ag", value_name = "TASK")]
    pub add_global: Option<String>,

    /// Add local task
    #[arg(long = "al", value_name = "TASK")]
    pub add_local: Option<String>,

    /// Task priority (default 1)
    #[arg(short = 'p', value_name = "N", allow_negative_numbers = true)]
    pub priority: Option<i64>,

    /// Remove global task by number
    #[arg(long = "rg", value_name = "ID", allow_hyphen_values = true)]
    pub remove_global: Option<String>,

    /// Remove local task by number
    #[arg(long = "rl", value_name = "ID", allow_hyphen_values = true)]
    pub remove_local: Option<String>,

    /// Search for a task (in global and local)
    #[arg(short = 's', value_name = "TASK")]
    pub search: Option<String>,

    /// Search for a task in global tasks
    #[arg(long = "sg", value_name = "TASK")]
    pub search_global: Option<String>,

    /// Search for a task in local tasks
    #[arg(long = "sl", value_name = "TASK")]
    pub search_local: Option<String>,

    /// View all tasks
    #[arg(short = 'l')]
    pub list: bool,

    /// List local tasks
    #[arg(long = "ll")]
    pub list_local: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR", value_parser = clap::builder::FalseyValueParser::new())]
    pub no_color: bool,

    /// Local task file (defaults to ./tasks.json)
    #[arg(long, env = "TODO_LOCAL_FILE", value_name = "PATH")]
    pub local_file: Option<PathBuf>,

    /// Global task file (defaults to ~/tasks_global.json)
    #[arg(long, env = "TODO_GLOBAL_FILE", value_name = "PATH")]
    pub global_file: Option<PathBuf>,

    /// Config file (defaults to ~/.todo.toml)
    #[arg(long, env = "TODO_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// The single operation an invocation performs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Add {
        scope: Scope,
        description: String,
        priority: Option<i64>,
    },
    Remove {
        scope: Scope,
        identifier: String,
    },
    Search {
        scope: SearchScope,
        keyword: String,
    },
    List {
        scopes: &'static [Scope],
    },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Add { .. } => "add",
            Action::Remove { .. } => "remove",
            Action::Search { .. } => "search",
            Action::List { .. } => "list",
        }
    }
}

/// Rewrite `-ag`-style flags to `--ag` so clap can parse them
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(|arg| {
            let arg: OsString = arg.into();
            if passthrough {
                return arg;
            }
            if arg == "--" {
                passthrough = true;
                return arg;
            }
            let rewritten = match arg.to_str().and_then(|s| s.strip_prefix('-')) {
                Some(name) if LONG_SHORT_FLAGS.contains(&name) => Some(format!("--{name}")),
                _ => None,
            };
            rewritten.map(OsString::from).unwrap_or(arg)
        })
        .collect()
}

impl Cli {
    /// Which operation was requested.
    ///
    /// When several are given the first in this order wins: add global, add
    /// local, remove global, remove local, search all, search global, search
    /// local, list all, list local. No flags lists everything.
    pub fn action(&self) -> Action {
        let add = |scope, description: &String| Action::Add {
            scope,
            description: description.clone(),
            priority: self.priority,
        };
        let remove = |scope, identifier: &String| Action::Remove {
            scope,
            identifier: identifier.clone(),
        };
        let search = |scope, keyword: &String| Action::Search {
            scope,
            keyword: keyword.clone(),
        };

        if let Some(text) = &self.add_global {
            add(Scope::Global, text)
        } else if let Some(text) = &self.add_local {
            add(Scope::Local, text)
        } else if let Some(id) = &self.remove_global {
            remove(Scope::Global, id)
        } else if let Some(id) = &self.remove_local {
            remove(Scope::Local, id)
        } else if let Some(keyword) = &self.search {
            search(SearchScope::All, keyword)
        } else if let Some(keyword) = &self.search_global {
            search(SearchScope::Only(Scope::Global), keyword)
        } else if let Some(keyword) = &self.search_local {
            search(SearchScope::Only(Scope::Local), keyword)
        } else if self.list_local && !self.list {
            Action::List {
                scopes: &[Scope::Local],
            }
        } else {
            Action::List {
                scopes: &[Scope::Global, Scope::Local],
            }
        }
    }

    /// Output options before any config file is read
    pub fn output_options(&self) -> OutputOptions {
        OutputOptions {
            json: self.json,
            color: !self.no_color,
        }
    }

    /// Resolve config and task file locations
    pub fn resolve(&self) -> Result<(Config, Paths)> {
        let cwd = std::env::current_dir()?;
        let home = config::home_dir()?;

        let config_path = match &self.config {
            Some(path) => cwd.join(path),
            None => Config::default_path(&home),
        };
        let config = Config::load_or_default(&config_path);

        let mut paths = Paths::resolve(&config, &cwd, &home);
        if let Some(path) = &self.local_file {
            paths.local_file = cwd.join(path);
        }
        if let Some(path) = &self.global_file {
            paths.global_file = cwd.join(path);
        }
        tracing::debug!(
            local = %paths.local_file.display(),
            global = %paths.global_file.display(),
            "resolved task files"
        );
        Ok((config, paths))
    }

    /// Execute the requested operation.
    ///
    /// Errors from the operation itself are printed here; only setup failures
    /// (no working directory, no home) are returned.
    pub fn run(self) -> Result<()> {
        let (config, paths) = self.resolve()?;
        let output = OutputOptions {
            json: self.json,
            color: !self.no_color && config.color,
        };

        let (mut manager, reports) = TaskManager::open(Storage::new(paths));
        let notices: Vec<String> = reports.iter().flat_map(load_notices).collect();
        if !output.json {
            for notice in &notices {
                println!("{notice}");
            }
        }

        let action = self.action();
        let command = action.name();
        let result = match action {
            Action::Add {
                scope,
                description,
                priority,
            } => task::run_add(
                &mut manager,
                task::AddOptions {
                    description,
                    priority: priority.unwrap_or(config.default_priority),
                    scope,
                },
                output,
                &notices,
            ),
            Action::Remove { scope, identifier } => task::run_remove(
                &mut manager,
                task::RemoveOptions { identifier, scope },
                output,
                &notices,
            ),
            Action::Search { scope, keyword } => task::run_search(
                &manager,
                task::SearchOptions { keyword, scope },
                output,
                &notices,
            ),
            Action::List { scopes } => {
                task::run_list(&manager, task::ListOptions { scopes }, output, &notices)
            }
        };

        if let Err(err) = result {
            tracing::debug!(command, error = %err, "command failed");
            emit_error(output, command, &err, &notices)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let argv = std::iter::once("todo").chain(args.iter().copied());
        Cli::try_parse_from(normalize_args(argv)).unwrap()
    }

    #[test]
    fn normalize_rewrites_multi_letter_flags() {
        let args = normalize_args(["todo", "-ag", "x", "-p", "3", "-l", "--", "-rl"]);
        assert_eq!(args, ["todo", "--ag", "x", "-p", "3", "-l", "--", "-rl"]);
    }

    #[test]
    fn no_flags_lists_everything() {
        assert_eq!(
            parse(&[]).action(),
            Action::List {
                scopes: &[Scope::Global, Scope::Local]
            }
        );
        assert_eq!(
            parse(&["-p", "4"]).action(),
            Action::List {
                scopes: &[Scope::Global, Scope::Local]
            }
        );
    }

    #[test]
    fn list_local_only() {
        assert_eq!(
            parse(&["-ll"]).action(),
            Action::List {
                scopes: &[Scope::Local]
            }
        );
        assert_eq!(
            parse(&["-l", "-ll"]).action(),
            Action::List {
                scopes: &[Scope::Global, Scope::Local]
            }
        );
    }

    #[test]
    fn add_takes_priority() {
        assert_eq!(
            parse(&["-al", "Buy milk", "-p", "2"]).action(),
            Action::Add {
                scope: Scope::Local,
                description: "Buy milk".to_string(),
                priority: Some(2),
            }
        );
        assert_eq!(
            parse(&["-ag", "Renew passport"]).action(),
            Action::Add {
                scope: Scope::Global,
                description: "Renew passport".to_string(),
                priority: None,
            }
        );
    }

    #[test]
    fn add_wins_over_remove_and_search() {
        let action = parse(&["-s", "milk", "-rl", "1", "-al", "Buy milk"]).action();
        assert_eq!(action.name(), "add");

        let action = parse(&["-sg", "milk", "-rg", "2"]).action();
        assert_eq!(
            action,
            Action::Remove {
                scope: Scope::Global,
                identifier: "2".to_string()
            }
        );
    }

    #[test]
    fn search_variants() {
        assert_eq!(
            parse(&["-s", "buy"]).action(),
            Action::Search {
                scope: SearchScope::All,
                keyword: "buy".to_string()
            }
        );
        assert_eq!(
            parse(&["-sl", "buy"]).action(),
            Action::Search {
                scope: SearchScope::Only(Scope::Local),
                keyword: "buy".to_string()
            }
        );
    }

    #[test]
    fn negative_remove_identifier_is_a_value() {
        assert_eq!(
            parse(&["-rl", "-1"]).action(),
            Action::Remove {
                scope: Scope::Local,
                identifier: "-1".to_string()
            }
        );
    }

    #[test]
    fn priority_must_be_integer() {
        let argv = normalize_args(["todo", "-al", "x", "-p", "high"]);
        assert!(Cli::try_parse_from(argv).is_err());
    }
}
