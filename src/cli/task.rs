//! todo command implementations.

use serde::Serialize;

use crate::error::Result;
use crate::manager::TaskManager;
use crate::output::{emit_success, format_list, format_search, OutputOptions};
use crate::task::{Scope, SearchScope, Task};

pub struct AddOptions {
    pub description: String,
    pub priority: i64,
    pub scope: Scope,
}

pub struct RemoveOptions {
    pub identifier: String,
    pub scope: Scope,
}

pub struct SearchOptions {
    pub keyword: String,
    pub scope: SearchScope,
}

pub struct ListOptions {
    pub scopes: &'static [Scope],
}

#[derive(Serialize)]
struct SearchReport<'a> {
    keyword: &'a str,
    scope: &'static str,
    matches: Vec<&'a Task>,
}

#[derive(Serialize)]
struct ListReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    global: Option<&'a [Task]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    local: Option<&'a [Task]>,
}

pub fn run_add(
    manager: &mut TaskManager,
    options: AddOptions,
    output: OutputOptions,
    notices: &[String],
) -> Result<()> {
    let added = manager.add(&options.description, options.priority, options.scope)?;

    let line = format!(
        "{} task created in the folder: {}",
        added.scope.title(),
        added.dir.display()
    );
    emit_success(output, "add", &added, notices, &[line])
}

pub fn run_remove(
    manager: &mut TaskManager,
    options: RemoveOptions,
    output: OutputOptions,
    notices: &[String],
) -> Result<()> {
    let removed = manager.remove(&options.identifier, options.scope)?;

    let line = format!(
        "{} task '{}' removed.",
        removed.scope.title(),
        removed.task.description
    );
    emit_success(output, "remove", &removed, notices, &[line])
}

pub fn run_search(
    manager: &TaskManager,
    options: SearchOptions,
    output: OutputOptions,
    notices: &[String],
) -> Result<()> {
    let matches = manager.search(options.scope, &options.keyword);
    let lines = format_search(&options.keyword, &matches, output.color);

    let report = SearchReport {
        keyword: &options.keyword,
        scope: options.scope.as_str(),
        matches,
    };
    emit_success(output, "search", &report, notices, &lines)
}

pub fn run_list(
    manager: &TaskManager,
    options: ListOptions,
    output: OutputOptions,
    notices: &[String],
) -> Result<()> {
    let mut lines = Vec::new();
    let mut report = ListReport {
        global: None,
        local: None,
    };

    for &scope in options.scopes {
        let tasks = manager.tasks(scope);
        let header = format!("{} tasks", scope.title());
        // Headers of empty lists are left out.
        lines.extend(format_list(&header, tasks, !tasks.is_empty(), output.color));
        match scope {
            Scope::Global => report.global = Some(tasks),
            Scope::Local => report.local = Some(tasks),
        }
    }

    emit_success(output, "list", &report, notices, &lines)
}
