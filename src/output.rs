//! Shared output formatting for todo.
//!
//! Human output is a handful of plain lines, colored by priority. With
//! `--json` every invocation prints exactly one envelope instead.

use crossterm::style::{style, Color, Stylize};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::manager::{LoadReport, LoadStatus};
use crate::task::Task;

#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub json: bool,
    pub color: bool,
}

/// Display color for a priority; anything outside 1..=5 gets the default
pub fn priority_color(priority: i64) -> Color {
    match priority {
        1 => Color::Grey,
        2 => Color::White,
        3 => Color::Yellow,
        4 => Color::Red,
        5 => Color::DarkRed,
        _ => Color::Reset,
    }
}

/// Wrap `text` in `color`, resetting afterwards
pub fn paint(text: &str, color: Color, enabled: bool) -> String {
    if !enabled || color == Color::Reset {
        return text.to_string();
    }
    style(text).with(color).to_string()
}

/// One numbered entry: `3. Buy milk (Priority: 2)`
pub fn format_task(number: usize, task: &Task, color: bool) -> String {
    let body = format!("{} (Priority: {})", task.description, task.priority);
    let shade = task.priority.level().map_or(Color::Reset, priority_color);
    format!("{number}. {}", paint(&body, shade, color))
}

/// A header followed by the tasks numbered from 1
pub fn format_list<'a, I>(
    header: &str,
    tasks: I,
    display_header: bool,
    color: bool,
) -> Vec<String>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut lines = Vec::new();
    if display_header {
        lines.push(paint(&format!("{header}:"), Color::Green, color));
    }
    lines.extend(
        tasks
            .into_iter()
            .enumerate()
            .map(|(idx, task)| format_task(idx + 1, task, color)),
    );
    lines
}

pub fn format_search(keyword: &str, matches: &[&Task], color: bool) -> Vec<String> {
    if matches.is_empty() {
        return vec![format!(
            "{}{}",
            paint("No tasks found matching ", Color::Green, color),
            paint(&format!("'{keyword}'."), Color::Red, color)
        )];
    }

    let mut lines = vec![format!(
        "{}{}{}",
        paint("Found tasks matching '", Color::Green, color),
        paint(keyword, Color::Red, color),
        paint("':", Color::Green, color)
    )];
    lines.extend(
        matches
            .iter()
            .enumerate()
            .map(|(idx, task)| format_task(idx + 1, task, color)),
    );
    lines
}

/// Messages for a startup load worth telling the user about.
///
/// A file that could not be created still gets its creation notice, followed
/// by the save error.
pub fn load_notices(report: &LoadReport) -> Vec<String> {
    let created = || {
        format!(
            "File '{}' does not exist. Creating a new {} file.",
            report.file.display(),
            report.scope
        )
    };
    match &report.result {
        Ok(LoadStatus::Loaded(_)) => Vec::new(),
        Ok(LoadStatus::Empty) => vec![format!("{} tasks file is empty.", report.scope.title())],
        Ok(LoadStatus::Created) => vec![created()],
        Err(err @ Error::Save { .. }) => vec![created(), err.to_string()],
        Err(err) => vec![err.to_string()],
    }
}

pub fn emit_success<T: Serialize>(
    options: OutputOptions,
    command: &str,
    data: &T,
    notices: &[String],
    human: &[String],
) -> Result<()> {
    if options.json {
        #[derive(Serialize)]
        struct Envelope<'a, T: Serialize> {
            command: &'a str,
            status: &'static str,
            data: &'a T,
            #[serde(skip_serializing_if = "Vec::is_empty")]
            notices: Vec<String>,
        }

        let payload = Envelope {
            command,
            status: "success",
            data,
            notices: notices.to_vec(),
        };

        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    for line in human {
        println!("{line}");
    }
    Ok(())
}

pub fn emit_error(
    options: OutputOptions,
    command: &str,
    err: &Error,
    notices: &[String],
) -> Result<()> {
    if options.json {
        #[derive(Serialize)]
        struct ErrorBody {
            message: String,
            kind: &'static str,
        }

        #[derive(Serialize)]
        struct Envelope<'a> {
            command: &'a str,
            status: &'static str,
            error: ErrorBody,
            #[serde(skip_serializing_if = "Vec::is_empty")]
            notices: Vec<String>,
        }

        let payload = Envelope {
            command,
            status: "error",
            error: ErrorBody {
                message: err.to_string(),
                kind: err.kind(),
            },
            notices: notices.to_vec(),
        };

        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("{err}");
    Ok(())
}
